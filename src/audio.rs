//! Audio system using Web Audio API
//!
//! Both effects are synthesized with oscillators, so there are no sound
//! files to fetch.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{InitError, SoundEffect};
use crate::settings::Settings;

/// Owns the page's audio context
pub struct AudioManager {
    ctx: AudioContext,
    volume: f32,
}

impl AudioManager {
    /// Fails when the browser refuses to create an audio context
    pub fn new(settings: &Settings) -> Result<Self, InitError> {
        let ctx = AudioContext::new()
            .map_err(|e| InitError::Audio(format!("AudioContext unavailable: {:?}", e)))?;
        let volume = settings.effective_volume();
        log::info!("Audio ready (volume {:.2})", volume);
        Ok(Self { ctx, volume })
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if self.ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.resume();

        match effect {
            SoundEffect::PaddleBounce => self.play_paddle_bounce(self.volume),
            SoundEffect::BrickBreak => self.play_brick_break(self.volume),
        }
    }

    /// Oscillator routed through its own gain node to the speakers
    fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
        let osc = self.ctx.create_oscillator().ok()?;
        let gain = self.ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Low falling thump
    fn play_paddle_bounce(&self, vol: f32) {
        let Some((osc, gain)) = self.create_osc(180.0, OscillatorType::Sine) else {
            return;
        };
        let t = self.ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(70.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Bright two-tone crack
    fn play_brick_break(&self, vol: f32) {
        let t = self.ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(900.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency().set_value_at_time(1400.0, t + 0.03).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(400.0, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.14).ok();
        }

        // Body under the crack
        if let Some((osc, gain)) = self.create_osc(120.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }
}

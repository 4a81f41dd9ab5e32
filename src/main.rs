//! Breakout entry point
//!
//! Native builds play in the terminal. WASM builds draw to a canvas with
//! wgpu and show the HUD as DOM text.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use breakout::Settings;
    use breakout::audio::AudioManager;
    use breakout::platform::{Frontend, FrameLoop, InitError, InputDispatch, InputEvent, Key, SoundEffect};
    use breakout::renderer::{LabelKind, RenderState, Scene};
    use breakout::sim::GameSession;

    /// DOM element holding each HUD label
    const HUD_IDS: [(LabelKind, &str); 3] = [
        (LabelKind::Score, "hud-score"),
        (LabelKind::Lives, "hud-lives"),
        (LabelKind::Message, "hud-message"),
    ];

    type Game = Rc<RefCell<FrameLoop<WebFrontend>>>;

    /// Canvas plus DOM HUD plus WebAudio
    struct WebFrontend {
        document: Document,
        render: RenderState,
        audio: AudioManager,
        /// Filled by the keyboard listeners, drained once per frame
        pending: Rc<RefCell<Vec<InputEvent>>>,
    }

    impl WebFrontend {
        fn update_hud(&self, scene: &Scene) {
            for (kind, id) in HUD_IDS {
                if let Some(el) = self.document.get_element_by_id(id) {
                    el.set_text_content(Some(scene.label(kind).unwrap_or("")));
                }
            }
        }
    }

    impl Frontend for WebFrontend {
        fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
            let events: Vec<InputEvent> = self.pending.borrow_mut().drain(..).collect();
            if !events.is_empty() {
                // The page has seen a key press, so the context may start now
                self.audio.resume();
            }
            Ok(events)
        }

        fn play(&mut self, effect: SoundEffect) {
            self.audio.play(effect);
        }

        fn present(&mut self, scene: &Scene) -> io::Result<()> {
            match self.render.render(scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render.size;
                    self.render.resize(w, h);
                }
                Err(e) => log::warn!("Frame dropped: {:?}", e),
            }
            self.update_hud(scene);
            Ok(())
        }
    }

    fn map_key(name: &str) -> Key {
        match name {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            _ => Key::Other,
        }
    }

    fn setup_keyboard(document: &Document, pending: Rc<RefCell<Vec<InputEvent>>>) {
        {
            let pending = pending.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let name = event.key();
                let input = if name == "Escape" {
                    InputEvent::Quit
                } else {
                    InputEvent::KeyDown {
                        key: map_key(&name),
                        repeat: event.repeat(),
                    }
                };
                if name.starts_with("Arrow") {
                    event.prevent_default();
                }
                pending.borrow_mut().push(input);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                pending.borrow_mut().push(InputEvent::KeyUp {
                    key: map_key(&event.key()),
                });
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Game) {
        let running = game.borrow_mut().run_frame();
        match running {
            Ok(true) => request_animation_frame(game),
            Ok(false) => {
                let g = game.borrow();
                let session = g.session();
                log::info!(
                    "Session ended: score {}, lives {}, {} bricks left",
                    session.score,
                    session.lives,
                    session.bricks_remaining()
                );
                g.frontend().update_hud(&Scene {
                    clear: [0; 4],
                    rects: Vec::new(),
                    labels: Vec::new(),
                });
            }
            Err(e) => log::error!("Frame loop aborted: {}", e),
        }
    }

    pub async fn run() -> Result<(), InitError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger unavailable: {}", e).into());
        }

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or_else(|| InitError::Renderer("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| InitError::Renderer("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| InitError::Renderer("no #canvas element".into()))?
            .dyn_into()
            .map_err(|_| InitError::Renderer("#canvas is not a canvas".into()))?;

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| InitError::Renderer(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::Renderer(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render = RenderState::new(surface, &adapter, width, height).await?;
        let audio = AudioManager::new(&settings)?;

        let pending = Rc::new(RefCell::new(Vec::new()));
        setup_keyboard(&document, pending.clone());

        let frontend = WebFrontend {
            document,
            render,
            audio,
            pending,
        };
        let game = Rc::new(RefCell::new(FrameLoop::new(
            GameSession::new(),
            InputDispatch::new(&settings),
            frontend,
        )));

        game.borrow_mut()
            .present()
            .map_err(|e| InitError::Renderer(e.to_string()))?;
        request_animation_frame(game);

        log::info!("Breakout running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = web::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::Settings;
    use breakout::platform::{FrameLoop, InputDispatch};
    use breakout::sim::GameSession;
    use breakout::terminal::TerminalFrontend;

    env_logger::init();
    log::info!("Breakout (terminal) starting...");

    let settings = Settings::load();
    let frontend = match TerminalFrontend::new(&settings) {
        Ok(frontend) => frontend,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return;
        }
    };

    let mut game = FrameLoop::new(GameSession::new(), InputDispatch::new(&settings), frontend);
    let result = game.run();
    // Leave the alternate screen before reporting anything
    drop(game);
    if let Err(e) = result {
        log::error!("Frame loop aborted: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

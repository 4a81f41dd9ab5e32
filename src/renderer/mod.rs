//! Rendering module
//!
//! `scene` builds backend-neutral frame snapshots. The WebGPU backend turns
//! a scene's rectangles into colored quads; text goes to the host page.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{FilledRect, LabelKind, Rgba, Scene, TextLabel};

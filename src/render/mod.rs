mod frame;
mod null_renderer;
mod primitives;
mod scene;
mod theme;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, CurvePrimitive, LinePrimitive, LineStrokeStyle, RectPrimitive,
    TextHAlign, TextPrimitive,
};
pub use scene::build_render_frame;
pub use theme::Theme;

use crate::error::TimelineResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully built `RenderFrame`, so they never see catalog or
/// layout types.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()>;
}

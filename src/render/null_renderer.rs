use crate::error::TimelineResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer for tests and hosts that only consume the layout.
///
/// Frames are still validated, so broken geometry shows up without a real
/// backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_curve_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rects.len();
        self.last_curve_count = frame.curves.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}

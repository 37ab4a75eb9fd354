// LogExport - platform/clipboard.rs
//
// System clipboard access through egui's platform output.
//
// `egui::Context` is thread-safe: text queued from the export worker is
// handed to the windowing backend at the end of the next frame, so a
// repaint is requested immediately after.

use crate::core::sink::Clipboard;

/// Clipboard backed by the running egui context.
#[derive(Clone)]
pub struct EguiClipboard {
    ctx: egui::Context,
}

impl EguiClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl Clipboard for EguiClipboard {
    fn set_text(&self, text: String) {
        self.ctx.copy_text(text);
        self.ctx.request_repaint();
    }
}

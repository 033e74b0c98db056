use eframe::egui;

use crate::strip_crate::Recognizer;

/// Pointer position where the current cell drag started.
#[derive(Clone, Copy, Debug)]
pub struct DragOrigin {
    pub pos: egui::Pos2,
}

impl DragOrigin {
    pub fn translation(&self, pointer: egui::Pos2) -> egui::Vec2 { pointer - self.pos }
}

/// Eased horizontal scroll toward a newly appended cell.
#[derive(Clone, Copy, Debug)]
pub struct ScrollAnim {
    pub from: f32,
    pub to: f32,
    pub started_at: f64,
}

pub const SCROLL_ANIM_SECS: f64 = 0.3;

impl ScrollAnim {
    pub fn value_at(&self, now: f64) -> f32 {
        let t = ((now - self.started_at) / SCROLL_ANIM_SECS).clamp(0.0, 1.0) as f32;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: f64) -> bool { now - self.started_at >= SCROLL_ANIM_SECS }
}

/// Recognizers already consuming input this frame.
pub fn active_recognizers(ctx: &egui::Context) -> Vec<Recognizer> {
    let mut active = Vec::new();
    if ctx.input(|i| i.smooth_scroll_delta.x != 0.0 || i.smooth_scroll_delta.y != 0.0) {
        active.push(Recognizer::Scroll);
    }
    active
}

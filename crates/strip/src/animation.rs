use crate::ItemId;

/// Returns a cell's visual offset to rest after a drag that did not
/// dismiss it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapBack {
    pub item: ItemId,
    pub from: f32,
    pub started_at: f64,
    pub duration: f64,
}

impl SnapBack {
    pub fn new(item: ItemId, from: f32, started_at: f64, duration: f64) -> Self { Self { item, from, started_at, duration } }

    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 { return 1.0; }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn value_at(&self, now: f64) -> f32 { self.from * (1.0 - ease_in_out(self.progress(now))) }

    pub fn is_finished(&self, now: f64) -> bool { self.progress(now) >= 1.0 }
}

fn ease_in_out(t: f32) -> f32 { t * t * (3.0 - 2.0 * t) }

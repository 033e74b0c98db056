use serde::{Deserialize, Serialize};

use crate::{Item, ItemId};

/// A live drag-to-dismiss gesture over one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub index: usize,
    pub item: ItemId,
    pub offset: f32,
    pub threshold: f32,
}

impl DragSession {
    pub fn new(index: usize, item: ItemId, threshold: f32) -> Self { Self { index, item, offset: 0.0, threshold } }

    /// Follows the gesture only while it is more vertical than horizontal.
    /// Checked on every movement, so a gesture that wobbles around the
    /// diagonal alternates between tracking and ignoring.
    pub fn track(&mut self, dx: f32, dy: f32) -> bool {
        if dy.abs() > dx.abs() {
            self.offset = dy;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl GestureState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            GestureState::Dragging(session) => Some(session),
            GestureState::Idle => None,
        }
    }
}

/// What a drag release did to the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    Dismissed { index: usize, item: Item },
    SnappedBack { index: usize, from: f32 },
    /// The captured cell was gone by release time.
    Reset,
}

//! Dismissible strip: an ordered row of cells that can be appended to,
//! removed by index, and dismissed with a vertical drag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod animation;
mod cell;
mod drag;
mod geometry;
mod gesture;
mod list;

pub use animation::SnapBack;
pub use cell::{CellCapabilities, CellRegistry};
pub use drag::{DragSession, GestureState, ReleaseOutcome};
pub use geometry::TrackGeometry;
pub use gesture::{PanRegistration, Recognizer};
pub use list::{DismissibleList, ListSnapshot, DEFAULT_SNAP_BACK_SECS};

#[derive(Debug, Error, PartialEq)]
pub enum StripError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Serial assigned at append time. Position in the list is the identity
/// callers work with; the serial only keeps rendering state attached to
/// the right cell while indices shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
}

/// Anything the UI context can apply control requests to.
pub trait ControlTarget {
    fn append_item(&mut self) -> usize;
    /// Out-of-range indices are ignored.
    fn remove_item(&mut self, index: usize) -> bool;
}

impl ControlTarget for DismissibleList {
    fn append_item(&mut self) -> usize { self.append() }

    fn remove_item(&mut self, index: usize) -> bool { self.remove_at(index).is_some() }
}

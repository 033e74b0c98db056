use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::SnapBack;
use crate::drag::{DragSession, GestureState, ReleaseOutcome};
use crate::geometry::TrackGeometry;
use crate::{Item, ItemId};

pub const DEFAULT_SNAP_BACK_SECS: f64 = 0.2;

/// Ordered cells plus the state of the one gesture that may be acting on
/// them. Owned by the UI context; every mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct DismissibleList {
    items: Vec<Item>,
    next_id: u64,
    geometry: TrackGeometry,
    snap_back_secs: f64,
    gesture: GestureState,
    scroll_enabled: bool,
    pending_scroll: Option<usize>,
    snap_backs: Vec<SnapBack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub len: usize,
    pub items: Vec<ItemId>,
    pub dragging: Option<DragSession>,
    pub scroll_enabled: bool,
}

impl Default for DismissibleList {
    fn default() -> Self { Self::new(TrackGeometry::default()) }
}

impl DismissibleList {
    pub fn new(geometry: TrackGeometry) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            geometry,
            snap_back_secs: DEFAULT_SNAP_BACK_SECS,
            gesture: GestureState::Idle,
            scroll_enabled: true,
            pending_scroll: None,
            snap_backs: Vec::new(),
        }
    }

    pub fn with_snap_back_secs(mut self, secs: f64) -> Self {
        self.snap_back_secs = secs.max(0.0);
        self
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn items(&self) -> &[Item] { &self.items }

    pub fn get(&self, index: usize) -> Option<&Item> { self.items.get(index) }

    pub fn index_of(&self, id: ItemId) -> Option<usize> { self.items.iter().position(|it| it.id == id) }

    pub fn geometry(&self) -> &TrackGeometry { &self.geometry }

    pub fn gesture(&self) -> &GestureState { &self.gesture }

    pub fn drag(&self) -> Option<&DragSession> { self.gesture.session() }

    pub fn is_scroll_enabled(&self) -> bool { self.scroll_enabled }

    /// Adds one cell at the end and asks the view to center it.
    pub fn append(&mut self) -> usize {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(Item { id });
        let index = self.items.len() - 1;
        self.pending_scroll = Some(index);
        debug!(%id, index, len = self.items.len(), "append");
        index
    }

    /// Removes the cell at `index`; out-of-range indices are ignored.
    /// Any live drag session is dropped.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        if index >= self.items.len() { return None; }
        let item = self.items.remove(index);
        self.snap_backs.retain(|a| a.item != item.id);
        if let GestureState::Dragging(session) = self.gesture {
            debug!(dragged = %session.item, "drag session discarded by removal");
            self.gesture = GestureState::Idle;
            self.scroll_enabled = true;
        }
        if let Some(pending) = self.pending_scroll {
            self.pending_scroll = match pending.cmp(&index) {
                std::cmp::Ordering::Less => Some(pending),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(pending - 1),
            };
        }
        debug!(id = %item.id, index, len = self.items.len(), "remove");
        Some(item)
    }

    pub fn tap(&mut self, index: usize) -> Option<Item> { self.remove_at(index) }

    /// `Idle -> Dragging`. Ignored while another session is live or when
    /// `index` is not a cell.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        if self.gesture.session().is_some() { return false; }
        let Some(item) = self.items.get(index) else { return false; };
        let session = DragSession::new(index, item.id, self.geometry.dismissal_threshold());
        // A fresh drag takes over from any snap-back still running on the cell.
        self.snap_backs.retain(|a| a.item != item.id);
        self.gesture = GestureState::Dragging(session);
        self.scroll_enabled = false;
        debug!(id = %item.id, index, "drag begin");
        true
    }

    /// Feeds the gesture's total translation since it began.
    pub fn update_drag(&mut self, dx: f32, dy: f32) -> bool {
        match &mut self.gesture {
            GestureState::Dragging(session) => session.track(dx, dy),
            GestureState::Idle => false,
        }
    }

    pub fn end_drag(&mut self, now: f64) -> Option<ReleaseOutcome> { self.release(now) }

    /// Cancellation resolves exactly like a normal release.
    pub fn cancel_drag(&mut self, now: f64) -> Option<ReleaseOutcome> { self.release(now) }

    fn release(&mut self, now: f64) -> Option<ReleaseOutcome> {
        let GestureState::Dragging(session) = std::mem::take(&mut self.gesture) else { return None; };
        self.scroll_enabled = true;

        let resolves = self.items.get(session.index).is_some_and(|it| it.id == session.item);
        if !resolves {
            debug!(id = %session.item, index = session.index, "drag release on missing cell");
            return Some(ReleaseOutcome::Reset);
        }

        if session.offset.abs() - session.threshold > self.geometry.item_height / 2.0 {
            let item = self.remove_at(session.index)?;
            debug!(id = %item.id, index = session.index, offset = session.offset, "drag dismissed");
            return Some(ReleaseOutcome::Dismissed { index: session.index, item });
        }

        if session.offset != 0.0 {
            self.snap_backs.push(SnapBack::new(session.item, session.offset, now, self.snap_back_secs));
        }
        debug!(id = %session.item, index = session.index, offset = session.offset, "drag snapped back");
        Some(ReleaseOutcome::SnappedBack { index: session.index, from: session.offset })
    }

    /// Vertical offset a cell should be drawn at.
    pub fn visual_offset(&self, id: ItemId, now: f64) -> f32 {
        if let Some(session) = self.gesture.session() {
            if session.item == id { return session.offset; }
        }
        self.snap_backs.iter().find(|a| a.item == id).map(|a| a.value_at(now)).unwrap_or(0.0)
    }

    /// Drops finished animations; true while something is still moving.
    pub fn tick(&mut self, now: f64) -> bool {
        self.snap_backs.retain(|a| !a.is_finished(now));
        !self.snap_backs.is_empty()
    }

    pub fn is_animating(&self) -> bool { !self.snap_backs.is_empty() }

    pub fn take_scroll_request(&mut self) -> Option<usize> { self.pending_scroll.take() }

    pub fn scroll_offset_to_center(&self, index: usize, viewport_width: f32) -> f32 {
        self.geometry.scroll_offset_to_center(index, self.items.len(), viewport_width)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            len: self.items.len(),
            items: self.items.iter().map(|it| it.id).collect(),
            dragging: self.gesture.session().copied(),
            scroll_enabled: self.scroll_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(n: usize) -> DismissibleList {
        let mut list = DismissibleList::default();
        for _ in 0..n { list.append(); }
        list
    }

    fn ids(list: &DismissibleList) -> Vec<u64> { list.items().iter().map(|it| it.id.0).collect() }

    #[test]
    fn appends_count_and_order() {
        let mut list = DismissibleList::default();
        assert!(list.is_empty());
        for expected in 0..5 {
            assert_eq!(list.append(), expected);
        }
        assert_eq!(list.len(), 5);
        assert_eq!(ids(&list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn append_three_requests_centering_on_last() {
        let mut list = list_with(3);
        assert_eq!(ids(&list), vec![0, 1, 2]);
        assert_eq!(list.take_scroll_request(), Some(2));
        assert_eq!(list.take_scroll_request(), None);
        assert_eq!(list.scroll_offset_to_center(2, 200.0), 120.0);
    }

    #[test]
    fn remove_shifts_later_items_down() {
        let mut list = list_with(4);
        let removed = list.remove_at(1).unwrap();
        assert_eq!(removed.id, ItemId(1));
        assert_eq!(ids(&list), vec![0, 2, 3]);
    }

    #[test]
    fn out_of_range_remove_is_noop() {
        let mut list = list_with(3);
        assert!(list.remove_at(3).is_none());
        assert!(list.remove_at(usize::MAX).is_none());
        assert_eq!(ids(&list), vec![0, 1, 2]);

        let mut empty = DismissibleList::default();
        assert!(empty.remove_at(0).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn tap_removes_middle_item() {
        let mut list = list_with(3);
        list.tap(1);
        assert_eq!(list.len(), 2);
        assert_eq!(ids(&list), vec![0, 2]);
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut list = list_with(2);
        list.remove_at(1);
        list.append();
        assert_eq!(ids(&list), vec![0, 2]);
    }

    #[test]
    fn drag_past_threshold_dismisses() {
        let mut list = list_with(3);
        assert!(list.begin_drag(0));
        assert!(!list.is_scroll_enabled());
        assert!(list.update_drag(3.0, -90.0));
        let outcome = list.end_drag(1.0).unwrap();
        assert_eq!(outcome, ReleaseOutcome::Dismissed { index: 0, item: Item { id: ItemId(0) } });
        assert_eq!(list.len(), 2);
        assert_eq!(ids(&list), vec![1, 2]);
        assert!(list.is_scroll_enabled());
        assert!(list.drag().is_none());
    }

    #[test]
    fn drag_below_threshold_snaps_back() {
        let mut list = list_with(3);
        list.begin_drag(0);
        list.update_drag(0.0, 60.0);
        let outcome = list.end_drag(5.0).unwrap();
        assert_eq!(outcome, ReleaseOutcome::SnappedBack { index: 0, from: 60.0 });
        assert_eq!(list.len(), 3);
        assert!(list.is_scroll_enabled());

        assert_eq!(list.visual_offset(ItemId(0), 5.0), 60.0);
        assert!(list.visual_offset(ItemId(0), 5.1) < 60.0);
        assert!(list.tick(5.1));
        assert!(!list.tick(5.3));
        assert_eq!(list.visual_offset(ItemId(0), 5.3), 0.0);
    }

    #[test]
    fn offset_at_exact_dismiss_distance_is_kept() {
        let mut list = list_with(1);
        list.begin_drag(0);
        list.update_drag(0.0, 75.0);
        assert!(matches!(list.end_drag(0.0), Some(ReleaseOutcome::SnappedBack { .. })));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn cancel_resolves_like_end() {
        let mut list = list_with(2);
        list.begin_drag(1);
        list.update_drag(0.0, 200.0);
        assert!(matches!(list.cancel_drag(0.0), Some(ReleaseOutcome::Dismissed { index: 1, .. })));
        assert_eq!(ids(&list), vec![0]);

        list.begin_drag(0);
        list.update_drag(0.0, 10.0);
        assert!(matches!(list.cancel_drag(0.0), Some(ReleaseOutcome::SnappedBack { index: 0, .. })));
        assert!(list.is_scroll_enabled());
    }

    #[test]
    fn directional_check_is_per_movement_event() {
        let mut list = list_with(1);
        list.begin_drag(0);
        assert!(list.update_drag(1.0, 20.0));
        assert_eq!(list.drag().unwrap().offset, 20.0);
        // horizontal wobble: ignored, offset holds
        assert!(!list.update_drag(30.0, 25.0));
        assert_eq!(list.drag().unwrap().offset, 20.0);
        // vertical again: tracked again, no lock from the earlier event
        assert!(list.update_drag(30.0, 31.0));
        assert_eq!(list.drag().unwrap().offset, 31.0);
        assert!(!list.update_drag(-40.0, 31.0));
        assert_eq!(list.drag().unwrap().offset, 31.0);
    }

    #[test]
    fn horizontal_only_drag_never_dismisses() {
        let mut list = list_with(1);
        list.begin_drag(0);
        assert!(!list.update_drag(300.0, 100.0));
        assert_eq!(list.end_drag(0.0), Some(ReleaseOutcome::SnappedBack { index: 0, from: 0.0 }));
        assert!(!list.is_animating());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn one_session_at_a_time() {
        let mut list = list_with(2);
        assert!(list.begin_drag(0));
        assert!(!list.begin_drag(1));
        assert_eq!(list.drag().unwrap().index, 0);
    }

    #[test]
    fn begin_drag_on_missing_cell_is_ignored() {
        let mut list = list_with(1);
        assert!(!list.begin_drag(4));
        assert_eq!(*list.gesture(), GestureState::Idle);
        assert!(list.is_scroll_enabled());
    }

    #[test]
    fn removal_during_drag_discards_session() {
        let mut list = list_with(3);
        list.begin_drag(2);
        list.update_drag(0.0, 100.0);
        list.remove_at(2);
        assert!(list.drag().is_none());
        assert!(list.is_scroll_enabled());
        // release after the session was discarded does nothing
        assert_eq!(list.end_drag(0.0), None);
        assert_eq!(ids(&list), vec![0, 1]);
    }

    #[test]
    fn update_and_release_without_session_are_inert() {
        let mut list = list_with(1);
        assert!(!list.update_drag(0.0, 500.0));
        assert_eq!(list.end_drag(0.0), None);
        assert_eq!(list.cancel_drag(0.0), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn removal_adjusts_pending_scroll() {
        let mut list = list_with(3);
        list.remove_at(0);
        assert_eq!(list.take_scroll_request(), Some(1));

        list.append();
        list.remove_at(2);
        assert_eq!(list.take_scroll_request(), None);
    }

    #[test]
    fn snapshot_reflects_drag() {
        let mut list = list_with(2);
        list.begin_drag(1);
        list.update_drag(0.0, -12.0);
        let snap = list.snapshot();
        assert_eq!(snap.len, 2);
        assert_eq!(snap.items, vec![ItemId(0), ItemId(1)]);
        assert!(!snap.scroll_enabled);
        let dragging = snap.dragging.unwrap();
        assert_eq!((dragging.index, dragging.offset, dragging.threshold), (1, -12.0, 25.0));

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["items"], serde_json::json!([0, 1]));
    }
}

use eframe::egui::{self, Color32, Stroke};

use crate::interaction::{active_recognizers, DragOrigin, ScrollAnim};
use crate::strip_crate::{CellCapabilities, Item, ReleaseOutcome};
use crate::App;

#[derive(Debug, Clone)]
pub(crate) struct CellStyle {
    pub(crate) fill: Color32,
    pub(crate) stroke: Stroke,
    pub(crate) label: String,
}

impl CellStyle {
    pub(crate) fn plain(fill: Color32, item: &Item) -> Self {
        Self { fill, stroke: Stroke::new(1.0, Color32::BLACK), label: item.id.to_string() }
    }
}

impl App {
    fn release_drag(&mut self, now: f64, cancelled: bool) {
        self.drag_origin = None;
        let outcome = if cancelled { self.list.cancel_drag(now) } else { self.list.end_drag(now) };
        if let Some(ReleaseOutcome::Dismissed { index, item }) = outcome {
            tracing::info!(id = %item.id, index, "cell dismissed by drag");
        }
    }

    pub(crate) fn strip_ui(&mut self, ui: &mut egui::Ui, now: f64) {
        let g = *self.list.geometry();

        if let Some(index) = self.list.take_scroll_request() {
            let to = self.list.scroll_offset_to_center(index, self.viewport_w);
            self.scroll_anim = Some(ScrollAnim { from: self.scroll_x, to, started_at: now });
        }

        // No scrolling of any kind while a cell is being dragged.
        let scroll_enabled = self.list.is_scroll_enabled();
        let mut area = egui::ScrollArea::horizontal()
            .id_salt("strip")
            .auto_shrink([false, true])
            .enable_scrolling(scroll_enabled)
            .drag_to_scroll(scroll_enabled);
        if let Some(anim) = self.scroll_anim {
            area = area.scroll_offset(egui::vec2(anim.value_at(now), 0.0));
            if anim.is_finished(now) { self.scroll_anim = None; }
        }

        let active = active_recognizers(ui.ctx());
        let items: Vec<Item> = self.list.items().to_vec();
        let mut tapped: Option<usize> = None;
        let output = area.show(ui, |ui| {
            ui.set_min_height(g.track_height);
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = g.item_spacing;
                for (index, item) in items.iter().enumerate() {
                    let (slot, _) = ui.allocate_exact_size(egui::vec2(g.item_width, g.track_height), egui::Sense::hover());
                    // Keyed by item id so gesture state follows the cell when indices shift.
                    let resp = ui.interact(slot, egui::Id::new(("strip-cell", item.id)), egui::Sense::click_and_drag());
                    let caps = CellCapabilities::DISMISSIBLE;

                    if caps.tap_to_dismiss && resp.clicked() {
                        tapped = Some(index);
                    }
                    if caps.drag_to_dismiss && resp.drag_started() && self.pan.may_begin(&active) && self.list.begin_drag(index) {
                        let origin = ui.input(|i| i.pointer.press_origin()).or(resp.interact_pointer_pos());
                        self.drag_origin = origin.map(|pos| DragOrigin { pos });
                    }
                    if resp.dragged() {
                        if let (Some(origin), Some(pointer)) = (self.drag_origin, resp.interact_pointer_pos()) {
                            let t = origin.translation(pointer);
                            self.list.update_drag(t.x, t.y);
                        }
                    }
                    if resp.drag_stopped() && self.list.drag().is_some_and(|d| d.item == item.id) {
                        self.release_drag(now, false);
                    }

                    let dy = self.list.visual_offset(item.id, now);
                    let cell = egui::Rect::from_center_size(slot.center() + egui::vec2(0.0, dy), egui::vec2(g.item_width, g.item_height));
                    let style = self.cells.make(caps, item);
                    let painter = ui.painter();
                    painter.rect_filled(cell, 4.0, style.fill);
                    painter.rect_stroke(cell, 4.0, style.stroke);
                    painter.text(cell.center(), egui::Align2::CENTER_CENTER, style.label, egui::FontId::monospace(12.0), Color32::BLACK);
                }
            });
        });
        self.scroll_x = output.state.offset.x;
        self.viewport_w = output.inner_rect.width();

        // Pointer lost or Escape: the gesture is cancelled, which resolves like a release.
        if self.list.drag().is_some() {
            let (released, escape) = ui.input(|i| (!i.pointer.any_down(), i.key_pressed(egui::Key::Escape)));
            if released || escape {
                self.release_drag(now, true);
            }
        }

        if let Some(index) = tapped {
            self.list.tap(index);
        }
    }
}

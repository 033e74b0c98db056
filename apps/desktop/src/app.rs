use eframe::egui::{self, Color32};
use dispatch::UiMailbox;
use settings::{parse_hex_color, StripSettings};

use crate::interaction::{DragOrigin, ScrollAnim};
use crate::strip::ui::CellStyle;
use crate::strip_crate::{CellCapabilities, CellRegistry, DismissibleList, PanRegistration, Recognizer};

pub(crate) struct App {
    pub(crate) list: DismissibleList,
    mailbox: UiMailbox,
    pub(crate) cells: CellRegistry<CellStyle>,
    pub(crate) pan: PanRegistration,
    pub(crate) background: Color32,
    pub(crate) drag_origin: Option<DragOrigin>,
    pub(crate) scroll_anim: Option<ScrollAnim>,
    pub(crate) scroll_x: f32,
    pub(crate) viewport_w: f32,
}

fn color(hex: &str, fallback: Color32) -> Color32 {
    parse_hex_color(hex).map(|[r, g, b]| Color32::from_rgb(r, g, b)).unwrap_or(fallback)
}

impl App {
    pub(crate) fn new(settings: &StripSettings, mailbox: UiMailbox) -> Self {
        let fill = color(&settings.cell_color, Color32::YELLOW);
        let mut cells = CellRegistry::new(|item| CellStyle::plain(Color32::from_gray(90), item));
        cells.register(CellCapabilities::DISMISSIBLE, move |item| CellStyle::plain(fill, item));
        Self {
            list: settings.build_list(),
            mailbox,
            cells,
            pan: PanRegistration::new().simultaneous_with(Recognizer::Scroll),
            background: color(&settings.background_color, Color32::BLUE),
            drag_origin: None,
            scroll_anim: None,
            scroll_x: 0.0,
            viewport_w: 0.0,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Requests from other threads land here, on the UI thread only.
        self.mailbox.drain(&mut self.list);
        let now = ctx.input(|i| i.time);

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    self.list.append();
                }
                ui.separator();
                ui.label(format!("{} items", self.list.len()));
                if let Some(drag) = self.list.drag() {
                    ui.separator();
                    ui.monospace(format!("drag #{} dy={:.0}", drag.index, drag.offset));
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(self.background))
            .show(ctx, |ui| {
                ui.add_space(((ui.available_height() - self.list.geometry().track_height) / 2.0).max(0.0));
                self.strip_ui(ui, now);
            });

        let animating = self.list.tick(now);
        if animating || self.list.drag().is_some() || self.scroll_anim.is_some() {
            ctx.request_repaint();
        }
    }
}

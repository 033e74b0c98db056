use anyhow::Result;
use eframe::{egui, NativeOptions};
use settings::StripSettings;
use std::path::PathBuf;
extern crate strip as strip_crate;
mod app;
mod interaction;
mod remote;
mod strip;
use app::App;

use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    // Optional first argument: settings file
    let settings_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(settings::settings_path);
    let settings = StripSettings::load_lenient(&settings_path);
    tracing::info!(path = %settings_path.display(), "settings loaded");

    let (handle, mailbox) = dispatch::channel();
    remote::spawn_stdin_reader(handle);

    let title = settings.window_title.clone();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 360.0]).with_title(title.clone()),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            mailbox.set_waker(move || ctx.request_repaint());
            Ok(Box::new(App::new(&settings, mailbox)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}

#![windows_subsystem = "windows"]

mod app;
mod document;
mod settings;
mod ui;

use app::DopesheetApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 600.0])
            .with_title("Dopesheet"),
        ..Default::default()
    };

    eframe::run_native(
        "Dopesheet",
        options,
        Box::new(|_cc| Ok(Box::new(DopesheetApp::default()))),
    )
}

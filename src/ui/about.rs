//! About dialog component

use eframe::egui;

/// About dialog state
#[derive(Default)]
pub struct AboutDialog {
    pub open: bool,
}

impl AboutDialog {
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        // Dimmer background
        egui::Area::new(egui::Id::new("about_modal_dimmer"))
            .fixed_pos(egui::pos2(0.0, 0.0))
            .order(egui::Order::Background)
            .show(ctx, |ui| {
                ui.painter().rect_filled(
                    ctx.screen_rect(),
                    0.0,
                    egui::Color32::from_rgba_premultiplied(0, 0, 0, 150),
                );
            });

        let mut should_close = false;

        egui::Window::new("About Dopesheet")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Dopesheet");
                    ui.add_space(5.0);
                    ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                    ui.label(env!("BUILD_INFO"));
                    ui.add_space(8.0);

                    ui.label("2D Animation Timeline Editor");
                    ui.add_space(15.0);
                });

                let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() || enter_pressed {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.open = false;
        }
    }
}

//! Layer properties dialog component

use dopesheet::i18n::Translation;
use eframe::egui;

/// Modal prompt for editing a layer's name, prefilled when opened.
#[derive(Default)]
pub struct PropertiesDialog {
    pub open: bool,
    layer_id: u32,
    name_buffer: String,
    focus_pending: bool,
}

impl PropertiesDialog {
    pub fn open_for(&mut self, layer_id: u32, current_name: &str) {
        self.open = true;
        self.layer_id = layer_id;
        self.name_buffer = current_name.to_string();
        self.focus_pending = true;
    }

    /// Render the dialog. Returns `(layer id, entered name)` when the user
    /// confirms; cancel and escape return nothing.
    pub fn show(&mut self, ctx: &egui::Context, text: &Translation) -> Option<(u32, String)> {
        if !self.open {
            return None;
        }

        // Dimmer background
        egui::Area::new(egui::Id::new("properties_modal_dimmer"))
            .fixed_pos(egui::pos2(0.0, 0.0))
            .order(egui::Order::Background)
            .show(ctx, |ui| {
                ui.painter().rect_filled(
                    ctx.screen_rect(),
                    0.0,
                    egui::Color32::from_rgba_premultiplied(0, 0, 0, 150),
                );
            });

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new(text.dialog_properties_title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(text.label_name);
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.name_buffer).desired_width(180.0),
                    );
                    if self.focus_pending {
                        resp.request_focus();
                        self.focus_pending = false;
                    }
                });
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui.button(text.btn_ok).clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Enter))
                    {
                        confirmed = true;
                    }
                    if ui.button(text.btn_cancel).clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Escape))
                    {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.open = false;
            return Some((self.layer_id, std::mem::take(&mut self.name_buffer)));
        }
        if cancelled {
            self.open = false;
        }
        None
    }
}

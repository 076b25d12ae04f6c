//! App module - main application logic and UI

use eframe::egui;
use std::path::Path;

use crate::document::Document;
use crate::settings::{AppSettings, SelectionStyle, ThemeMode};
use crate::ui::{AboutDialog, PropertiesDialog, Timeline};
use dopesheet::i18n::Language;
use dopesheet::{LayerKind, Scene, TimelinePalette};

pub struct DopesheetApp {
    pub document: Document,
    pub settings: AppSettings,
    pub timeline: Timeline,
    pub about_dialog: AboutDialog,
    pub properties_dialog: PropertiesDialog,

    pub show_new_dialog: bool,
    pub new_dialog_focus_name: bool,
    pub new_name: String,
    pub new_framerate: u32,
    pub new_duration: i32,

    pub show_settings_dialog: bool,
    pub temp_theme_mode: ThemeMode,
    pub temp_selection_style: SelectionStyle,
    pub temp_language: Language,

    pub show_exit_dialog: bool,
    pub allowed_to_close: bool,

    pub status_message: Option<(String, egui::Color32)>,
    pub status_timer: f64,

    pub window_title: String,
    pub first_frame: bool,
}

/// A fresh scene gets the same starter layers a new document in the
/// desktop editors ships with.
fn starter_scene(name: &str, framerate: u32, duration: i32) -> Scene {
    let mut scene = Scene::new(name, framerate, duration);
    let _ = scene.add_layer(LayerKind::Bitmap);
    let _ = scene.add_layer(LayerKind::Vector);
    let _ = scene.add_layer(LayerKind::Camera);
    scene
}

impl Default for DopesheetApp {
    fn default() -> Self {
        let settings = AppSettings::load_from_registry();

        Self {
            document: Document::new(starter_scene("scene1", 24, 240), None),
            timeline: Timeline::default(),
            about_dialog: AboutDialog::default(),
            properties_dialog: PropertiesDialog::default(),
            show_new_dialog: false,
            new_dialog_focus_name: false,
            new_name: "scene1".to_string(),
            new_framerate: 24,
            new_duration: 240,
            show_settings_dialog: false,
            temp_theme_mode: settings.theme_mode,
            temp_selection_style: settings.selection_style,
            temp_language: settings.language,
            settings,
            show_exit_dialog: false,
            allowed_to_close: false,
            status_message: None,
            status_timer: 0.0,
            window_title: String::new(),
            first_frame: true,
        }
    }
}

impl DopesheetApp {
    fn set_success_message(&mut self, msg: String) {
        self.status_message = Some((msg, egui::Color32::from_rgb(100, 255, 100)));
        self.status_timer = 3.5;
    }

    fn set_error_message(&mut self, msg: String) {
        self.status_message = Some((msg, egui::Color32::from_rgb(255, 100, 100)));
        self.status_timer = 3.5;
    }

    pub fn create_new_scene(&mut self) {
        let name = if self.new_name.trim().is_empty() {
            "scene1"
        } else {
            self.new_name.trim()
        };
        let scene = starter_scene(name, self.new_framerate, self.new_duration.max(1));
        self.document = Document::new(scene, None);
        self.show_new_dialog = false;
    }

    fn load_file_from_path(&mut self, path_str: &str) {
        let extension = Path::new(path_str)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if extension != "dsx" {
            self.set_error_message(format!("Unsupported file type: {}", extension));
            return;
        }

        match dopesheet::parse_scene_file(path_str) {
            Ok(scene) => {
                self.document = Document::new(scene, Some(path_str.to_string()));
                self.status_message = None;
            }
            Err(e) => {
                self.set_error_message(format!("{:#}", e));
            }
        }
    }

    pub fn open_document(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Dopesheet Scene", &["dsx"])
            .pick_file()
        {
            if let Some(path_str) = path.to_str() {
                self.load_file_from_path(path_str);
            }
        }
    }

    pub fn save_document(&mut self) {
        let text = self.settings.language.text();
        if self.document.file_path.is_some() {
            if let Err(e) = self.document.save() {
                self.set_error_message(e);
            } else {
                self.set_success_message(text.msg_saved.to_string());
            }
        } else {
            self.save_document_as();
        }
    }

    pub fn save_document_as(&mut self) {
        let text = self.settings.language.text();
        let default_name = format!("{}.dsx", self.document.scene.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Dopesheet Scene", &["dsx"])
            .set_file_name(&default_name)
            .save_file()
        {
            if let Some(path_str) = path.to_str() {
                if let Err(e) = self.document.save_as(path_str.to_string()) {
                    self.set_error_message(e);
                } else {
                    self.set_success_message(text.msg_saved.to_string());
                }
            }
        }
    }

    fn add_layer(&mut self, kind: LayerKind) {
        if self.document.add_layer(kind).is_err() {
            let text = self.settings.language.text();
            self.set_error_message(text.msg_layer_limit.to_string());
        }
    }

    fn open_properties_for_current(&mut self) {
        if let Some(layer) = self.document.current_layer() {
            self.properties_dialog.open_for(layer.id(), &layer.name);
        }
    }

    fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
        let pref = match mode {
            ThemeMode::System => egui::ThemePreference::System,
            ThemeMode::Light => egui::ThemePreference::Light,
            ThemeMode::Dark => egui::ThemePreference::Dark,
        };
        ctx.set_theme(pref);
    }

    fn on_close_event(&mut self) -> bool {
        if self.allowed_to_close {
            return true;
        }
        if self.document.is_modified {
            self.show_exit_dialog = true;
            return false;
        }
        true
    }
}

impl eframe::App for DopesheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            Self::apply_theme(ctx, self.settings.theme_mode);
            self.first_frame = false;
        }

        let text = self.settings.language.text();

        let title = format!("{} - Dopesheet", self.document.title());
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        if self.status_timer > 0.0 {
            self.status_timer -= ctx.input(|i| i.stable_dt) as f64;
            if self.status_timer <= 0.0 {
                self.status_message = None;
            } else {
                ctx.request_repaint();
            }
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            if !self.on_close_event() {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
        }

        if self.show_new_dialog {
            egui::Area::new(egui::Id::new("modal_dimmer"))
                .fixed_pos(egui::pos2(0.0, 0.0))
                .order(egui::Order::Background)
                .show(ctx, |ui| {
                    ui.painter().rect_filled(
                        ctx.screen_rect(),
                        0.0,
                        egui::Color32::from_rgba_premultiplied(0, 0, 0, 200),
                    );
                });
            egui::Window::new(text.action_new)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(text.label_name);
                        let r = ui.text_edit_singleline(&mut self.new_name);
                        if self.new_dialog_focus_name {
                            r.request_focus();
                            self.new_dialog_focus_name = false;
                        }
                    });
                    ui.horizontal(|ui| {
                        ui.label(text.label_fps);
                        ui.radio_value(&mut self.new_framerate, 24, "24");
                        ui.radio_value(&mut self.new_framerate, 30, "30");
                        ui.add(
                            egui::DragValue::new(&mut self.new_framerate)
                                .range(1..=240)
                                .suffix(" fps"),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label(text.label_duration);
                        ui.add(
                            egui::DragValue::new(&mut self.new_duration)
                                .range(1..=dopesheet::limits::MAX_FRAMES as i32)
                                .suffix(" f"),
                        );
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button(text.btn_create).clicked()
                            || ui.input(|i| i.key_pressed(egui::Key::Enter))
                        {
                            self.create_new_scene();
                        }
                        if ui.button(text.btn_cancel).clicked() {
                            self.show_new_dialog = false;
                        }
                    });
                });
        }

        if self.show_exit_dialog {
            egui::Area::new(egui::Id::new("exit_modal_dimmer"))
                .fixed_pos(egui::pos2(0.0, 0.0))
                .order(egui::Order::Background)
                .show(ctx, |ui| {
                    ui.painter().rect_filled(
                        ctx.screen_rect(),
                        0.0,
                        egui::Color32::from_rgba_premultiplied(0, 0, 0, 150),
                    );
                });
            let mut action: Option<i32> = None;
            egui::Window::new(text.dialog_unsaved_title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    ui.label(text.dialog_unsaved_body);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button(text.btn_save).clicked() {
                            action = Some(0);
                        }
                        if ui.button(text.btn_dont_save).clicked() {
                            action = Some(1);
                        }
                        if ui.button(text.btn_cancel).clicked() {
                            action = Some(2);
                        }
                    });
                });
            match action {
                Some(0) => {
                    self.save_document();
                    // The save-as picker may have been cancelled; only
                    // close once the document really hit disk.
                    if !self.document.is_modified {
                        self.show_exit_dialog = false;
                        self.allowed_to_close = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
                Some(1) => {
                    self.show_exit_dialog = false;
                    self.allowed_to_close = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Some(2) => {
                    self.show_exit_dialog = false;
                }
                _ => {}
            }
        }

        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::N) {
                self.show_new_dialog = true;
                self.new_dialog_focus_name = true;
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::O) {
                self.open_document();
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::S) {
                self.save_document();
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::Z) {
                self.document.undo();
            }
        });

        let any_dialog = self.show_new_dialog
            || self.show_exit_dialog
            || self.show_settings_dialog
            || self.properties_dialog.open
            || self.about_dialog.open;
        if !any_dialog && !ctx.wants_keyboard_input() {
            ctx.input(|i| {
                if i.key_pressed(egui::Key::ArrowLeft) {
                    let frame = self.document.selection.current_frame;
                    self.document.select_frame(frame - 1);
                }
                if i.key_pressed(egui::Key::ArrowRight) {
                    let frame = self.document.selection.current_frame;
                    self.document.select_frame(frame + 1);
                }
                if i.key_pressed(egui::Key::ArrowUp) {
                    let layer = self.document.selection.current_layer;
                    if layer > 0 {
                        self.document.select_layer(layer - 1);
                    }
                }
                if i.key_pressed(egui::Key::ArrowDown) {
                    let layer = self.document.selection.current_layer;
                    self.document.select_layer(layer + 1);
                }
            });
        }

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                for file in &i.raw.dropped_files {
                    if let Some(path) = &file.path {
                        if let Some(path_str) = path.to_str() {
                            self.load_file_from_path(path_str);
                        }
                    }
                }
            }
        });

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(text.menu_file, |ui| {
                    ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
                    if ui
                        .add(egui::Button::new(text.action_new).shortcut_text("Ctrl+N"))
                        .clicked()
                    {
                        self.show_new_dialog = true;
                        self.new_dialog_focus_name = true;
                        ui.close_menu();
                    }
                    if ui
                        .add(egui::Button::new(text.action_open).shortcut_text("Ctrl+O"))
                        .clicked()
                    {
                        self.open_document();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add(egui::Button::new(text.action_save).shortcut_text("Ctrl+S"))
                        .clicked()
                    {
                        self.save_document();
                        ui.close_menu();
                    }
                    if ui.add(egui::Button::new(text.action_save_as)).clicked() {
                        self.save_document_as();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.add(egui::Button::new(text.action_quit)).clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close_menu();
                    }
                });

                ui.menu_button(text.menu_edit, |ui| {
                    ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
                    if ui
                        .add(egui::Button::new(text.action_undo).shortcut_text("Ctrl+Z"))
                        .clicked()
                    {
                        self.document.undo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.add(egui::Button::new(text.action_settings)).clicked() {
                        self.temp_theme_mode = self.settings.theme_mode;
                        self.temp_selection_style = self.settings.selection_style;
                        self.temp_language = self.settings.language;
                        self.show_settings_dialog = true;
                        ui.close_menu();
                    }
                });

                ui.menu_button(text.menu_layer, |ui| {
                    ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
                    if ui.button(text.action_add_bitmap).clicked() {
                        self.add_layer(LayerKind::Bitmap);
                        ui.close_menu();
                    }
                    if ui.button(text.action_add_vector).clicked() {
                        self.add_layer(LayerKind::Vector);
                        ui.close_menu();
                    }
                    if ui.button(text.action_add_sound).clicked() {
                        self.add_layer(LayerKind::Sound);
                        ui.close_menu();
                    }
                    if ui.button(text.action_add_camera).clicked() {
                        self.add_layer(LayerKind::Camera);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button(text.action_layer_properties).clicked() {
                        self.open_properties_for_current();
                        ui.close_menu();
                    }
                    if ui.button(text.action_toggle_visible).clicked() {
                        let i = self.document.selection.current_layer;
                        self.document.toggle_visible(i);
                        ui.close_menu();
                    }
                    if ui.button(text.action_move_up).clicked() {
                        let i = self.document.selection.current_layer;
                        self.document.move_layer_up(i);
                        ui.close_menu();
                    }
                    if ui.button(text.action_move_down).clicked() {
                        let i = self.document.selection.current_layer;
                        self.document.move_layer_down(i);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(
                            self.document.scene.layer_count() > 1,
                            egui::Button::new(text.action_delete_layer),
                        )
                        .clicked()
                    {
                        let i = self.document.selection.current_layer;
                        self.document.delete_layer(i);
                        ui.close_menu();
                    }
                });

                ui.menu_button(text.menu_help, |ui| {
                    ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
                    if ui.button(text.action_about).clicked() {
                        self.about_dialog.open = true;
                        ui.close_menu();
                    }
                });
            });
        });

        if self.show_settings_dialog {
            let mut should_save = false;
            let mut should_cancel = false;
            egui::Window::new(text.settings_title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    ui.heading(text.settings_general);
                    ui.horizontal(|ui| {
                        ui.label(text.settings_language);
                        ui.radio_value(&mut self.temp_language, Language::En, "English");
                        ui.radio_value(&mut self.temp_language, Language::Zh, "中文");
                        ui.radio_value(&mut self.temp_language, Language::Ja, "日本語");
                    });
                    ui.separator();
                    ui.heading(text.settings_appearance);
                    ui.horizontal(|ui| {
                        ui.label(text.settings_theme);
                        egui::ComboBox::from_id_salt("theme_mode")
                            .selected_text(match self.temp_theme_mode {
                                ThemeMode::System => "System",
                                ThemeMode::Light => "Light",
                                ThemeMode::Dark => "Dark",
                            })
                            .show_ui(ui, |ui| {
                                if ui
                                    .selectable_value(
                                        &mut self.temp_theme_mode,
                                        ThemeMode::System,
                                        "System",
                                    )
                                    .clicked()
                                {
                                    Self::apply_theme(ctx, ThemeMode::System);
                                }
                                if ui
                                    .selectable_value(
                                        &mut self.temp_theme_mode,
                                        ThemeMode::Light,
                                        "Light",
                                    )
                                    .clicked()
                                {
                                    Self::apply_theme(ctx, ThemeMode::Light);
                                }
                                if ui
                                    .selectable_value(
                                        &mut self.temp_theme_mode,
                                        ThemeMode::Dark,
                                        "Dark",
                                    )
                                    .clicked()
                                {
                                    Self::apply_theme(ctx, ThemeMode::Dark);
                                }
                            });
                    });
                    ui.horizontal(|ui| {
                        ui.label(text.settings_selection);
                        egui::ComboBox::from_id_salt("selection_style")
                            .selected_text(match self.temp_selection_style {
                                SelectionStyle::Classic => "Classic",
                                SelectionStyle::Aqua => "Aqua",
                            })
                            .show_ui(ui, |ui| {
                                ui.selectable_value(
                                    &mut self.temp_selection_style,
                                    SelectionStyle::Classic,
                                    "Classic",
                                );
                                ui.selectable_value(
                                    &mut self.temp_selection_style,
                                    SelectionStyle::Aqua,
                                    "Aqua",
                                );
                            });
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button(text.btn_ok).clicked() {
                            should_save = true;
                        }
                        if ui.button(text.btn_cancel).clicked() {
                            should_cancel = true;
                        }
                    });
                });

            if should_save {
                self.settings.theme_mode = self.temp_theme_mode;
                self.settings.selection_style = self.temp_selection_style;
                self.settings.language = self.temp_language;
                let _ = self.settings.save_to_registry();
                Self::apply_theme(ctx, self.settings.theme_mode);
                self.show_settings_dialog = false;
            }
            if should_cancel {
                Self::apply_theme(ctx, self.settings.theme_mode);
                self.show_settings_dialog = false;
            }
        }

        self.about_dialog.show(ctx);

        if let Some((layer_id, name)) = self.properties_dialog.show(ctx, text) {
            let index = self
                .document
                .scene
                .layers()
                .iter()
                .position(|l| l.id() == layer_id);
            if let Some(index) = index {
                self.document.rename_layer(index, &name);
            }
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let layer_name = self
                    .document
                    .current_layer()
                    .map(|l| l.name.as_str())
                    .unwrap_or("-");
                ui.label(format!("{}: {}", text.info_layer, layer_name));
                ui.separator();
                ui.label(format!(
                    "{}: {}",
                    text.info_frame, self.document.selection.current_frame
                ));
                let exposed_key = self.document.current_layer().and_then(|l| {
                    l.keyframes()
                        .keyframe_at_or_before(self.document.selection.current_frame)
                });
                if let Some(key) = exposed_key {
                    ui.separator();
                    ui.label(format!("{}: {}", text.info_key, key));
                }
                if let Some((msg, color)) = &self.status_message {
                    ui.separator();
                    ui.colored_label(*color, msg);
                }
            });
        });

        let palette = if ctx.theme() == egui::Theme::Dark {
            TimelinePalette::dark()
        } else {
            TimelinePalette::light()
        };

        let mut open_properties = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            open_properties = self.timeline.show(
                ui,
                &mut self.document,
                &palette,
                self.settings.selection_style,
                text,
            );
        });
        if let Some(i) = open_properties {
            if let Some(layer) = self.document.scene.layer(i) {
                self.properties_dialog.open_for(layer.id(), &layer.name);
            }
        }
    }
}

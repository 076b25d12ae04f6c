//! Timeline widget - layer labels, frame ruler and keyframe tracks

use dopesheet::i18n::Translation;
use dopesheet::models::layer::VISIBILITY_STRIP_WIDTH;
use dopesheet::paint::frame_cell;
use dopesheet::{PaintContext, SelectionStyle, TimelinePalette, VisibilityMode};
use eframe::egui;

use crate::document::Document;

pub const LABEL_WIDTH: f32 = 180.0;
pub const ROW_HEIGHT: f32 = 22.0;
const RULER_HEIGHT: f32 = 22.0;
const MIN_FRAME_WIDTH: f32 = 4.0;
const MAX_FRAME_WIDTH: f32 = 20.0;

/// Per-window timeline view state: zoom level and the visibility display
/// mode cycled by the corner button.
pub struct Timeline {
    pub frame_width: f32,
    pub visibility_mode: VisibilityMode,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            frame_width: 12.0,
            visibility_mode: VisibilityMode::default(),
        }
    }
}

impl Timeline {
    pub fn zoom_in(&mut self) {
        self.frame_width = (self.frame_width + 2.0).min(MAX_FRAME_WIDTH);
    }

    pub fn zoom_out(&mut self) {
        self.frame_width = (self.frame_width - 2.0).max(MIN_FRAME_WIDTH);
    }

    #[inline]
    fn frame_at(&self, left: f32, x: f32, duration: i32) -> i32 {
        (1 + ((x - left) / self.frame_width).floor() as i32).clamp(1, duration.max(1))
    }

    /// Renders the whole timeline. Selection, visibility toggles, layer
    /// reordering and track gestures are applied to the document directly;
    /// the return value is the index of a layer whose properties dialog
    /// should open.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        doc: &mut Document,
        palette: &TimelinePalette,
        selection_style: SelectionStyle,
        text: &Translation,
    ) -> Option<usize> {
        let mut open_properties: Option<usize> = None;
        let mut pending_toggle: Option<usize> = None;
        let mut pending_move_up: Option<usize> = None;
        let mut pending_move_down: Option<usize> = None;
        let mut pending_delete: Option<usize> = None;

        let layer_count = doc.scene.layer_count();
        let duration = doc.scene.duration;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);

                    // Fixed label column
                    ui.vertical(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);
                        self.corner_cell(ui, palette, text);

                        for i in 0..layer_count {
                            let (id, rect) =
                                ui.allocate_space(egui::vec2(LABEL_WIDTH, ROW_HEIGHT));
                            let resp = ui.interact(rect, id, egui::Sense::click());

                            if resp.double_clicked() {
                                doc.select_layer(i);
                                open_properties = Some(i);
                            } else if resp.clicked() {
                                let in_strip = resp.interact_pointer_pos().map_or(false, |p| {
                                    p.x - rect.left() <= VISIBILITY_STRIP_WIDTH
                                });
                                if in_strip {
                                    pending_toggle = Some(i);
                                } else {
                                    doc.select_layer(i);
                                }
                            }

                            if resp
                                .hover_pos()
                                .map_or(false, |p| p.x - rect.left() <= VISIBILITY_STRIP_WIDTH)
                            {
                                resp.clone().on_hover_text(text.hover_visibility_strip);
                            }

                            resp.context_menu(|ui| {
                                ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
                                if ui.button(text.action_layer_properties).clicked() {
                                    open_properties = Some(i);
                                    ui.close_menu();
                                }
                                if ui.button(text.action_toggle_visible).clicked() {
                                    pending_toggle = Some(i);
                                    ui.close_menu();
                                }
                                ui.separator();
                                if ui
                                    .add_enabled(i > 0, egui::Button::new(text.action_move_up))
                                    .clicked()
                                {
                                    pending_move_up = Some(i);
                                    ui.close_menu();
                                }
                                if ui
                                    .add_enabled(
                                        i + 1 < layer_count,
                                        egui::Button::new(text.action_move_down),
                                    )
                                    .clicked()
                                {
                                    pending_move_down = Some(i);
                                    ui.close_menu();
                                }
                                ui.separator();
                                if ui
                                    .add_enabled(
                                        layer_count > 1,
                                        egui::Button::new(text.action_delete_layer),
                                    )
                                    .clicked()
                                {
                                    pending_delete = Some(i);
                                    ui.close_menu();
                                }
                            });

                            if let Some(layer) = doc.scene.layer(i) {
                                let paint = PaintContext {
                                    painter: ui.painter(),
                                    palette,
                                    selection: selection_style,
                                    frame_width: self.frame_width,
                                };
                                layer.paint_label(
                                    &paint,
                                    rect,
                                    i == doc.selection.current_layer,
                                    resp.hovered(),
                                    self.visibility_mode,
                                );
                            }
                        }
                    });

                    // Scrolling ruler and frame tracks
                    egui::ScrollArea::horizontal()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.vertical(|ui| {
                                ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);
                                let width = (duration.max(1) as f32 * self.frame_width)
                                    .max(ui.available_width());

                                let ruler_rect = self.ruler(ui, doc, palette, width);
                                let mut bottom = ruler_rect.bottom();

                                for i in 0..layer_count {
                                    let (id, rect) =
                                        ui.allocate_space(egui::vec2(width, ROW_HEIGHT));
                                    let resp = ui.interact(
                                        rect,
                                        id,
                                        egui::Sense::click().union(egui::Sense::drag()),
                                    );

                                    let pointer_frame = resp
                                        .interact_pointer_pos()
                                        .map(|p| self.frame_at(rect.left(), p.x, duration));

                                    let mut edit = None;
                                    if let Some(frame) = pointer_frame {
                                        if resp.double_clicked() {
                                            if let Some(layer) = doc.scene.layer_mut(i) {
                                                edit = layer.mouse_double_click(frame);
                                            }
                                            doc.select_layer(i);
                                            doc.select_frame(frame);
                                        } else if resp.drag_started() {
                                            edit = doc.press_track(i, frame);
                                        } else if resp.dragged() {
                                            if let Some(layer) = doc.scene.layer_mut(i) {
                                                edit = layer.mouse_move(frame);
                                            }
                                        } else if resp.drag_stopped() {
                                            if let Some(layer) = doc.scene.layer_mut(i) {
                                                edit = layer.mouse_release(frame);
                                            }
                                        } else if resp.clicked() {
                                            doc.select_layer(i);
                                            doc.select_frame(frame);
                                        }
                                    }
                                    if let Some(edit) = edit {
                                        doc.record_track_edit(i, edit);
                                    }

                                    if let Some(layer) = doc.scene.layer(i) {
                                        let paint = PaintContext {
                                            painter: ui.painter(),
                                            palette,
                                            selection: selection_style,
                                            frame_width: self.frame_width,
                                        };
                                        layer.paint_track(
                                            &paint,
                                            rect,
                                            i == doc.selection.current_layer,
                                        );
                                    }
                                    bottom = rect.bottom();
                                }

                                let x = frame_cell(
                                    ruler_rect,
                                    doc.selection.current_frame,
                                    self.frame_width,
                                )
                                .center()
                                .x;
                                ui.painter().line_segment(
                                    [egui::pos2(x, ruler_rect.top()), egui::pos2(x, bottom)],
                                    egui::Stroke::new(2.0, palette.playhead),
                                );
                            });
                        });
                });
            });

        if let Some(i) = pending_toggle {
            doc.toggle_visible(i);
        }
        if let Some(i) = pending_move_up {
            doc.move_layer_up(i);
        }
        if let Some(i) = pending_move_down {
            doc.move_layer_down(i);
        }
        if let Some(i) = pending_delete {
            doc.delete_layer(i);
        }

        open_properties
    }

    fn corner_cell(&mut self, ui: &mut egui::Ui, palette: &TimelinePalette, text: &Translation) {
        let (_id, rect) = ui.allocate_space(egui::vec2(LABEL_WIDTH, RULER_HEIGHT));
        ui.painter().rect_filled(rect, 0.0, palette.ruler_bg);
        ui.painter()
            .rect_stroke(rect, 0.0, egui::Stroke::new(1.0, palette.label_border));

        let slot = |n: f32| {
            egui::Rect::from_min_size(
                egui::pos2(rect.right() - 22.0 * (n + 1.0), rect.top() + 1.0),
                egui::vec2(20.0, rect.height() - 2.0),
            )
        };

        if ui
            .put(
                slot(0.0),
                egui::Button::new(self.visibility_mode.glyph()).small().frame(false),
            )
            .on_hover_text(text.hover_visibility_mode)
            .clicked()
        {
            self.visibility_mode = self.visibility_mode.cycle();
        }
        if ui
            .put(slot(1.0), egui::Button::new("+").small().frame(false))
            .clicked()
        {
            self.zoom_in();
        }
        if ui
            .put(slot(2.0), egui::Button::new("−").small().frame(false))
            .clicked()
        {
            self.zoom_out();
        }
    }

    fn ruler(
        &self,
        ui: &mut egui::Ui,
        doc: &mut Document,
        palette: &TimelinePalette,
        width: f32,
    ) -> egui::Rect {
        let duration = doc.scene.duration;
        let (id, rect) = ui.allocate_space(egui::vec2(width, RULER_HEIGHT));
        let resp = ui.interact(rect, id, egui::Sense::click().union(egui::Sense::drag()));

        if resp.clicked() || resp.dragged() {
            if let Some(pos) = resp.interact_pointer_pos() {
                doc.select_frame(self.frame_at(rect.left(), pos.x, duration));
            }
        }

        let clip = ui.clip_rect();
        let p = ui.painter();
        p.rect_filled(rect, 0.0, palette.ruler_bg);
        p.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, palette.label_border));

        p.rect_filled(
            frame_cell(rect, doc.selection.current_frame, self.frame_width),
            0.0,
            palette.playhead.gamma_multiply(0.35),
        );

        let label_step = if self.frame_width >= 10.0 {
            5
        } else if self.frame_width >= 6.0 {
            10
        } else {
            20
        };

        // Only the frames inside the visible clip get ticks.
        let first = self.frame_at(rect.left(), clip.left() - self.frame_width, duration);
        let last = self.frame_at(rect.left(), clip.right() + self.frame_width, duration);
        let mut buf = itoa::Buffer::new();
        for frame in first..=last {
            let x = rect.left() + (frame - 1) as f32 * self.frame_width;
            let labelled = frame == 1 || frame % label_step == 0;
            if labelled {
                p.line_segment(
                    [egui::pos2(x, rect.top() + 6.0), egui::pos2(x, rect.bottom())],
                    egui::Stroke::new(1.0, palette.ruler_tick),
                );
                p.text(
                    egui::pos2(x + 2.0, rect.top() + 1.0),
                    egui::Align2::LEFT_TOP,
                    buf.format(frame),
                    egui::FontId::monospace(9.0),
                    palette.ruler_text,
                );
            } else if self.frame_width >= 6.0 {
                p.line_segment(
                    [egui::pos2(x, rect.bottom() - 4.0), egui::pos2(x, rect.bottom())],
                    egui::Stroke::new(1.0, palette.ruler_tick),
                );
            }
        }

        rect
    }
}

use egui::{pos2, vec2, Align2, FontId, Rect, Rounding, Shape, Stroke};

use super::keyframe::KeyframeTrack;
use crate::paint::{frame_cell, indicator_fill, vertical_gradient, PaintContext, VisibilityMode};
use crate::theme::{classic_selection_stops, track_highlight_stops};

/// Width of the left strip of a label that toggles visibility on click.
pub const VISIBILITY_STRIP_WIDTH: f32 = 15.0;

/// What a layer holds: one drawing stack, sound clip list or camera move
/// per track. The kind also decides the integer code used in saved
/// documents, so the discriminants are part of the file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Undefined,
    Bitmap,
    Vector,
    Sound,
    Camera,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Undefined,
        LayerKind::Bitmap,
        LayerKind::Vector,
        LayerKind::Sound,
        LayerKind::Camera,
    ];

    /// Integer code stored in the `type` attribute of a saved layer.
    pub fn code(self) -> i32 {
        match self {
            LayerKind::Undefined => 0,
            LayerKind::Bitmap => 1,
            LayerKind::Vector => 2,
            LayerKind::Sound => 3,
            LayerKind::Camera => 4,
        }
    }

    /// Validates a persisted integer code. Unknown codes return `None`;
    /// callers decide the fallback.
    pub fn from_code(code: i32) -> Option<LayerKind> {
        match code {
            0 => Some(LayerKind::Undefined),
            1 => Some(LayerKind::Bitmap),
            2 => Some(LayerKind::Vector),
            3 => Some(LayerKind::Sound),
            4 => Some(LayerKind::Camera),
            _ => None,
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            LayerKind::Undefined => "Undefined Layer",
            LayerKind::Bitmap => "Bitmap Layer",
            LayerKind::Vector => "Vector Layer",
            LayerKind::Sound => "Sound Layer",
            LayerKind::Camera => "Camera Layer",
        }
    }
}

/// Track mutation produced by a pointer gesture, reported so the caller
/// can record undo and mark the document modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEdit {
    KeyframeAdded { frame: i32 },
    KeyframeMoved { from: i32, to: i32 },
}

/// Pointer behavior on the frame track, implemented per layer kind.
/// Every method defaults to a no-op so a kind only overrides the gestures
/// it responds to.
pub trait LayerInput {
    fn mouse_press(&mut self, _frame: i32) -> Option<TrackEdit> {
        None
    }
    fn mouse_move(&mut self, _frame: i32) -> Option<TrackEdit> {
        None
    }
    fn mouse_release(&mut self, _frame: i32) -> Option<TrackEdit> {
        None
    }
    fn mouse_double_click(&mut self, _frame: i32) -> Option<TrackEdit> {
        None
    }
    /// `(origin, hover)` of a keyframe drag in progress.
    fn drag_preview(&self) -> Option<(i32, i32)> {
        None
    }
}

/// Transient state of a keyframe drag. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyDrag {
    origin: i32,
    hover: i32,
}

fn grab(frames: &KeyframeTrack, drag: &mut Option<KeyDrag>, frame: i32) -> Option<TrackEdit> {
    if frames.has_keyframe(frame) {
        *drag = Some(KeyDrag {
            origin: frame,
            hover: frame,
        });
    }
    None
}

fn drag_to(drag: &mut Option<KeyDrag>, frame: i32) -> Option<TrackEdit> {
    if let Some(d) = drag {
        d.hover = frame.max(1);
    }
    None
}

fn drop_at(
    frames: &mut KeyframeTrack,
    drag: &mut Option<KeyDrag>,
    frame: i32,
) -> Option<TrackEdit> {
    let d = drag.take()?;
    if frames.move_keyframe(d.origin, frame) {
        Some(TrackEdit::KeyframeMoved {
            from: d.origin,
            to: frame,
        })
    } else {
        None
    }
}

fn add_at(frames: &mut KeyframeTrack, frame: i32) -> Option<TrackEdit> {
    if frames.add_keyframe(frame) {
        Some(TrackEdit::KeyframeAdded { frame })
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UndefinedLayer {
    frames: KeyframeTrack,
}

/// Placeholder content keeps all the no-op defaults.
impl LayerInput for UndefinedLayer {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BitmapLayer {
    frames: KeyframeTrack,
    drag: Option<KeyDrag>,
}

impl LayerInput for BitmapLayer {
    fn mouse_press(&mut self, frame: i32) -> Option<TrackEdit> {
        grab(&self.frames, &mut self.drag, frame)
    }
    fn mouse_move(&mut self, frame: i32) -> Option<TrackEdit> {
        drag_to(&mut self.drag, frame)
    }
    fn mouse_release(&mut self, frame: i32) -> Option<TrackEdit> {
        drop_at(&mut self.frames, &mut self.drag, frame)
    }
    fn mouse_double_click(&mut self, frame: i32) -> Option<TrackEdit> {
        add_at(&mut self.frames, frame)
    }
    fn drag_preview(&self) -> Option<(i32, i32)> {
        self.drag.map(|d| (d.origin, d.hover))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorLayer {
    frames: KeyframeTrack,
    drag: Option<KeyDrag>,
}

impl LayerInput for VectorLayer {
    fn mouse_press(&mut self, frame: i32) -> Option<TrackEdit> {
        grab(&self.frames, &mut self.drag, frame)
    }
    fn mouse_move(&mut self, frame: i32) -> Option<TrackEdit> {
        drag_to(&mut self.drag, frame)
    }
    fn mouse_release(&mut self, frame: i32) -> Option<TrackEdit> {
        drop_at(&mut self.frames, &mut self.drag, frame)
    }
    fn mouse_double_click(&mut self, frame: i32) -> Option<TrackEdit> {
        add_at(&mut self.frames, frame)
    }
    fn drag_preview(&self) -> Option<(i32, i32)> {
        self.drag.map(|d| (d.origin, d.hover))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoundLayer {
    frames: KeyframeTrack,
    drag: Option<KeyDrag>,
}

/// Clip starts can be dragged, but a double click cannot conjure a sound
/// out of nothing, so it keeps the no-op default.
impl LayerInput for SoundLayer {
    fn mouse_press(&mut self, frame: i32) -> Option<TrackEdit> {
        grab(&self.frames, &mut self.drag, frame)
    }
    fn mouse_move(&mut self, frame: i32) -> Option<TrackEdit> {
        drag_to(&mut self.drag, frame)
    }
    fn mouse_release(&mut self, frame: i32) -> Option<TrackEdit> {
        drop_at(&mut self.frames, &mut self.drag, frame)
    }
    fn drag_preview(&self) -> Option<(i32, i32)> {
        self.drag.map(|d| (d.origin, d.hover))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraLayer {
    frames: KeyframeTrack,
    drag: Option<KeyDrag>,
    view_width: i32,
    view_height: i32,
}

impl Default for CameraLayer {
    fn default() -> Self {
        Self {
            frames: KeyframeTrack::new(),
            drag: None,
            view_width: 640,
            view_height: 480,
        }
    }
}

impl LayerInput for CameraLayer {
    fn mouse_press(&mut self, frame: i32) -> Option<TrackEdit> {
        grab(&self.frames, &mut self.drag, frame)
    }
    fn mouse_move(&mut self, frame: i32) -> Option<TrackEdit> {
        drag_to(&mut self.drag, frame)
    }
    fn mouse_release(&mut self, frame: i32) -> Option<TrackEdit> {
        drop_at(&mut self.frames, &mut self.drag, frame)
    }
    fn mouse_double_click(&mut self, frame: i32) -> Option<TrackEdit> {
        add_at(&mut self.frames, frame)
    }
    fn drag_preview(&self) -> Option<(i32, i32)> {
        self.drag.map(|d| (d.origin, d.hover))
    }
}

/// Kind-specific payload, fixed when the layer is constructed. There is no
/// way to swap the variant afterwards, which is what keeps a layer's kind
/// immutable.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    Undefined(UndefinedLayer),
    Bitmap(BitmapLayer),
    Vector(VectorLayer),
    Sound(SoundLayer),
    Camera(CameraLayer),
}

impl LayerContent {
    fn new(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Undefined => LayerContent::Undefined(UndefinedLayer::default()),
            LayerKind::Bitmap => LayerContent::Bitmap(BitmapLayer::default()),
            LayerKind::Vector => LayerContent::Vector(VectorLayer::default()),
            LayerKind::Sound => LayerContent::Sound(SoundLayer::default()),
            LayerKind::Camera => LayerContent::Camera(CameraLayer::default()),
        }
    }
}

/// One track of an animation scene.
///
/// Owned by its [`Scene`](super::Scene) for its whole lifetime; the id is
/// assigned by the scene at creation and stays stable until removal. It is
/// not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: u32,
    pub name: String,
    pub visible: bool,
    content: LayerContent,
}

impl Layer {
    pub fn new(id: u32, kind: LayerKind) -> Self {
        Self {
            id,
            name: kind.default_name().to_string(),
            visible: true,
            content: LayerContent::new(kind),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> LayerKind {
        match self.content {
            LayerContent::Undefined(_) => LayerKind::Undefined,
            LayerContent::Bitmap(_) => LayerKind::Bitmap,
            LayerContent::Vector(_) => LayerKind::Vector,
            LayerContent::Sound(_) => LayerKind::Sound,
            LayerContent::Camera(_) => LayerKind::Camera,
        }
    }

    /// Applies a rename from the properties dialog. Empty or all-whitespace
    /// input leaves the name unchanged, matching the dialog's cancel path.
    pub fn rename(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.name = name.to_owned();
        true
    }

    pub fn keyframes(&self) -> &KeyframeTrack {
        match &self.content {
            LayerContent::Undefined(c) => &c.frames,
            LayerContent::Bitmap(c) => &c.frames,
            LayerContent::Vector(c) => &c.frames,
            LayerContent::Sound(c) => &c.frames,
            LayerContent::Camera(c) => &c.frames,
        }
    }

    pub fn keyframes_mut(&mut self) -> &mut KeyframeTrack {
        match &mut self.content {
            LayerContent::Undefined(c) => &mut c.frames,
            LayerContent::Bitmap(c) => &mut c.frames,
            LayerContent::Vector(c) => &mut c.frames,
            LayerContent::Sound(c) => &mut c.frames,
            LayerContent::Camera(c) => &mut c.frames,
        }
    }

    /// First keyframe on the track, probing forward from the lowest
    /// possible position.
    pub fn first_keyframe_position(&self) -> Option<i32> {
        self.keyframes().next_keyframe_position(i32::MIN)
    }

    /// Last keyframe on the track, probing backward from the highest
    /// possible position.
    pub fn last_keyframe_position(&self) -> Option<i32> {
        self.keyframes().previous_keyframe_position(i32::MAX)
    }

    /// Camera view size, for camera layers only.
    pub fn camera_view(&self) -> Option<(i32, i32)> {
        match &self.content {
            LayerContent::Camera(c) => Some((c.view_width, c.view_height)),
            _ => None,
        }
    }

    pub fn set_camera_view(&mut self, width: i32, height: i32) {
        if let LayerContent::Camera(c) = &mut self.content {
            c.view_width = width.max(1);
            c.view_height = height.max(1);
        }
    }

    fn input(&self) -> &dyn LayerInput {
        match &self.content {
            LayerContent::Undefined(c) => c,
            LayerContent::Bitmap(c) => c,
            LayerContent::Vector(c) => c,
            LayerContent::Sound(c) => c,
            LayerContent::Camera(c) => c,
        }
    }

    fn input_mut(&mut self) -> &mut dyn LayerInput {
        match &mut self.content {
            LayerContent::Undefined(c) => c,
            LayerContent::Bitmap(c) => c,
            LayerContent::Vector(c) => c,
            LayerContent::Sound(c) => c,
            LayerContent::Camera(c) => c,
        }
    }

    pub fn mouse_press(&mut self, frame: i32) -> Option<TrackEdit> {
        self.input_mut().mouse_press(frame)
    }

    pub fn mouse_move(&mut self, frame: i32) -> Option<TrackEdit> {
        self.input_mut().mouse_move(frame)
    }

    pub fn mouse_release(&mut self, frame: i32) -> Option<TrackEdit> {
        self.input_mut().mouse_release(frame)
    }

    pub fn mouse_double_click(&mut self, frame: i32) -> Option<TrackEdit> {
        self.input_mut().mouse_double_click(frame)
    }

    pub fn drag_preview(&self) -> Option<(i32, i32)> {
        self.input().drag_preview()
    }

    /// Draws the layer's row in the frame track area: background, keyframe
    /// marks and, when selected, the row highlight gradient.
    pub fn paint_track(&self, ctx: &PaintContext<'_>, rect: Rect, selected: bool) {
        let p = ctx.painter;
        p.rect_filled(rect, 0.0, ctx.palette.track_bg);
        p.rect_stroke(rect, 0.0, Stroke::new(1.0, ctx.palette.track_border));

        let drag = self.drag_preview();
        for frame in self.keyframes().positions() {
            // A grabbed mark travels with the pointer instead.
            if drag.map_or(false, |(origin, _)| origin == frame) {
                continue;
            }
            self.paint_mark(ctx, rect, frame, false);
        }
        if let Some((_, hover)) = drag {
            self.paint_mark(ctx, rect, hover, true);
        }

        if selected {
            vertical_gradient(p, rect, &track_highlight_stops());
        }
    }

    fn paint_mark(&self, ctx: &PaintContext<'_>, rect: Rect, frame: i32, preview: bool) {
        let p = ctx.painter;
        let cell = frame_cell(rect, frame, ctx.frame_width);
        match self.kind() {
            LayerKind::Sound => {
                let radius = (ctx.frame_width * 0.5 - 1.0).min(rect.height() * 0.5 - 3.0);
                if preview {
                    p.circle_stroke(
                        cell.center(),
                        radius,
                        Stroke::new(1.0, ctx.palette.keyframe_mark),
                    );
                } else {
                    p.circle_filled(cell.center(), radius, ctx.palette.keyframe_mark);
                }
            }
            _ => {
                let mark = cell.shrink2(vec2(1.0, 2.0));
                if preview {
                    p.rect_stroke(
                        mark,
                        Rounding::same(2.0),
                        Stroke::new(1.0, ctx.palette.keyframe_mark),
                    );
                } else {
                    p.rect_filled(mark, Rounding::same(2.0), ctx.palette.keyframe_mark);
                }
            }
        }
    }

    /// Draws the layer's label cell: background, selection overlay,
    /// visibility indicator, kind icon and name.
    pub fn paint_label(
        &self,
        ctx: &PaintContext<'_>,
        rect: Rect,
        selected: bool,
        hovered: bool,
        mode: VisibilityMode,
    ) {
        let p = ctx.painter;
        let bg = if hovered {
            ctx.palette.label_bg_hover
        } else {
            ctx.palette.label_bg
        };
        p.rect_filled(rect, 0.0, bg);
        p.rect_stroke(rect, 0.0, Stroke::new(1.0, ctx.palette.label_border));

        if selected {
            self.paint_selection(ctx, rect);
        }

        let center = pos2(rect.left() + 10.5, rect.center().y);
        p.circle_stroke(center, 4.5, Stroke::new(1.0, ctx.palette.indicator_outline));
        if let Some(fill) = indicator_fill(ctx.palette, self.visible, mode, selected) {
            p.circle_filled(center, 3.5, fill);
        }

        let icon = Rect::from_min_size(
            pos2(rect.left() + 20.0, rect.top() + 2.0),
            vec2(rect.height() - 4.0, rect.height() - 4.0),
        );
        self.paint_kind_icon(ctx, icon);

        p.text(
            pos2(rect.left() + 45.0, rect.center().y),
            Align2::LEFT_CENTER,
            &self.name,
            FontId::proportional((rect.height() * 0.5).round()),
            ctx.palette.label_text,
        );
    }

    /// Gradient overlay for the selected row. The stops follow the
    /// selection style resolved into the paint context.
    pub fn paint_selection(&self, ctx: &PaintContext<'_>, rect: Rect) {
        match ctx.selection {
            crate::theme::SelectionStyle::Aqua => {
                vertical_gradient(ctx.painter, rect, &crate::theme::aqua_selection_stops());
            }
            crate::theme::SelectionStyle::Classic => {
                vertical_gradient(ctx.painter, rect, &classic_selection_stops());
            }
        }
    }

    fn paint_kind_icon(&self, ctx: &PaintContext<'_>, rect: Rect) {
        let p = ctx.painter;
        let accent = ctx.palette.kind_accent(self.kind());
        let stroke = Stroke::new(1.2, accent);
        match self.kind() {
            LayerKind::Undefined => {}
            LayerKind::Bitmap => {
                // Tiny picture: frame, sun, mountain.
                p.rect_stroke(rect, Rounding::same(2.0), stroke);
                p.circle_filled(
                    pos2(
                        rect.left() + rect.width() * 0.68,
                        rect.top() + rect.height() * 0.30,
                    ),
                    1.6,
                    accent,
                );
                p.add(Shape::convex_polygon(
                    vec![
                        pos2(rect.left() + 2.0, rect.bottom() - 2.5),
                        pos2(rect.center().x - 1.0, rect.top() + rect.height() * 0.45),
                        pos2(rect.right() - 3.0, rect.bottom() - 2.5),
                    ],
                    accent,
                    Stroke::NONE,
                ));
            }
            LayerKind::Vector => {
                // Pen stroke with its two anchors.
                let a = pos2(rect.left() + 1.5, rect.bottom() - 2.5);
                let b = pos2(rect.right() - 1.5, rect.top() + 2.5);
                p.add(Shape::CubicBezier(
                    egui::epaint::CubicBezierShape::from_points_stroke(
                        [
                            a,
                            pos2(rect.left() + rect.width() * 0.7, rect.bottom() - 3.0),
                            pos2(rect.left() + rect.width() * 0.3, rect.top() + 3.0),
                            b,
                        ],
                        false,
                        egui::Color32::TRANSPARENT,
                        Stroke::new(1.4, accent),
                    ),
                ));
                p.circle_filled(a, 1.5, accent);
                p.circle_filled(b, 1.5, accent);
            }
            LayerKind::Sound => {
                // Level bars.
                let w = rect.width() / 5.0;
                for (i, h) in [0.45, 0.8, 0.6].iter().enumerate() {
                    let x = rect.left() + w * (1.0 + 1.5 * i as f32);
                    let bar = Rect::from_min_max(
                        pos2(x, rect.bottom() - rect.height() * h),
                        pos2(x + w * 0.8, rect.bottom() - 1.0),
                    );
                    p.rect_filled(bar, Rounding::same(1.0), accent);
                }
            }
            LayerKind::Camera => {
                let body = Rect::from_min_max(
                    pos2(rect.left() + 1.0, rect.top() + rect.height() * 0.3),
                    pos2(rect.right() - 1.0, rect.bottom() - 1.5),
                );
                p.rect_filled(body, Rounding::same(2.0), accent);
                p.rect_filled(
                    Rect::from_min_size(
                        pos2(rect.left() + rect.width() * 0.3, rect.top() + 1.0),
                        vec2(rect.width() * 0.35, rect.height() * 0.3),
                    ),
                    Rounding::same(1.0),
                    accent,
                );
                p.circle_stroke(
                    body.center(),
                    body.height() * 0.32,
                    Stroke::new(1.2, ctx.palette.label_bg),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in LayerKind::ALL {
            assert_eq!(LayerKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(LayerKind::from_code(5), None);
        assert_eq!(LayerKind::from_code(-1), None);
        assert_eq!(LayerKind::from_code(129), None);
    }

    #[test]
    fn test_construction_defaults() {
        let layer = Layer::new(7, LayerKind::Bitmap);
        assert_eq!(layer.id(), 7);
        assert_eq!(layer.kind(), LayerKind::Bitmap);
        assert_eq!(layer.name, "Bitmap Layer");
        assert!(layer.visible);
        assert!(layer.keyframes().is_empty());

        let camera = Layer::new(8, LayerKind::Camera);
        assert_eq!(camera.camera_view(), Some((640, 480)));
        assert_eq!(layer.camera_view(), None);
    }

    #[test]
    fn test_rename_rejects_empty_input() {
        let mut layer = Layer::new(1, LayerKind::Vector);
        assert!(layer.rename("Flowers"));
        assert_eq!(layer.name, "Flowers");

        assert!(!layer.rename(""));
        assert!(!layer.rename("   \t"));
        assert_eq!(layer.name, "Flowers");
    }

    #[test]
    fn test_first_last_delegate_to_track_queries() {
        let mut layer = Layer::new(1, LayerKind::Bitmap);
        assert_eq!(layer.first_keyframe_position(), None);
        assert_eq!(layer.last_keyframe_position(), None);

        layer.keyframes_mut().add_keyframe(9);
        layer.keyframes_mut().add_keyframe(4);
        assert_eq!(layer.first_keyframe_position(), Some(4));
        assert_eq!(layer.last_keyframe_position(), Some(9));
        assert_eq!(
            layer.first_keyframe_position(),
            layer.keyframes().next_keyframe_position(i32::MIN)
        );
        assert_eq!(
            layer.last_keyframe_position(),
            layer.keyframes().previous_keyframe_position(i32::MAX)
        );
    }

    #[test]
    fn test_bitmap_drag_moves_keyframe() {
        let mut layer = Layer::new(1, LayerKind::Bitmap);
        assert_eq!(
            layer.mouse_double_click(5),
            Some(TrackEdit::KeyframeAdded { frame: 5 })
        );

        assert_eq!(layer.mouse_press(5), None);
        assert_eq!(layer.drag_preview(), Some((5, 5)));
        assert_eq!(layer.mouse_move(9), None);
        assert_eq!(layer.drag_preview(), Some((5, 9)));
        assert_eq!(
            layer.mouse_release(9),
            Some(TrackEdit::KeyframeMoved { from: 5, to: 9 })
        );
        assert_eq!(layer.drag_preview(), None);
        assert!(layer.keyframes().has_keyframe(9));
        assert!(!layer.keyframes().has_keyframe(5));
    }

    #[test]
    fn test_drop_on_occupied_frame_is_refused() {
        let mut layer = Layer::new(1, LayerKind::Vector);
        layer.mouse_double_click(5);
        layer.mouse_double_click(9);

        layer.mouse_press(5);
        layer.mouse_move(9);
        assert_eq!(layer.mouse_release(9), None);
        assert_eq!(layer.drag_preview(), None);
        assert!(layer.keyframes().has_keyframe(5));
        assert!(layer.keyframes().has_keyframe(9));
    }

    #[test]
    fn test_press_on_empty_frame_grabs_nothing() {
        let mut layer = Layer::new(1, LayerKind::Bitmap);
        layer.mouse_double_click(5);

        assert_eq!(layer.mouse_press(7), None);
        assert_eq!(layer.drag_preview(), None);
        assert_eq!(layer.mouse_release(9), None);
        assert!(layer.keyframes().has_keyframe(5));
    }

    #[test]
    fn test_sound_ignores_double_click_but_drags() {
        let mut layer = Layer::new(1, LayerKind::Sound);
        assert_eq!(layer.mouse_double_click(3), None);
        assert!(layer.keyframes().is_empty());

        layer.keyframes_mut().add_keyframe(3);
        layer.mouse_press(3);
        assert_eq!(
            layer.mouse_release(12),
            Some(TrackEdit::KeyframeMoved { from: 3, to: 12 })
        );
    }

    #[test]
    fn test_undefined_layer_ignores_all_input() {
        let mut layer = Layer::new(1, LayerKind::Undefined);
        layer.keyframes_mut().add_keyframe(2);

        assert_eq!(layer.mouse_press(2), None);
        assert_eq!(layer.drag_preview(), None);
        assert_eq!(layer.mouse_move(6), None);
        assert_eq!(layer.mouse_release(6), None);
        assert_eq!(layer.mouse_double_click(6), None);
        assert!(layer.keyframes().has_keyframe(2));
        assert_eq!(layer.keyframes().keyframe_count(), 1);
    }
}

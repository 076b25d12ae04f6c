use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::models::LayerKind;

/// One gradient stop: relative position in `0..=1` plus color.
pub type GradientStop = (f32, Color32);

/// Flavor of the selected-row overlay, a persisted user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SelectionStyle {
    #[default]
    Classic,
    Aqua,
}

impl SelectionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStyle::Classic => "classic",
            SelectionStyle::Aqua => "aqua",
        }
    }

    /// `"aqua"` selects the glossy overlay; any other value is classic.
    pub fn from_str(s: &str) -> Self {
        match s {
            "aqua" => SelectionStyle::Aqua,
            _ => SelectionStyle::Classic,
        }
    }
}

// Persisted through the string codec so unknown values fall back instead
// of failing the whole settings load.
impl From<String> for SelectionStyle {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<SelectionStyle> for String {
    fn from(style: SelectionStyle) -> Self {
        style.as_str().to_string()
    }
}

/// Every color the timeline painting needs, resolved once per frame and
/// handed to the paint routines. Paint code never reads settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePalette {
    pub track_bg: Color32,
    pub track_border: Color32,

    pub label_bg: Color32,
    pub label_bg_hover: Color32,
    pub label_border: Color32,
    pub label_text: Color32,

    pub indicator_outline: Color32,
    pub indicator_dim: Color32,
    pub indicator_solid: Color32,

    pub keyframe_mark: Color32,

    pub ruler_bg: Color32,
    pub ruler_text: Color32,
    pub ruler_tick: Color32,
    pub playhead: Color32,

    pub accent_bitmap: Color32,
    pub accent_vector: Color32,
    pub accent_sound: Color32,
    pub accent_camera: Color32,
}

impl TimelinePalette {
    pub fn light() -> Self {
        Self {
            track_bg: Color32::from_gray(192),
            track_border: Color32::from_rgb(100, 100, 100),

            label_bg: Color32::from_gray(192),
            label_bg_hover: Color32::from_gray(205),
            label_border: Color32::from_rgb(100, 100, 100),
            label_text: Color32::BLACK,

            indicator_outline: Color32::BLACK,
            indicator_dim: Color32::from_gray(128),
            indicator_solid: Color32::BLACK,

            keyframe_mark: Color32::from_gray(90),

            ruler_bg: Color32::from_gray(220),
            ruler_text: Color32::from_gray(60),
            ruler_tick: Color32::from_gray(140),
            playhead: Color32::from_rgb(200, 50, 50),

            accent_bitmap: Color32::from_rgb(70, 110, 180),
            accent_vector: Color32::from_rgb(220, 130, 30),
            accent_sound: Color32::from_rgb(60, 150, 90),
            accent_camera: Color32::from_rgb(145, 90, 200),
        }
    }

    pub fn dark() -> Self {
        Self {
            track_bg: Color32::from_gray(52),
            track_border: Color32::from_gray(25),

            label_bg: Color32::from_gray(58),
            label_bg_hover: Color32::from_gray(70),
            label_border: Color32::from_gray(25),
            label_text: Color32::from_gray(220),

            indicator_outline: Color32::from_gray(200),
            indicator_dim: Color32::from_gray(130),
            indicator_solid: Color32::from_gray(235),

            keyframe_mark: Color32::from_gray(170),

            ruler_bg: Color32::from_gray(38),
            ruler_text: Color32::from_gray(170),
            ruler_tick: Color32::from_gray(95),
            playhead: Color32::from_rgb(235, 85, 85),

            accent_bitmap: Color32::from_rgb(110, 155, 225),
            accent_vector: Color32::from_rgb(240, 160, 60),
            accent_sound: Color32::from_rgb(95, 190, 125),
            accent_camera: Color32::from_rgb(180, 130, 235),
        }
    }

    pub fn kind_accent(&self, kind: LayerKind) -> Color32 {
        match kind {
            LayerKind::Undefined => self.label_text,
            LayerKind::Bitmap => self.accent_bitmap,
            LayerKind::Vector => self.accent_vector,
            LayerKind::Sound => self.accent_sound,
            LayerKind::Camera => self.accent_camera,
        }
    }
}

/// Highlight laid over a selected frame track.
pub fn track_highlight_stops() -> [GradientStop; 4] {
    [
        (0.0, Color32::from_rgba_unmultiplied(255, 255, 255, 128)),
        (0.40, Color32::from_rgba_unmultiplied(255, 255, 255, 0)),
        (0.60, Color32::from_rgba_unmultiplied(0, 0, 0, 0)),
        (1.0, Color32::from_rgba_unmultiplied(0, 0, 0, 64)),
    ]
}

/// Selected-label overlay, classic flavor.
pub fn classic_selection_stops() -> [GradientStop; 4] {
    [
        (0.0, Color32::from_rgba_unmultiplied(255, 255, 255, 128)),
        (0.49, Color32::from_rgba_unmultiplied(255, 255, 255, 0)),
        (0.50, Color32::from_rgba_unmultiplied(0, 0, 0, 0)),
        (1.0, Color32::from_rgba_unmultiplied(0, 0, 0, 48)),
    ]
}

/// Selected-label overlay, aqua flavor: glossy top half with a hard edge
/// at 35% and a warm sheen toward the bottom.
pub fn aqua_selection_stops() -> [GradientStop; 7] {
    [
        (0.0, Color32::from_rgba_unmultiplied(225, 225, 255, 100)),
        (0.10, Color32::from_rgba_unmultiplied(225, 225, 255, 80)),
        (0.20, Color32::from_rgba_unmultiplied(225, 225, 255, 64)),
        (0.35, Color32::from_rgba_unmultiplied(225, 225, 255, 20)),
        (0.351, Color32::from_rgba_unmultiplied(0, 0, 0, 32)),
        (0.66, Color32::from_rgba_unmultiplied(245, 255, 235, 32)),
        (1.0, Color32::from_rgba_unmultiplied(245, 255, 235, 128)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_style_codec() {
        assert_eq!(SelectionStyle::from_str("aqua"), SelectionStyle::Aqua);
        assert_eq!(SelectionStyle::from_str("classic"), SelectionStyle::Classic);
        // The comparison is exact; unknown values fall back to classic.
        assert_eq!(SelectionStyle::from_str("AQUA"), SelectionStyle::Classic);
        assert_eq!(SelectionStyle::from_str(""), SelectionStyle::Classic);
        for style in [SelectionStyle::Classic, SelectionStyle::Aqua] {
            assert_eq!(SelectionStyle::from_str(style.as_str()), style);
        }
    }

    #[test]
    fn test_gradient_stops_span_full_height() {
        fn check(stops: &[GradientStop]) {
            assert_eq!(stops[0].0, 0.0);
            assert_eq!(stops[stops.len() - 1].0, 1.0);
            for pair in stops.windows(2) {
                assert!(pair[0].0 < pair[1].0, "stops must ascend");
            }
        }
        check(&track_highlight_stops());
        check(&classic_selection_stops());
        check(&aqua_selection_stops());
    }

    #[test]
    fn test_kind_accents_are_distinct() {
        let palette = TimelinePalette::light();
        let accents = [
            palette.accent_bitmap,
            palette.accent_vector,
            palette.accent_sound,
            palette.accent_camera,
        ];
        for (i, a) in accents.iter().enumerate() {
            for b in &accents[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

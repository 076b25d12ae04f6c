pub mod formats;
pub mod i18n;
pub mod models;
pub mod paint;
pub mod theme;

/// Shared constants for resource limits
pub mod limits {
    /// Maximum number of layers allowed in a scene
    pub const MAX_LAYERS: usize = 1000;
    /// Maximum number of frames allowed in a scene
    pub const MAX_FRAMES: usize = 100_000;
}

// Re-export commonly used types
pub use formats::{parse_scene_file, scene_from_xml, scene_to_xml, write_scene_file};
pub use models::{KeyframeTrack, Layer, LayerKind, Scene, TrackEdit};
pub use paint::{PaintContext, VisibilityMode};
pub use theme::{SelectionStyle, TimelinePalette};

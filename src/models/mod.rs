pub mod keyframe;
pub mod layer;
pub mod scene;

pub use keyframe::KeyframeTrack;
pub use layer::{Layer, LayerInput, LayerKind, TrackEdit};
pub use scene::{ModelError, Scene};

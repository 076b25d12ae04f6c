//! UI module - contains UI rendering components

pub mod about;
pub mod properties;
pub mod timeline;

pub use about::AboutDialog;
pub use properties::PropertiesDialog;
pub use timeline::Timeline;

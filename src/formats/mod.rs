pub mod xml;

pub use xml::{parse_scene_file, scene_from_xml, scene_to_xml, write_scene_file};

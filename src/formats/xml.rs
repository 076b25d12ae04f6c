use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::Write;

use crate::models::{Layer, LayerKind, Scene};

/// Scene document format:
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <scene name="walk cycle" fps="24" duration="96">
///   <layer name="Rough" visibility="1" type="1">
///     <keyframe frame="1"/>
///   </layer>
/// </scene>
/// ```
///
/// A layer's `type` attribute carries the integer kind code; `visibility`
/// is "1" or "0". Camera layers add `view-width`/`view-height`. Unknown
/// elements and attributes are ignored so newer documents stay readable.
pub fn parse_scene_file(path: &str) -> Result<Scene> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Unable to open: {}", path))?;
    scene_from_xml(&text).with_context(|| format!("Unable to parse: {}", path))
}

pub fn write_scene_file(scene: &Scene, path: &str) -> Result<()> {
    let xml = scene_to_xml(scene)?;
    fs::write(path, xml).with_context(|| format!("Unable to write: {}", path))
}

/// Serializes a scene to XML text.
pub fn scene_to_xml(scene: &Scene) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("scene");
    root.push_attribute(("name", scene.name.as_str()));
    root.push_attribute(("fps", scene.framerate.to_string().as_str()));
    root.push_attribute(("duration", scene.duration.to_string().as_str()));
    writer.write_event(Event::Start(root))?;

    for layer in scene.layers() {
        write_layer(&mut writer, layer)?;
    }

    writer.write_event(Event::End(BytesEnd::new("scene")))?;
    String::from_utf8(writer.into_inner()).context("scene XML is not valid UTF-8")
}

fn write_layer<W: Write>(writer: &mut Writer<W>, layer: &Layer) -> Result<()> {
    log::debug!(
        "layer name={} visibility={} type={}",
        layer.name,
        layer.visible as i32,
        layer.kind().code()
    );

    let mut el = BytesStart::new("layer");
    el.push_attribute(("name", layer.name.as_str()));
    el.push_attribute(("visibility", if layer.visible { "1" } else { "0" }));
    el.push_attribute(("type", layer.kind().code().to_string().as_str()));
    if let Some((w, h)) = layer.camera_view() {
        el.push_attribute(("view-width", w.to_string().as_str()));
        el.push_attribute(("view-height", h.to_string().as_str()));
    }

    if layer.keyframes().is_empty() {
        writer.write_event(Event::Empty(el))?;
        return Ok(());
    }

    writer.write_event(Event::Start(el))?;
    for frame in layer.keyframes().positions() {
        let mut kf = BytesStart::new("keyframe");
        kf.push_attribute(("frame", frame.to_string().as_str()));
        writer.write_event(Event::Empty(kf))?;
    }
    writer.write_event(Event::End(BytesEnd::new("layer")))?;
    Ok(())
}

/// Parses a scene from XML text.
pub fn scene_from_xml(text: &str) -> Result<Scene> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut scene: Option<Scene> = None;
    let mut in_layer: Option<usize> = None;

    loop {
        match reader.read_event().context("malformed XML document")? {
            Event::Start(e) => handle_element(&mut scene, &mut in_layer, &e, false)?,
            Event::Empty(e) => handle_element(&mut scene, &mut in_layer, &e, true)?,
            Event::End(e) => {
                if e.name().as_ref() == b"layer" {
                    in_layer = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    scene.context("document has no scene element")
}

fn handle_element(
    scene: &mut Option<Scene>,
    in_layer: &mut Option<usize>,
    e: &BytesStart,
    self_closing: bool,
) -> Result<()> {
    match e.name().as_ref() {
        b"scene" => {
            if scene.is_some() {
                bail!("document has more than one scene element");
            }
            *scene = Some(scene_from_element(e)?);
        }
        b"layer" => {
            let sc = scene
                .as_mut()
                .context("layer element outside of a scene")?;
            let index = read_layer(sc, e)?;
            if !self_closing {
                *in_layer = Some(index);
            }
        }
        b"keyframe" => {
            let (Some(sc), Some(index)) = (scene.as_mut(), *in_layer) else {
                log::warn!("ignoring keyframe outside of a layer");
                return Ok(());
            };
            if let Some(layer) = sc.layer_mut(index) {
                read_keyframe(layer, e)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn scene_from_element(e: &BytesStart) -> Result<Scene> {
    let name = attr_string(e, b"name")?.unwrap_or_else(|| "scene1".to_string());
    let fps = parse_attr_i32(attr_string(e, b"fps")?, 24, "fps");
    let duration = parse_attr_i32(attr_string(e, b"duration")?, 240, "duration");
    Ok(Scene::new(name, fps.max(1) as u32, duration))
}

/// Reads one layer element into the scene and returns its index. An
/// unknown or malformed `type` code falls back to an undefined layer
/// instead of failing the whole document.
fn read_layer(scene: &mut Scene, e: &BytesStart) -> Result<usize> {
    let kind = match attr_string(e, b"type")? {
        None => {
            log::warn!("layer has no type attribute, loading as undefined");
            LayerKind::Undefined
        }
        Some(s) => match s.parse::<i32>().ok().and_then(LayerKind::from_code) {
            Some(kind) => kind,
            None => {
                log::warn!("unknown layer type code {:?}, loading as undefined", s);
                LayerKind::Undefined
            }
        },
    };

    let index = scene.add_layer(kind).context("cannot add layer")?;
    if let Some(layer) = scene.layer_mut(index) {
        if let Some(name) = attr_string(e, b"name")? {
            layer.name = name;
        }
        layer.visible = attr_string(e, b"visibility")?.as_deref() == Some("1");
        if kind == LayerKind::Camera {
            let w = parse_attr_i32(attr_string(e, b"view-width")?, 640, "view-width");
            let h = parse_attr_i32(attr_string(e, b"view-height")?, 480, "view-height");
            layer.set_camera_view(w, h);
        }
    }
    Ok(index)
}

fn read_keyframe(layer: &mut Layer, e: &BytesStart) -> Result<()> {
    match attr_string(e, b"frame")? {
        Some(s) => match s.parse::<i32>() {
            Ok(frame) => {
                if !layer.keyframes_mut().add_keyframe(frame) {
                    log::warn!("ignoring keyframe at invalid or duplicate frame {}", frame);
                }
            }
            Err(_) => log::warn!("ignoring keyframe with malformed frame attribute {:?}", s),
        },
        None => log::warn!("ignoring keyframe without a frame attribute"),
    }
    Ok(())
}

fn attr_string(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_attr_i32(value: Option<String>, default: i32, what: &str) -> i32 {
    match value {
        None => default,
        Some(s) => match s.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("ignoring malformed {} attribute {:?}", what, s);
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits;
    use pretty_assertions::assert_eq;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new("walk cycle", 12, 96);

        let i = scene.add_layer(LayerKind::Bitmap).unwrap();
        let rough = scene.layer_mut(i).unwrap();
        rough.rename("Rough");
        rough.keyframes_mut().add_keyframe(1);
        rough.keyframes_mut().add_keyframe(7);

        let i = scene.add_layer(LayerKind::Vector).unwrap();
        let ink = scene.layer_mut(i).unwrap();
        ink.rename("Ink & Paint");
        ink.visible = false;

        let i = scene.add_layer(LayerKind::Sound).unwrap();
        scene.layer_mut(i).unwrap().keyframes_mut().add_keyframe(24);

        let i = scene.add_layer(LayerKind::Camera).unwrap();
        scene.layer_mut(i).unwrap().set_camera_view(320, 240);

        scene.add_layer(LayerKind::Undefined).unwrap();
        scene
    }

    fn one_layer_xml(attrs: &str) -> String {
        format!(
            r#"<scene name="s" fps="24" duration="48"><layer {}/></scene>"#,
            attrs
        )
    }

    #[test]
    fn test_round_trip_preserves_every_kind() {
        let scene = sample_scene();
        let xml = scene_to_xml(&scene).unwrap();
        let loaded = scene_from_xml(&xml).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_serialized_layer_attributes() {
        let scene = sample_scene();
        let xml = scene_to_xml(&scene).unwrap();

        assert!(xml.contains(r#"<scene name="walk cycle" fps="12" duration="96">"#));
        assert!(xml.contains(r#"name="Rough" visibility="1" type="1""#));
        assert!(xml.contains(r#"name="Ink &amp; Paint" visibility="0" type="2""#));
        assert!(xml.contains(r#"type="3""#));
        assert!(xml.contains(r#"type="4" view-width="320" view-height="240""#));
        assert!(xml.contains(r#"type="0""#));
        assert!(xml.contains(r#"<keyframe frame="1"/>"#));
        assert!(xml.contains(r#"<keyframe frame="24"/>"#));
    }

    #[test]
    fn test_visibility_attribute_mapping() {
        let visible = |attrs: &str| {
            scene_from_xml(&one_layer_xml(attrs))
                .unwrap()
                .layer(0)
                .unwrap()
                .visible
        };
        assert!(visible(r#"name="a" visibility="1" type="1""#));
        assert!(!visible(r#"name="a" visibility="0" type="1""#));
        assert!(!visible(r#"name="a" visibility="true" type="1""#));
        assert!(!visible(r#"name="a" visibility="yes" type="1""#));
        assert!(!visible(r#"name="a" type="1""#));
    }

    #[test]
    fn test_unknown_type_code_defaults_to_undefined() {
        for attrs in [
            r#"name="a" visibility="1" type="9""#,
            r#"name="a" visibility="1" type="-3""#,
            r#"name="a" visibility="1" type="banana""#,
            r#"name="a" visibility="1""#,
        ] {
            let scene = scene_from_xml(&one_layer_xml(attrs)).unwrap();
            let layer = scene.layer(0).unwrap();
            assert_eq!(layer.kind(), LayerKind::Undefined);
            assert_eq!(layer.name, "a", "other attributes still load");
        }
    }

    #[test]
    fn test_missing_attributes_fall_back_to_defaults() {
        let scene = scene_from_xml("<scene><layer/></scene>").unwrap();
        assert_eq!(scene.name, "scene1");
        assert_eq!(scene.framerate, 24);
        assert_eq!(scene.duration, 240);

        let layer = scene.layer(0).unwrap();
        assert_eq!(layer.name, "Undefined Layer");
        assert_eq!(layer.kind(), LayerKind::Undefined);
        assert!(!layer.visible);
    }

    #[test]
    fn test_bad_keyframes_are_skipped() {
        let xml = r#"<scene name="s" fps="24" duration="48">
            <layer name="a" visibility="1" type="1">
                <keyframe frame="2"/>
                <keyframe frame="2"/>
                <keyframe frame="0"/>
                <keyframe frame="x"/>
                <keyframe/>
            </layer>
        </scene>"#;
        let scene = scene_from_xml(xml).unwrap();
        let track = scene.layer(0).unwrap().keyframes();
        assert_eq!(track.keyframe_count(), 1);
        assert!(track.has_keyframe(2));
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let xml = r#"<scene name="s" fps="24" duration="48">
            <metadata><author>nobody</author></metadata>
            <layer name="a" visibility="1" type="2"/>
        </scene>"#;
        let scene = scene_from_xml(xml).unwrap();
        assert_eq!(scene.layer_count(), 1);
        assert_eq!(scene.layer(0).unwrap().kind(), LayerKind::Vector);
    }

    #[test]
    fn test_malformed_documents_error() {
        assert!(scene_from_xml("").is_err());
        assert!(scene_from_xml("<scene").is_err());
        assert!(scene_from_xml("<layer/>").is_err());
        assert!(scene_from_xml("<scene/><scene/>").is_err());
        assert!(scene_from_xml("<animation></animation>").is_err());
    }

    #[test]
    fn test_layer_limit_is_enforced() {
        let body = r#"<layer name="a" visibility="1" type="1"/>"#
            .repeat(limits::MAX_LAYERS + 1);
        let xml = format!(r#"<scene name="s" fps="24" duration="48">{}</scene>"#, body);
        assert!(scene_from_xml(&xml).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let scene = sample_scene();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.dsx");
        let path = path.to_str().unwrap();

        write_scene_file(&scene, path).unwrap();
        let loaded = parse_scene_file(path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_parse_missing_file_reports_path() {
        let err = parse_scene_file("/nonexistent/nowhere.dsx").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/nowhere.dsx"));
    }
}

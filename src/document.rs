//! Document module - handles scene state, selection and undo history

use std::collections::VecDeque;

use dopesheet::models::TrackEdit;
use dopesheet::{Layer, LayerKind, Scene};

// Undo stack limit
pub const MAX_UNDO_ACTIONS: usize = 100;

/// Reversible edits, pushed as they happen and popped by Ctrl+Z.
#[derive(Clone)]
pub enum UndoAction {
    RenameLayer { index: usize, old_name: String },
    SetVisible { index: usize, old_visible: bool },
    AddLayer { index: usize },
    RemoveLayer { index: usize, layer: Layer },
    SwapLayers { a: usize, b: usize },
    AddKeyframe { layer: usize, frame: i32 },
    MoveKeyframe { layer: usize, from: i32, to: i32 },
}

/// Current layer and playhead frame. Frames are 1-based.
pub struct SelectionState {
    pub current_layer: usize,
    pub current_frame: i32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            current_layer: 0,
            current_frame: 1,
        }
    }
}

pub struct Document {
    pub scene: Scene,
    pub file_path: Option<Box<str>>,
    pub is_modified: bool,
    pub selection: SelectionState,
    pub undo_stack: VecDeque<UndoAction>,
}

impl Document {
    pub fn new(scene: Scene, file_path: Option<String>) -> Self {
        Self {
            scene,
            file_path: file_path.map(|s| s.into_boxed_str()),
            is_modified: false,
            selection: SelectionState::default(),
            undo_stack: VecDeque::with_capacity(MAX_UNDO_ACTIONS),
        }
    }

    pub fn title(&self) -> String {
        let base = if let Some(path) = &self.file_path {
            format!("{} - {}", self.scene.name, path)
        } else {
            self.scene.name.clone()
        };

        if self.is_modified {
            format!("{}*", base)
        } else {
            base
        }
    }

    pub fn save(&mut self) -> Result<(), String> {
        if let Some(path) = &self.file_path {
            match dopesheet::write_scene_file(&self.scene, path) {
                Ok(_) => {
                    self.is_modified = false;
                    Ok(())
                }
                Err(e) => Err(format!("Failed to save: {}", e)),
            }
        } else {
            Err("No file path".to_string())
        }
    }

    pub fn save_as(&mut self, path: String) -> Result<(), String> {
        match dopesheet::write_scene_file(&self.scene, &path) {
            Ok(_) => {
                self.file_path = Some(path.into_boxed_str());
                self.is_modified = false;
                Ok(())
            }
            Err(e) => Err(format!("Failed to save: {}", e)),
        }
    }

    pub fn current_layer(&self) -> Option<&Layer> {
        self.scene.layer(self.selection.current_layer)
    }

    pub fn select_layer(&mut self, index: usize) {
        if index < self.scene.layer_count() {
            self.selection.current_layer = index;
        }
    }

    pub fn select_frame(&mut self, frame: i32) {
        self.selection.current_frame = frame.clamp(1, self.scene.duration.max(1));
    }

    /// Re-aims the selection after a structural change so it never points
    /// past the last layer.
    fn clamp_selection(&mut self) {
        let count = self.scene.layer_count();
        if count > 0 && self.selection.current_layer >= count {
            self.selection.current_layer = count - 1;
        }
        self.selection.current_frame = self.selection.current_frame.clamp(1, self.scene.duration.max(1));
    }

    #[inline]
    fn push_undo(&mut self, action: UndoAction) {
        if self.undo_stack.len() >= MAX_UNDO_ACTIONS {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(action);
        self.is_modified = true;
    }

    /// Applies a rename coming out of the properties dialog. Empty input is
    /// ignored; an unchanged name records nothing.
    pub fn rename_layer(&mut self, index: usize, name: &str) -> bool {
        let Some(layer) = self.scene.layer_mut(index) else {
            return false;
        };
        let old_name = layer.name.clone();
        if !layer.rename(name) || layer.name == old_name {
            return false;
        }
        self.push_undo(UndoAction::RenameLayer { index, old_name });
        true
    }

    pub fn toggle_visible(&mut self, index: usize) {
        if let Some(layer) = self.scene.layer_mut(index) {
            let old_visible = layer.visible;
            layer.visible = !old_visible;
            self.push_undo(UndoAction::SetVisible { index, old_visible });
        }
    }

    pub fn add_layer(&mut self, kind: LayerKind) -> Result<usize, String> {
        let index = self.scene.add_layer(kind).map_err(|e| e.to_string())?;
        self.push_undo(UndoAction::AddLayer { index });
        self.selection.current_layer = index;
        Ok(index)
    }

    pub fn delete_layer(&mut self, index: usize) {
        if let Some(layer) = self.scene.remove_layer(index) {
            self.push_undo(UndoAction::RemoveLayer { index, layer });
            self.clamp_selection();
        }
    }

    pub fn move_layer_up(&mut self, index: usize) -> bool {
        if index == 0 || !self.scene.swap_layers(index, index - 1) {
            return false;
        }
        self.push_undo(UndoAction::SwapLayers { a: index, b: index - 1 });
        if self.selection.current_layer == index {
            self.selection.current_layer = index - 1;
        }
        true
    }

    pub fn move_layer_down(&mut self, index: usize) -> bool {
        if !self.scene.swap_layers(index, index + 1) {
            return false;
        }
        self.push_undo(UndoAction::SwapLayers { a: index, b: index + 1 });
        if self.selection.current_layer == index {
            self.selection.current_layer = index + 1;
        }
        true
    }

    /// A track press: selects the layer, moves the playhead to the pressed
    /// frame, then forwards the press to the layer's input handler. A press
    /// that becomes a drag never reports a click, so selection happens here.
    pub fn press_track(&mut self, index: usize, frame: i32) -> Option<TrackEdit> {
        self.select_layer(index);
        self.select_frame(frame);
        self.scene.layer_mut(index)?.mouse_press(frame)
    }

    /// Books a track mutation reported by a pointer gesture on the frame
    /// track, so it participates in undo like every other edit.
    pub fn record_track_edit(&mut self, layer: usize, edit: TrackEdit) {
        match edit {
            TrackEdit::KeyframeAdded { frame } => {
                self.push_undo(UndoAction::AddKeyframe { layer, frame });
            }
            TrackEdit::KeyframeMoved { from, to } => {
                self.push_undo(UndoAction::MoveKeyframe { layer, from, to });
            }
        }
    }

    pub fn undo(&mut self) {
        if let Some(action) = self.undo_stack.pop_back() {
            match action {
                UndoAction::RenameLayer { index, old_name } => {
                    if let Some(layer) = self.scene.layer_mut(index) {
                        layer.name = old_name;
                    }
                }
                UndoAction::SetVisible { index, old_visible } => {
                    if let Some(layer) = self.scene.layer_mut(index) {
                        layer.visible = old_visible;
                    }
                }
                UndoAction::AddLayer { index } => {
                    let _ = self.scene.remove_layer(index);
                }
                UndoAction::RemoveLayer { index, layer } => {
                    let _ = self.scene.restore_layer(index, layer);
                }
                UndoAction::SwapLayers { a, b } => {
                    self.scene.swap_layers(a, b);
                }
                UndoAction::AddKeyframe { layer, frame } => {
                    if let Some(l) = self.scene.layer_mut(layer) {
                        l.keyframes_mut().remove_keyframe(frame);
                    }
                }
                UndoAction::MoveKeyframe { layer, from, to } => {
                    if let Some(l) = self.scene.layer_mut(layer) {
                        l.keyframes_mut().move_keyframe(to, from);
                    }
                }
            }
            self.is_modified = true;
            self.clamp_selection();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        let mut scene = Scene::new("test", 24, 48);
        scene.add_layer(LayerKind::Bitmap).unwrap();
        scene.add_layer(LayerKind::Vector).unwrap();
        Document::new(scene, None)
    }

    #[test]
    fn test_title_marks_modified_documents() {
        let mut doc = sample_document();
        assert_eq!(doc.title(), "test");

        doc.file_path = Some("shot04.dsx".to_string().into_boxed_str());
        assert_eq!(doc.title(), "test - shot04.dsx");

        doc.is_modified = true;
        assert_eq!(doc.title(), "test - shot04.dsx*");
    }

    #[test]
    fn test_rename_layer_records_undo() {
        let mut doc = sample_document();
        assert!(doc.rename_layer(0, "Rough"));
        assert!(doc.is_modified);
        assert_eq!(doc.scene.layer(0).unwrap().name, "Rough");

        // Unchanged or empty names record nothing.
        assert!(!doc.rename_layer(0, "Rough"));
        assert!(!doc.rename_layer(0, "  "));
        assert_eq!(doc.undo_stack.len(), 1);

        doc.undo();
        assert_eq!(doc.scene.layer(0).unwrap().name, "Bitmap Layer");
    }

    #[test]
    fn test_toggle_visible_round_trips_through_undo() {
        let mut doc = sample_document();
        doc.toggle_visible(1);
        assert!(!doc.scene.layer(1).unwrap().visible);

        doc.undo();
        assert!(doc.scene.layer(1).unwrap().visible);
    }

    #[test]
    fn test_delete_layer_undo_restores_layer_and_id() {
        let mut doc = sample_document();
        let id = doc.scene.layer(0).unwrap().id();
        doc.scene.layer_mut(0).unwrap().keyframes_mut().add_keyframe(7);

        doc.delete_layer(0);
        assert_eq!(doc.scene.layer_count(), 1);

        doc.undo();
        assert_eq!(doc.scene.layer_count(), 2);
        let restored = doc.scene.layer(0).unwrap();
        assert_eq!(restored.id(), id);
        assert!(restored.keyframes().has_keyframe(7));
    }

    #[test]
    fn test_delete_last_layer_clamps_selection() {
        let mut doc = sample_document();
        doc.select_layer(1);
        doc.delete_layer(1);
        assert_eq!(doc.selection.current_layer, 0);
    }

    #[test]
    fn test_move_layer_follows_selection() {
        let mut doc = sample_document();
        doc.select_layer(1);
        assert!(doc.move_layer_up(1));
        assert_eq!(doc.selection.current_layer, 0);
        assert_eq!(doc.scene.layer(0).unwrap().kind(), LayerKind::Vector);

        assert!(!doc.move_layer_up(0));
        assert!(doc.move_layer_down(0));
        assert_eq!(doc.scene.layer(0).unwrap().kind(), LayerKind::Bitmap);
    }

    #[test]
    fn test_move_layer_undo_restores_order() {
        let mut doc = sample_document();
        assert!(doc.move_layer_up(1));
        assert_eq!(doc.scene.layer(0).unwrap().kind(), LayerKind::Vector);

        doc.undo();
        assert_eq!(doc.scene.layer(0).unwrap().kind(), LayerKind::Bitmap);
        assert_eq!(doc.scene.layer(1).unwrap().kind(), LayerKind::Vector);
    }

    #[test]
    fn test_add_layer_undo_removes_layer() {
        let mut doc = sample_document();
        let index = doc.add_layer(LayerKind::Sound).unwrap();
        assert_eq!(index, 2);
        assert_eq!(doc.selection.current_layer, 2);

        doc.undo();
        assert_eq!(doc.scene.layer_count(), 2);
        assert_eq!(doc.selection.current_layer, 1);
    }

    #[test]
    fn test_track_edits_participate_in_undo() {
        let mut doc = sample_document();
        let edit = doc.scene.layer_mut(0).unwrap().mouse_double_click(5).unwrap();
        doc.record_track_edit(0, edit);
        assert!(doc.scene.layer(0).unwrap().keyframes().has_keyframe(5));

        doc.undo();
        assert!(!doc.scene.layer(0).unwrap().keyframes().has_keyframe(5));

        doc.scene.layer_mut(0).unwrap().keyframes_mut().add_keyframe(5);
        doc.record_track_edit(
            0,
            TrackEdit::KeyframeMoved { from: 5, to: 9 },
        );
        doc.undo();
        // The undo moves 9 back to 5; the keyframe was never at 9 here, so
        // nothing explodes and 5 survives.
        assert!(doc.scene.layer(0).unwrap().keyframes().has_keyframe(5));

        doc.scene.layer_mut(0).unwrap().keyframes_mut().move_keyframe(5, 9);
        doc.record_track_edit(0, TrackEdit::KeyframeMoved { from: 5, to: 9 });
        doc.undo();
        assert!(doc.scene.layer(0).unwrap().keyframes().has_keyframe(5));
        assert!(!doc.scene.layer(0).unwrap().keyframes().has_keyframe(9));
    }

    #[test]
    fn test_press_track_selects_layer_and_frame() {
        let mut doc = sample_document();
        doc.scene.layer_mut(1).unwrap().keyframes_mut().add_keyframe(5);

        assert!(doc.press_track(1, 5).is_none());
        assert_eq!(doc.selection.current_layer, 1);
        assert_eq!(doc.selection.current_frame, 5);
        // The press also started a grab on the keyframe under the pointer.
        assert_eq!(doc.scene.layer(1).unwrap().drag_preview(), Some((5, 5)));

        // A press over empty track cells still moves the playhead.
        assert!(doc.press_track(0, 9).is_none());
        assert_eq!(doc.selection.current_layer, 0);
        assert_eq!(doc.selection.current_frame, 9);
        assert!(doc.scene.layer(0).unwrap().drag_preview().is_none());
    }

    #[test]
    fn test_undo_stack_is_capped() {
        let mut doc = sample_document();
        for i in 0..(MAX_UNDO_ACTIONS + 20) {
            doc.rename_layer(0, &format!("take {}", i));
        }
        assert_eq!(doc.undo_stack.len(), MAX_UNDO_ACTIONS);
    }

    #[test]
    fn test_select_frame_clamps_to_scene_duration() {
        let mut doc = sample_document();
        doc.select_frame(30);
        assert_eq!(doc.selection.current_frame, 30);
        doc.select_frame(0);
        assert_eq!(doc.selection.current_frame, 1);
        doc.select_frame(5000);
        assert_eq!(doc.selection.current_frame, 48);
    }

    #[test]
    fn test_save_as_writes_file_and_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.dsx");
        let path_str = path.to_str().unwrap().to_string();

        let mut doc = sample_document();
        doc.is_modified = true;
        doc.save_as(path_str.clone()).unwrap();
        assert!(!doc.is_modified);
        assert_eq!(doc.file_path.as_deref(), Some(path_str.as_str()));

        let reloaded = dopesheet::parse_scene_file(&path_str).unwrap();
        assert_eq!(reloaded, doc.scene);
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = sample_document();
        assert!(doc.save().is_err());
    }
}

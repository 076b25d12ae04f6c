use thiserror::Error;

use super::layer::{Layer, LayerKind};
use crate::limits;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("layer limit reached ({max} layers)")]
    TooManyLayers { max: usize },
}

/// An animation scene: the document container owning the ordered layer
/// list. Layer ids are assigned here and stay unique for the scene's
/// lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: String,
    /// Frames per second.
    pub framerate: u32,
    /// Timeline length in frames.
    pub duration: i32,
    layers: Vec<Layer>,
    next_layer_id: u32,
}

impl Scene {
    pub fn new(name: impl Into<String>, framerate: u32, duration: i32) -> Self {
        Self {
            name: name.into(),
            framerate: framerate.max(1),
            duration: duration.clamp(1, limits::MAX_FRAMES as i32),
            layers: Vec::new(),
            next_layer_id: 1,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    #[inline]
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_by_id(&self, id: u32) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn layer_mut_by_id(&mut self, id: u32) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Appends a new layer of the given kind and returns its index.
    pub fn add_layer(&mut self, kind: LayerKind) -> Result<usize, ModelError> {
        if self.layers.len() >= limits::MAX_LAYERS {
            return Err(ModelError::TooManyLayers {
                max: limits::MAX_LAYERS,
            });
        }
        let id = self.next_layer_id;
        self.next_layer_id += 1;
        self.layers.push(Layer::new(id, kind));
        Ok(self.layers.len() - 1)
    }

    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        if index < self.layers.len() {
            Some(self.layers.remove(index))
        } else {
            None
        }
    }

    /// Puts a previously removed layer back, keeping its id. Used by undo.
    pub fn restore_layer(&mut self, index: usize, layer: Layer) -> Result<(), ModelError> {
        if self.layers.len() >= limits::MAX_LAYERS {
            return Err(ModelError::TooManyLayers {
                max: limits::MAX_LAYERS,
            });
        }
        self.next_layer_id = self.next_layer_id.max(layer.id() + 1);
        let index = index.min(self.layers.len());
        self.layers.insert(index, layer);
        Ok(())
    }

    /// Switches the places of two layers, e.g. for move up/down.
    pub fn swap_layers(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.layers.len() || b >= self.layers.len() {
            return false;
        }
        self.layers.swap(a, b);
        true
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("scene1", 24, 240)
    }
}

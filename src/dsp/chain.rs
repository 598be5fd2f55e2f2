//! Transform chain
//!
//! Transforms are applied in chain order (index 0 first). A chain is itself a
//! transform, so a whole chain can be plugged into the segment pipeline.

use super::transform::{Transform, TransformKind};
use crate::engine::Sound;

/// Ordered list of transforms applied one after another
#[derive(Default)]
pub struct TransformChain {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from built-in transform kinds
    pub fn from_kinds(kinds: &[TransformKind]) -> Self {
        Self {
            transforms: kinds.iter().map(|k| k.build()).collect(),
        }
    }

    /// Append a transform at the end of the chain
    pub fn push(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    /// Builder-style `push`
    pub fn with(mut self, transform: impl Transform + 'static) -> Self {
        self.push(Box::new(transform));
        self
    }

    /// Get the number of transforms in the chain
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Names of the transforms, in application order
    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Transform for TransformChain {
    fn apply(&self, sound: &Sound) -> Sound {
        let mut transforms = self.transforms.iter();
        let Some(first) = transforms.next() else {
            return sound.clone();
        };
        transforms.fold(first.apply(sound), |acc, t| t.apply(&acc))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

//! Sound Transforms
//!
//! Pure `Sound -> Sound` effects. All transforms implement the `Transform`
//! trait so the segment pipeline can apply any of them uniformly.

mod chain;
mod transform;

pub use chain::TransformChain;
pub use transform::{
    Identity, Invert, IsolateVocals, RemoveVocals, Reverse, Transform, TransformKind,
};

//! Transform trait definition
//!
//! A transform is a pure `Sound -> Sound` mapping that keeps the rate and the
//! stereo alignment of its input. The pipeline applies one transform to every
//! segment, so new per-segment effects only need to implement this trait.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::Sound;

/// Base trait for all sound transforms
pub trait Transform: Send + Sync {
    /// Produce a new sound from `sound`
    ///
    /// Must not fail on zero-length input.
    fn apply(&self, sound: &Sound) -> Sound;

    /// Get the transform type identifier
    fn name(&self) -> &'static str;
}

/// Apply `f` to every sample of both channels
fn map_samples(sound: &Sound, f: impl Fn(f32) -> f32) -> Sound {
    Sound::from_parts(
        sound.rate(),
        sound.left().iter().map(|&s| f(s)).collect(),
        sound.right().iter().map(|&s| f(s)).collect(),
    )
}

/// Leaves the sound unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    fn apply(&self, sound: &Sound) -> Sound {
        sound.clone()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Reverses sample order in both channels
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl Transform for Reverse {
    fn apply(&self, sound: &Sound) -> Sound {
        Sound::from_parts(
            sound.rate(),
            sound.left().iter().rev().copied().collect(),
            sound.right().iter().rev().copied().collect(),
        )
    }

    fn name(&self) -> &'static str {
        "reverse"
    }
}

/// Negates every sample (phase inversion)
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl Transform for Invert {
    fn apply(&self, sound: &Sound) -> Sound {
        map_samples(sound, |s| -s)
    }

    fn name(&self) -> &'static str {
        "invert"
    }
}

/// Replaces both channels with `left - right`
///
/// Anything panned dead center, usually the lead vocal, cancels out.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveVocals;

impl Transform for RemoveVocals {
    fn apply(&self, sound: &Sound) -> Sound {
        let diff: Vec<f32> = sound
            .left()
            .iter()
            .zip(sound.right())
            .map(|(l, r)| l - r)
            .collect();
        Sound::from_parts(sound.rate(), diff.clone(), diff)
    }

    fn name(&self) -> &'static str {
        "remove-vocals"
    }
}

/// Sums the inverted sound with its vocal-removed version
///
/// Meant to cancel the instrumental and keep the vocal. It does not actually
/// isolate vocals on real material.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsolateVocals;

impl Transform for IsolateVocals {
    fn apply(&self, sound: &Sound) -> Sound {
        let instrumental = RemoveVocals.apply(sound);
        let inverted = Invert.apply(sound);

        let sum = |a: &[f32], b: &[f32]| -> Vec<f32> {
            a.iter().zip(b).map(|(x, y)| x + y).collect()
        };

        Sound::from_parts(
            sound.rate(),
            sum(inverted.left(), instrumental.left()),
            sum(inverted.right(), instrumental.right()),
        )
    }

    fn name(&self) -> &'static str {
        "isolate-vocals"
    }
}

/// Built-in transforms selectable from config files and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    Identity,
    Reverse,
    Invert,
    RemoveVocals,
    IsolateVocals,
}

impl TransformKind {
    /// Instantiate the transform this kind names
    pub fn build(self) -> Box<dyn Transform> {
        match self {
            TransformKind::Identity => Box::new(Identity),
            TransformKind::Reverse => Box::new(Reverse),
            TransformKind::Invert => Box::new(Invert),
            TransformKind::RemoveVocals => Box::new(RemoveVocals),
            TransformKind::IsolateVocals => Box::new(IsolateVocals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stereo() -> Sound {
        Sound::new(100, vec![0.1, 0.2, 0.3, 0.4], vec![-0.4, 0.0, 0.5, 0.9]).unwrap()
    }

    #[test]
    fn test_reverse() {
        let reversed = Reverse.apply(&stereo());
        assert_eq!(reversed.left(), &[0.4, 0.3, 0.2, 0.1]);
        assert_eq!(reversed.right(), &[0.9, 0.5, 0.0, -0.4]);
        assert_eq!(reversed.rate(), 100);
    }

    #[test]
    fn test_reverse_is_an_involution() {
        let sound = stereo();
        assert_eq!(Reverse.apply(&Reverse.apply(&sound)), sound);
    }

    #[test]
    fn test_reverse_empty() {
        let empty = Sound::empty(100).unwrap();
        let reversed = Reverse.apply(&empty);
        assert!(reversed.is_empty());
        assert_eq!(reversed.rate(), 100);
    }

    #[test]
    fn test_invert() {
        let inverted = Invert.apply(&stereo());
        assert_eq!(inverted.left(), &[-0.1, -0.2, -0.3, -0.4]);
        assert_eq!(inverted.right(), &[0.4, -0.0, -0.5, -0.9]);
    }

    #[test]
    fn test_remove_vocals_cancels_center() {
        let centered = Sound::from_mono(100, vec![0.3, -0.7, 0.2]).unwrap();
        let out = RemoveVocals.apply(&centered);
        assert!(out.left().iter().all(|&s| s == 0.0));
        assert_eq!(out.left(), out.right());
    }

    #[test]
    fn test_remove_vocals_may_exceed_range() {
        let wide = Sound::new(100, vec![1.0], vec![-1.0]).unwrap();
        let out = RemoveVocals.apply(&wide);
        assert_eq!(out.left(), &[2.0]);
    }

    #[test]
    fn test_isolate_vocals() {
        let sound = Sound::new(100, vec![0.5], vec![0.25]).unwrap();
        let out = IsolateVocals.apply(&sound);
        // left: -l + (l - r) = -r, right: -r + (l - r)
        assert_eq!(out.left(), &[-0.25]);
        assert_eq!(out.right(), &[0.0]);
    }

    #[test]
    fn test_kind_builds_named_transform() {
        for kind in TransformKind::value_variants() {
            let name = kind.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(kind.build().name(), name);
        }
    }

    #[test]
    fn test_kind_serde() {
        let kind: TransformKind = serde_json::from_str("\"remove-vocals\"").unwrap();
        assert_eq!(kind, TransformKind::RemoveVocals);
    }
}

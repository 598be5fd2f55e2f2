//! Pipeline driver
//!
//! partition -> transform each segment -> reassemble. The driver holds no
//! sound state and performs no I/O.

use std::num::NonZeroUsize;
use std::thread;

use tracing::debug;

use super::boundary::Boundary;
use super::partition::partition;
use super::reassemble::concatenate;
use crate::dsp::{Reverse, Transform};
use crate::engine::Sound;
use crate::error::Result;

/// Split `sound` at `boundaries`, apply `transform` to every segment and
/// join the results in their original order
pub fn split_and_transform(
    sound: &Sound,
    boundaries: &[Boundary],
    transform: &dyn Transform,
) -> Result<Sound> {
    let segments = partition(sound, boundaries)?;
    let transformed = map_segments(&segments, transform, false);
    concatenate(&transformed, sound.rate())
}

/// Reverse the whole clip without segmenting it
pub fn reverse_whole(sound: &Sound) -> Result<Sound> {
    split_and_transform(sound, &[], &Reverse)
}

/// Reusable split/transform/reassemble pipeline
pub struct Pipeline {
    transform: Box<dyn Transform>,
    parallel: bool,
}

impl Pipeline {
    /// Create a sequential pipeline around `transform`
    pub fn new(transform: Box<dyn Transform>) -> Self {
        Self {
            transform,
            parallel: false,
        }
    }

    /// Transform segments on worker threads
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Name of the per-segment transform
    pub fn transform_name(&self) -> &'static str {
        self.transform.name()
    }

    /// Run the pipeline over one sound
    pub fn run(&self, sound: &Sound, boundaries: &[Boundary]) -> Result<Sound> {
        let segments = partition(sound, boundaries)?;
        debug!(
            transform = self.transform.name(),
            segments = segments.len(),
            parallel = self.parallel,
            "transforming segments"
        );
        let transformed = map_segments(&segments, self.transform.as_ref(), self.parallel);
        concatenate(&transformed, sound.rate())
    }
}

/// Apply `transform` to each segment, keeping input order
///
/// The parallel path writes each result into the slot matching its input
/// index, so completion order never affects output order.
fn map_segments(segments: &[Sound], transform: &dyn Transform, parallel: bool) -> Vec<Sound> {
    if !parallel || segments.len() < 2 {
        return segments.iter().map(|s| transform.apply(s)).collect();
    }

    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(segments.len());
    let chunk_size = segments.len().div_ceil(workers);

    let mut output: Vec<Option<Sound>> = vec![None; segments.len()];
    thread::scope(|scope| {
        for (inputs, slots) in segments
            .chunks(chunk_size)
            .zip(output.chunks_mut(chunk_size))
        {
            scope.spawn(move || {
                for (segment, slot) in inputs.iter().zip(slots.iter_mut()) {
                    *slot = Some(transform.apply(segment));
                }
            });
        }
    });

    output.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{Identity, Invert};
    use pretty_assertions::assert_eq;

    fn clip(len: usize, rate: u32) -> Sound {
        let left: Vec<f32> = (0..len).map(|i| (i as f32 * 0.37).sin()).collect();
        let right: Vec<f32> = (0..len).map(|i| (i as f32 * 0.11).cos()).collect();
        Sound::new(rate, left, right).unwrap()
    }

    fn reversed(samples: &[f32]) -> Vec<f32> {
        samples.iter().rev().copied().collect()
    }

    #[test]
    fn test_split_reverse_two_segments() {
        let sound = clip(16000, 8000);
        let out = split_and_transform(&sound, &[Boundary::new(1.0, 1.2)], &Reverse).unwrap();

        let mut expected = reversed(&sound.left()[..8000]);
        expected.extend(reversed(&sound.left()[8000..]));
        assert_eq!(out.left(), expected.as_slice());
        assert_eq!(out.rate(), 8000);
    }

    #[test]
    fn test_no_boundaries_reverses_whole_clip() {
        let sound = clip(100, 10);
        let out = split_and_transform(&sound, &[], &Reverse).unwrap();
        assert_eq!(out, reverse_whole(&sound).unwrap());
        assert_eq!(out.left(), reversed(sound.left()).as_slice());
    }

    #[test]
    fn test_identity_round_trip() {
        let sound = clip(500, 100);
        let boundaries = [Boundary::new(0.7, 0.8), Boundary::new(2.25, 2.5)];
        assert_eq!(split_and_transform(&sound, &boundaries, &Identity).unwrap(), sound);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sound = clip(4000, 100);
        let boundaries: Vec<Boundary> = (1..30)
            .map(|i| Boundary::new(i as f64 * 1.3, i as f64 * 1.3 + 0.1))
            .collect();

        let sequential = Pipeline::new(Box::new(Reverse))
            .run(&sound, &boundaries)
            .unwrap();
        let parallel = Pipeline::new(Box::new(Reverse))
            .with_parallel(true)
            .run(&sound, &boundaries)
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_pipeline_with_other_transform() {
        let sound = clip(20, 10);
        let pipeline = Pipeline::new(Box::new(Invert));
        let out = pipeline.run(&sound, &[Boundary::new(1.0, 1.5)]).unwrap();

        assert_eq!(pipeline.transform_name(), "invert");
        let expected: Vec<f32> = sound.left().iter().map(|s| -s).collect();
        assert_eq!(out.left(), expected.as_slice());
    }

    #[test]
    fn test_empty_sound_passes_through() {
        let sound = Sound::empty(8000).unwrap();
        let out = split_and_transform(&sound, &[Boundary::new(0.1, 0.2)], &Reverse).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.rate(), 8000);
    }
}

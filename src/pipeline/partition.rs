//! Segment partitioner
//!
//! Cuts a sound into contiguous, owned segments at the start time of every
//! silence boundary. Segments always cover the whole input: the first begins
//! at sample 0 and the last runs to the end of the sound, regardless of the
//! final boundary's end time.

use std::ops::Range;

use tracing::debug;

use super::boundary::{validate_boundaries, Boundary};
use crate::engine::Sound;
use crate::error::Result;

/// Convert a time in seconds to a sample index
///
/// Rounds to the nearest sample (halfway cases away from zero), so times
/// that are exact multiples of the sample period never land one sample early
/// because of floating point error.
pub fn time_to_index(seconds: f64, rate: u32) -> usize {
    (seconds * rate as f64).round() as usize
}

/// Cut points `[0, i_1, ..., i_k, len]` for a sound of `len` samples
///
/// Indices beyond the end of the sound are clamped to `len`, producing
/// zero-length segments rather than an error.
pub fn cut_points(len: usize, rate: u32, boundaries: &[Boundary]) -> Result<Vec<usize>> {
    validate_boundaries(boundaries)?;

    let mut cuts = Vec::with_capacity(boundaries.len() + 2);
    cuts.push(0);
    cuts.extend(
        boundaries
            .iter()
            .map(|b| time_to_index(b.start, rate).min(len)),
    );
    cuts.push(len);
    Ok(cuts)
}

/// Sample ranges of each segment, in order
pub fn segment_ranges(sound: &Sound, boundaries: &[Boundary]) -> Result<Vec<Range<usize>>> {
    sound.validate()?;
    let cuts = cut_points(sound.len(), sound.rate(), boundaries)?;
    Ok(cuts.windows(2).map(|w| w[0]..w[1]).collect())
}

/// Split `sound` into `boundaries.len() + 1` ordered segments
///
/// # Errors
/// * `InvalidInput` - if the sound violates its invariants or the boundary
///   start times are not finite, non-negative and ascending
pub fn partition(sound: &Sound, boundaries: &[Boundary]) -> Result<Vec<Sound>> {
    let ranges = segment_ranges(sound, boundaries)?;
    debug!(
        samples = sound.len(),
        segments = ranges.len(),
        "partitioning sound"
    );
    Ok(ranges.into_iter().map(|r| sound.slice(r)).collect())
}

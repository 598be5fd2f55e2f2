//! Segment reassembly
//!
//! Concatenates ordered segments channel-wise back into one sound. Order is
//! significant: segment `i` always lands before segment `i + 1`.

use crate::engine::Sound;
use crate::error::{Result, SoundError};

/// Join `segments` into a single sound
///
/// An empty segment list yields an empty sound at `fallback_rate`.
///
/// # Errors
/// * `InconsistentRate` - if any segment's rate differs from the first one's
/// * `InvalidInput` - if the list is empty and `fallback_rate` is zero
pub fn concatenate(segments: &[Sound], fallback_rate: u32) -> Result<Sound> {
    let Some(first) = segments.first() else {
        return Sound::empty(fallback_rate);
    };

    let rate = first.rate();
    if let Some(mismatch) = segments.iter().find(|s| s.rate() != rate) {
        return Err(SoundError::InconsistentRate {
            expected: rate,
            actual: mismatch.rate(),
        });
    }

    let total: usize = segments.iter().map(Sound::len).sum();
    let mut left = Vec::with_capacity(total);
    let mut right = Vec::with_capacity(total);

    for segment in segments {
        left.extend_from_slice(segment.left());
        right.extend_from_slice(segment.right());
    }

    Sound::new(rate, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(rate: u32, left: &[f32]) -> Sound {
        let right: Vec<f32> = left.iter().map(|s| s * 10.0).collect();
        Sound::new(rate, left.to_vec(), right).unwrap()
    }

    #[test]
    fn test_concatenate_in_order() {
        let joined = concatenate(&[seg(8, &[1.0, 2.0]), seg(8, &[]), seg(8, &[3.0])], 8).unwrap();
        assert_eq!(joined.left(), &[1.0, 2.0, 3.0]);
        assert_eq!(joined.right(), &[10.0, 20.0, 30.0]);
        assert_eq!(joined.rate(), 8);
    }

    #[test]
    fn test_empty_list_uses_fallback_rate() {
        let joined = concatenate(&[], 44100).unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.rate(), 44100);
    }

    #[test]
    fn test_empty_list_zero_fallback_rejected() {
        assert!(matches!(
            concatenate(&[], 0),
            Err(SoundError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rate_mismatch() {
        let result = concatenate(&[seg(8000, &[1.0]), seg(16000, &[2.0])], 8000);
        match result {
            Err(SoundError::InconsistentRate { expected, actual }) => {
                assert_eq!(expected, 8000);
                assert_eq!(actual, 16000);
            }
            other => panic!("Expected InconsistentRate, got: {:?}", other),
        }
    }

    #[test]
    fn test_order_is_significant() {
        let a = seg(8, &[1.0, 2.0]);
        let b = seg(8, &[3.0]);
        let forward = concatenate(&[a.clone(), b.clone()], 8).unwrap();
        let backward = concatenate(&[b, a], 8).unwrap();
        assert_ne!(forward, backward);
    }
}

//! In-memory stereo sound representation
//!
//! A `Sound` is a sample rate plus two equal-length channels. Values are
//! nominally within [-1.0, 1.0] but are only clamped when written to disk,
//! so transforms like inversion or channel subtraction may exceed the range.

use std::ops::Range;

use crate::error::{Result, SoundError};

/// Stereo audio clip held entirely in memory
///
/// Sounds are immutable once built: every transform returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    rate: u32,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl Sound {
    /// Create a sound from two channels
    ///
    /// # Errors
    /// * `InvalidInput` - if `rate` is zero or the channel lengths differ
    pub fn new(rate: u32, left: Vec<f32>, right: Vec<f32>) -> Result<Self> {
        let sound = Self { rate, left, right };
        sound.validate()?;
        Ok(sound)
    }

    /// Create a stereo sound by duplicating a single channel
    pub fn from_mono(rate: u32, samples: Vec<f32>) -> Result<Self> {
        let right = samples.clone();
        Self::new(rate, samples, right)
    }

    /// Create a zero-length sound at the given rate
    pub fn empty(rate: u32) -> Result<Self> {
        Self::new(rate, Vec::new(), Vec::new())
    }

    /// Build a sound whose invariants the caller already upholds
    ///
    /// Used by transforms that map channels one-to-one from a valid sound.
    pub(crate) fn from_parts(rate: u32, left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert!(rate > 0);
        debug_assert_eq!(left.len(), right.len());
        Self { rate, left, right }
    }

    /// Re-check the stereo alignment and rate invariants
    pub fn validate(&self) -> Result<()> {
        if self.rate == 0 {
            return Err(SoundError::invalid("sample rate must be positive"));
        }
        if self.left.len() != self.right.len() {
            return Err(SoundError::invalid(format!(
                "channel length mismatch: left has {} samples, right has {}",
                self.left.len(),
                self.right.len()
            )));
        }
        Ok(())
    }

    /// Sample rate in Hz
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Left channel samples
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel samples
    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True if the sound holds no samples
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.rate as f64
    }

    /// Copy out the samples in `range` as a new sound with the same rate
    ///
    /// The range is clamped to the sound's length, so an out-of-range slice
    /// yields a zero-length sound instead of panicking.
    pub fn slice(&self, range: Range<usize>) -> Sound {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        Self::from_parts(
            self.rate,
            self.left[start..end].to_vec(),
            self.right[start..end].to_vec(),
        )
    }

    /// Move the channel data out of the sound
    pub fn into_channels(self) -> (Vec<f32>, Vec<f32>) {
        (self.left, self.right)
    }

    /// Average both channels into one
    pub fn mono_mix(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(&self.right)
            .map(|(l, r)| (l + r) * 0.5)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sound() {
        let sound = Sound::new(8000, vec![0.1, 0.2], vec![0.3, 0.4]).unwrap();
        assert_eq!(sound.rate(), 8000);
        assert_eq!(sound.len(), 2);
        assert_eq!(sound.left(), &[0.1, 0.2]);
        assert_eq!(sound.right(), &[0.3, 0.4]);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = Sound::new(0, vec![], vec![]);
        assert!(matches!(result, Err(SoundError::InvalidInput { .. })));
    }

    #[test]
    fn test_mismatched_channels_rejected() {
        let result = Sound::new(8000, vec![0.0; 3], vec![0.0; 2]);
        match result {
            Err(SoundError::InvalidInput { reason }) => assert!(reason.contains("mismatch")),
            other => panic!("Expected InvalidInput, got: {:?}", other),
        }
    }

    #[test]
    fn test_from_mono_duplicates_channel() {
        let sound = Sound::from_mono(100, vec![0.5, -0.5, 0.25]).unwrap();
        assert_eq!(sound.left(), sound.right());
    }

    #[test]
    fn test_duration() {
        let sound = Sound::from_mono(8000, vec![0.0; 4000]).unwrap();
        assert!((sound.duration_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_slice_is_owned_copy() {
        let sound = Sound::new(10, vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let part = sound.slice(1..3);
        assert_eq!(part.left(), &[2.0, 3.0]);
        assert_eq!(part.right(), &[6.0, 7.0]);
        assert_eq!(part.rate(), 10);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let sound = Sound::from_mono(10, vec![1.0, 2.0]).unwrap();
        assert!(sound.slice(5..9).is_empty());
        assert_eq!(sound.slice(1..9).left(), &[2.0]);
    }

    #[test]
    fn test_mono_mix() {
        let sound = Sound::new(10, vec![1.0, 0.0], vec![0.0, -1.0]).unwrap();
        assert_eq!(sound.mono_mix(), vec![0.5, -0.5]);
    }
}

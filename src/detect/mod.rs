//! Silence detection
//!
//! Produces the boundary list the pipeline cuts at. The pipeline itself only
//! depends on the `SilenceDetector` trait; `EnergyDetector` is a simple
//! windowed-RMS implementation and `StaticBoundaries` replays a list that was
//! computed elsewhere.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::Sound;
use crate::error::{Result, SoundError};
use crate::pipeline::Boundary;

/// Source of silence intervals for a sound
pub trait SilenceDetector {
    /// Ordered silence intervals, ascending by start time
    fn detect(&self, sound: &Sound) -> Vec<Boundary>;
}

/// Energy detector parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Analysis window length in seconds
    pub window_secs: f64,
    /// Window RMS below this fraction of the loudest window counts as silence
    pub threshold_fraction: f64,
    /// Silences shorter than this fraction of the clip duration are ignored
    pub min_duration_fraction: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_secs: 0.05,
            threshold_fraction: 0.05,
            min_duration_fraction: 0.05,
        }
    }
}

impl DetectorConfig {
    /// Validate parameters are within range
    pub fn validate(&self) -> Result<()> {
        if !(self.window_secs.is_finite() && self.window_secs > 0.0) {
            return Err(SoundError::invalid(format!(
                "window_secs must be positive, got {}",
                self.window_secs
            )));
        }
        for (name, value) in [
            ("threshold_fraction", self.threshold_fraction),
            ("min_duration_fraction", self.min_duration_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SoundError::invalid(format!(
                    "{} must be within 0..=1, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Windowed RMS silence detector
#[derive(Debug, Clone)]
pub struct EnergyDetector {
    config: DetectorConfig,
}

impl EnergyDetector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl SilenceDetector for EnergyDetector {
    fn detect(&self, sound: &Sound) -> Vec<Boundary> {
        let rate = sound.rate() as f64;
        let window = ((self.config.window_secs * rate).round() as usize).max(1);
        let samples = sound.mono_mix();

        let levels: Vec<f32> = samples.chunks(window).map(rms).collect();
        let loudest = levels.iter().copied().fold(0.0_f32, f32::max);
        if loudest <= 0.0 {
            return Vec::new();
        }

        let threshold = self.config.threshold_fraction as f32 * loudest;
        let min_len = self.config.min_duration_fraction * sound.duration_secs();

        let mut silences = Vec::new();
        let mut run_start: Option<usize> = None;
        for (i, &level) in levels.iter().enumerate() {
            match (level < threshold, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    silences.push((start, i));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            silences.push((start, levels.len()));
        }

        let boundaries: Vec<Boundary> = silences
            .into_iter()
            .map(|(first, last)| {
                let start = (first * window) as f64 / rate;
                let end = (last * window).min(samples.len()) as f64 / rate;
                Boundary::new(start, end)
            })
            .filter(|b| b.end - b.start >= min_len)
            .collect();

        debug!(
            windows = levels.len(),
            silences = boundaries.len(),
            "detected silence"
        );
        boundaries
    }
}

/// Fixed boundary list, e.g. loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct StaticBoundaries(pub Vec<Boundary>);

impl SilenceDetector for StaticBoundaries {
    fn detect(&self, _sound: &Sound) -> Vec<Boundary> {
        self.0.clone()
    }
}

fn rms(window: &[f32]) -> f32 {
    if window.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = window.iter().map(|&s| (s as f64).powi(2)).sum();
    (sum_sq / window.len() as f64).sqrt() as f32
}

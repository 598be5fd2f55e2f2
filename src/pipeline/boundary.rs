//! Silence boundaries
//!
//! A boundary is a `(start, end)` silence interval in seconds. Only `start`
//! is used as a cut point; `end` is carried along for naming and reporting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoundError};

/// A silence interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub start: f64,
    pub end: f64,
}

impl Boundary {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl From<(f64, f64)> for Boundary {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

/// On-disk forms accepted for a boundary: `[start, end]` or `{"start", "end"}`
#[derive(Deserialize)]
#[serde(untagged)]
enum BoundaryRepr {
    Pair(f64, f64),
    Object(Boundary),
}

impl From<BoundaryRepr> for Boundary {
    fn from(repr: BoundaryRepr) -> Self {
        match repr {
            BoundaryRepr::Pair(start, end) => Boundary { start, end },
            BoundaryRepr::Object(b) => b,
        }
    }
}

/// Check that boundary start times are finite, non-negative and ascending
///
/// # Errors
/// * `InvalidInput` - naming the first offending boundary
pub fn validate_boundaries(boundaries: &[Boundary]) -> Result<()> {
    let mut previous = 0.0_f64;
    for (i, boundary) in boundaries.iter().enumerate() {
        if !boundary.start.is_finite() || boundary.start < 0.0 {
            return Err(SoundError::invalid(format!(
                "boundary {} has invalid start time {}",
                i, boundary.start
            )));
        }
        if boundary.start < previous {
            return Err(SoundError::invalid(format!(
                "boundaries are not sorted: boundary {} starts at {}s, before {}s",
                i, boundary.start, previous
            )));
        }
        previous = boundary.start;
    }
    Ok(())
}

/// Parse a JSON boundary list
pub fn parse_boundaries(json: &str) -> Result<Vec<Boundary>> {
    let raw: Vec<BoundaryRepr> = serde_json::from_str(json)?;
    let boundaries: Vec<Boundary> = raw.into_iter().map(Boundary::from).collect();
    validate_boundaries(&boundaries)?;
    Ok(boundaries)
}

/// Load a JSON boundary list produced by an external silence detector
pub fn load_boundaries<P: AsRef<Path>>(path: P) -> Result<Vec<Boundary>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SoundError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    parse_boundaries(&fs::read_to_string(path)?)
}

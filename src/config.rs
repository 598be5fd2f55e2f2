//! Pipeline configuration
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change. Command-line flags are applied on top of the loaded values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detect::DetectorConfig;
use crate::dsp::{Transform, TransformChain, TransformKind};
use crate::error::{Result, SoundError};
use crate::pipeline::Pipeline;

/// Settings for one split/transform/reassemble run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Silence detector parameters
    pub detector: DetectorConfig,
    /// Per-segment transforms, applied in order
    pub transforms: Vec<TransformKind>,
    /// Transform segments on worker threads
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            transforms: vec![TransformKind::Reverse],
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Load a config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SoundError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let config: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file or default values
    ///
    /// An empty `transforms` list keeps the configured transforms.
    pub fn with_overrides(mut self, transforms: &[TransformKind], parallel: bool) -> Self {
        if !transforms.is_empty() {
            self.transforms = transforms.to_vec();
        }
        self.parallel |= parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.detector.validate()
    }

    /// Build the pipeline these settings describe
    pub fn build_pipeline(&self) -> Pipeline {
        let transform: Box<dyn Transform> = match self.transforms.as_slice() {
            [single] => single.build(),
            kinds => Box::new(TransformChain::from_kinds(kinds)),
        };
        Pipeline::new(transform).with_parallel(self.parallel)
    }
}

//! Soundsplit - split, transform and reassemble stereo audio clips
//!
//! A clip is loaded from a 16-bit WAV file into an in-memory [`Sound`], cut
//! into segments at the start of every silence interval, each segment is
//! transformed independently, and the results are stitched back together in
//! their original order.
//!
//! # Architecture
//!
//! - `engine`: the `Sound` value and WAV I/O
//! - `dsp`: pure `Sound -> Sound` transforms (reverse, invert, vocal removal)
//! - `detect`: silence boundary sources
//! - `pipeline`: partition, per-segment transform and reassembly
//! - `cli`: command-line front end

pub mod cli;
pub mod config;
pub mod detect;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use engine::Sound;
pub use error::{Result, SoundError};
pub use pipeline::{concatenate, partition, split_and_transform, Boundary, Pipeline};

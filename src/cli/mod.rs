//! CLI Module
//!
//! Command-line interface for the soundsplit pipeline.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::dsp::TransformKind;

/// Soundsplit - split WAV clips at silence and transform each piece
#[derive(Parser, Debug)]
#[command(name = "soundsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON pipeline configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split at silence, transform every segment and stitch the result
    #[command(name = "split-reverse")]
    SplitReverse {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file (default: <stem>_split-reverse.wav next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON boundary list to use instead of detecting silence
        #[arg(short, long)]
        boundaries: Option<PathBuf>,

        /// Per-segment transforms, applied in order (default: reverse)
        #[arg(short, long, value_enum)]
        transform: Vec<TransformKind>,

        /// Transform segments on worker threads
        #[arg(long)]
        parallel: bool,
    },

    /// Write every segment to its own file
    #[command(name = "split")]
    Split {
        /// Input WAV file
        input: PathBuf,

        /// Output directory (default: next to the input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// JSON boundary list to use instead of detecting silence
        #[arg(short, long)]
        boundaries: Option<PathBuf>,
    },

    /// Apply transforms to the whole clip
    #[command(name = "apply")]
    Apply {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Transforms, applied in order
        #[arg(short, long, value_enum, required = true)]
        transform: Vec<TransformKind>,
    },

    /// Run split-reverse over every WAV file in a directory
    #[command(name = "batch")]
    Batch {
        /// Directory to search for WAV files
        dir: PathBuf,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print detected silence boundaries as JSON
    #[command(name = "detect")]
    Detect {
        /// Input WAV file
        input: PathBuf,
    },

    /// Write a stereo sine test tone
    #[command(name = "tone")]
    Tone {
        /// Output WAV file
        output: PathBuf,

        /// Frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f32,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f32,

        /// Sample rate in Hz
        #[arg(short, long, default_value_t = 44100)]
        rate: u32,
    },
}

//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. Everything here is file
//! handling around the pure pipeline in `crate::pipeline`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::PipelineConfig;
use crate::detect::{EnergyDetector, SilenceDetector, StaticBoundaries};
use crate::dsp::{Transform, TransformChain, TransformKind};
use crate::engine::{load_wav, sine, write_wav};
use crate::error::{Result, SoundError};
use crate::pipeline::{load_boundaries, segment_ranges, Boundary};

/// Suffix appended to the input stem for split-reverse output
pub const SPLIT_REVERSE_SUFFIX: &str = "split-reverse";

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written
    pub written: Vec<PathBuf>,
    /// Inputs that failed, with their error kind and message
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    fn record_failure(&mut self, path: PathBuf, err: SoundError) {
        warn!(code = err.error_code(), "Skipping {}: {}", path.display(), err);
        self.failed.push(BatchFailure {
            path,
            code: err.error_code(),
            message: err.to_string(),
        });
    }
}

#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub code: &'static str,
    pub message: String,
}

/// Input file name without directory or `.wav` extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sound".to_string())
}

/// File name for split segment `index` covering `start..end` seconds
///
/// The index keeps names distinct when two spans round to the same value.
pub fn split_file_name(stem: &str, index: usize, start: f64, end: f64) -> String {
    format!("{}_{:02}_{:.2}-{:.2}.wav", stem, index, start, end)
}

/// Default split-reverse output path: `<dir>/<stem>_split-reverse.wav`
pub fn split_reverse_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}_{}.wav", file_stem(input), SPLIT_REVERSE_SUFFIX))
}

/// Pick the boundary source: a JSON file if given, otherwise the detector
fn boundary_source(
    boundaries: Option<&Path>,
    config: &PipelineConfig,
) -> Result<Box<dyn SilenceDetector>> {
    match boundaries {
        Some(path) => Ok(Box::new(StaticBoundaries(load_boundaries(path)?))),
        None => Ok(Box::new(EnergyDetector::new(config.detector.clone())?)),
    }
}

/// Split at silence, transform each segment, and write the stitched result.
pub fn split_reverse(
    input: &Path,
    output: Option<&Path>,
    boundaries: Option<&Path>,
    config: &PipelineConfig,
) -> Result<PathBuf> {
    info!("Processing: {}", input.display());

    let sound = load_wav(input)?;
    let detected = boundary_source(boundaries, config)?.detect(&sound);
    let pipeline = config.build_pipeline();
    let result = pipeline.run(&sound, &detected)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| split_reverse_path(input, None));
    write_wav(&result, &output)?;

    info!(
        segments = detected.len() + 1,
        transform = pipeline.transform_name(),
        "Wrote {}",
        output.display()
    );
    println!("{} -> {}", input.display(), output.display());

    Ok(output)
}

/// Write each segment to `<stem>_<index>_<start>-<end>.wav`.
///
/// `start` and `end` are the segment's own span in seconds.
pub fn write_splits(
    input: &Path,
    output_dir: Option<&Path>,
    boundaries: Option<&Path>,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>> {
    info!("Splitting: {}", input.display());

    let sound = load_wav(input)?;
    let detected = boundary_source(boundaries, config)?.detect(&sound);
    let ranges = segment_ranges(&sound, &detected)?;

    let dir = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.to_path_buf()
        }
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    let stem = file_stem(input);
    let rate = sound.rate() as f64;
    let mut written = Vec::with_capacity(ranges.len());

    for (index, range) in ranges.into_iter().enumerate() {
        let start = range.start as f64 / rate;
        let end = range.end as f64 / rate;
        let path = dir.join(split_file_name(&stem, index, start, end));
        write_wav(&sound.slice(range), &path)?;
        println!("{}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Apply transforms to the whole clip.
pub fn apply(input: &Path, output: &Path, transforms: &[TransformKind]) -> Result<()> {
    if transforms.is_empty() {
        return Err(SoundError::invalid("at least one transform is required"));
    }

    let sound = load_wav(input)?;
    let chain = TransformChain::from_kinds(transforms);
    write_wav(&chain.apply(&sound), output)?;

    info!(transforms = ?chain.names(), "Wrote {}", output.display());
    println!("{} -> {}", input.display(), output.display());
    Ok(())
}

/// Run split-reverse on every `.wav` file under `dir`.
///
/// A failing file is recorded in the report and does not stop the batch. So is
/// an entry the directory walk cannot read. Earlier split-reverse outputs are
/// not taken as inputs.
pub fn batch(
    dir: &Path,
    output_dir: Option<&Path>,
    config: &PipelineConfig,
) -> Result<BatchReport> {
    if !dir.is_dir() {
        return Err(SoundError::FileNotFound {
            path: dir.display().to_string(),
        });
    }
    if let Some(out) = output_dir {
        fs::create_dir_all(out)?;
    }

    let mut report = BatchReport::default();

    // Collected up front so files written during the run are not picked up.
    let mut inputs: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_batch_input(entry.path()) {
                    inputs.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                report.record_failure(path, SoundError::Io(e.into()));
            }
        }
    }
    inputs.sort();

    for input in inputs {
        let output = split_reverse_path(&input, output_dir);
        match split_reverse(&input, Some(output.as_path()), None, config) {
            Ok(path) => report.written.push(path),
            Err(e) => report.record_failure(input, e),
        }
    }

    println!(
        "Batch complete: {} written, {} failed",
        report.written.len(),
        report.failed.len()
    );
    for failure in &report.failed {
        println!("  [{}] {}: {}", failure.code, failure.path.display(), failure.message);
    }

    Ok(report)
}

/// Detect silence and print the boundaries as JSON.
pub fn detect(input: &Path, config: &PipelineConfig) -> Result<Vec<Boundary>> {
    let sound = load_wav(input)?;
    let detector = EnergyDetector::new(config.detector.clone())?;
    let boundaries = detector.detect(&sound);

    println!("{}", serde_json::to_string_pretty(&boundaries)?);
    Ok(boundaries)
}

/// Write a sine test tone.
pub fn tone(output: &Path, frequency: f32, duration: f32, rate: u32) -> Result<()> {
    let sound = sine(frequency, duration, rate)?;
    write_wav(&sound, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// A `.wav` file that is not itself split-reverse output
fn is_batch_input(path: &Path) -> bool {
    let suffix = format!("_{}", SPLIT_REVERSE_SUFFIX);
    is_wav(path) && !file_stem(path).ends_with(&suffix)
}

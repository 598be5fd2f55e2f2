//! WAV file I/O for soundsplit
//!
//! Only 16-bit integer PCM is supported. Mono files are widened to stereo on
//! import by duplicating the single channel; export always writes stereo.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use crate::engine::sound::Sound;
use crate::error::{Result, SoundError};

/// Sample width accepted and produced by the codec
pub const BITS_PER_SAMPLE: u16 = 16;

/// Scale between a normalized sample and a 16-bit integer sample
const SAMPLE_SCALE: f32 = 32768.0;

/// Load a WAV file into a `Sound`
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `AudioRead` - If the container cannot be parsed
/// * `UnsupportedFormat` - If the file is not 16-bit integer mono/stereo
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<Sound> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SoundError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let sound = read_wav(BufReader::new(file), &path.display().to_string())?;

    debug!(
        path = %path.display(),
        rate = sound.rate(),
        samples = sound.len(),
        "loaded wav"
    );
    Ok(sound)
}

/// Decode WAV data from any reader
pub fn decode_wav<R: Read>(reader: R) -> Result<Sound> {
    read_wav(reader, "<stream>")
}

/// Write a `Sound` to a 16-bit stereo WAV file
pub fn write_wav<P: AsRef<Path>>(sound: &Sound, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_wav_to(sound, BufWriter::new(file), &path.display().to_string())?;

    debug!(path = %path.display(), samples = sound.len(), "wrote wav");
    Ok(())
}

/// Encode a `Sound` as 16-bit stereo WAV into any seekable writer
pub fn encode_wav<W: Write + Seek>(sound: &Sound, writer: W) -> Result<()> {
    write_wav_to(sound, writer, "<stream>")
}

/// Convert a normalized sample to a 16-bit integer sample
///
/// The value is clamped to [-1.0, 1.0] first, then rounded and saturated
/// so that +1.0 maps to 32767.
pub fn quantize(sample: f32) -> i16 {
    let scaled = (sample.clamp(-1.0, 1.0) * SAMPLE_SCALE).round();
    scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Convert a 16-bit integer sample to a normalized sample
pub fn dequantize(sample: i16) -> f32 {
    sample as f32 / SAMPLE_SCALE
}

/// Generate a stereo sine tone, the same wave in both channels
pub fn sine(frequency: f32, duration_secs: f32, rate: u32) -> Result<Sound> {
    let num_samples = (duration_secs * rate as f32) as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / rate as f32;

    let samples: Vec<f32> = (0..num_samples)
        .map(|i| (angular_freq * i as f32).sin())
        .collect();

    Sound::from_mono(rate, samples)
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn read_wav<R: Read>(reader: R, label: &str) -> Result<Sound> {
    let reader = WavReader::new(reader).map_err(|e| SoundError::AudioRead {
        path: label.to_string(),
        source: e,
    })?;

    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(SoundError::UnsupportedFormat {
            details: format!(
                "{}-bit {:?} audio (only 16-bit integer supported)",
                spec.bits_per_sample, spec.sample_format
            ),
        });
    }

    let channels = spec.channels as usize;
    if channels == 0 || channels > 2 {
        return Err(SoundError::UnsupportedFormat {
            details: format!("{}-channel audio (only mono/stereo supported)", channels),
        });
    }

    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(dequantize))
        .collect::<std::result::Result<Vec<f32>, _>>()
        .map_err(|e| SoundError::AudioRead {
            path: label.to_string(),
            source: e,
        })?;

    if channels == 1 {
        return Sound::from_mono(spec.sample_rate, samples);
    }

    let (left, right) = deinterleave(&samples);
    Sound::new(spec.sample_rate, left, right)
}

fn write_wav_to<W: Write + Seek>(sound: &Sound, writer: W, label: &str) -> Result<()> {
    sound.validate()?;

    let spec = WavSpec {
        channels: 2,
        sample_rate: sound.rate(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let write_err = |e: hound::Error| SoundError::AudioWrite {
        path: label.to_string(),
        source: e,
    };

    let mut writer = WavWriter::new(writer, spec).map_err(write_err)?;
    for (&l, &r) in sound.left().iter().zip(sound.right()) {
        writer.write_sample(quantize(l)).map_err(write_err)?;
        writer.write_sample(quantize(r)).map_err(write_err)?;
    }
    writer.finalize().map_err(write_err)?;

    Ok(())
}

/// De-interleave [L,R,L,R,...] into separate channels
///
/// A trailing half frame is dropped.
fn deinterleave(samples: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let frames = samples.len() / 2;
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);

    for frame in samples.chunks_exact(2) {
        left.push(frame[0]);
        right.push(frame[1]);
    }

    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn write_raw(path: &Path, channels: u16, bits: u16, samples: &[i32]) {
        let spec = WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: bits,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize(1.0), i16::MAX);
        assert_eq!(quantize(7.5), i16::MAX);
        assert_eq!(quantize(-1.0), i16::MIN);
        assert_eq!(quantize(-3.0), i16::MIN);
        assert_eq!(quantize(0.0), 0);
    }

    #[test]
    fn test_dequantize_quantize_is_lossless() {
        for value in [i16::MIN, -12345, -1, 0, 1, 4096, i16::MAX] {
            assert_eq!(quantize(dequantize(value)), value);
        }
    }

    #[test]
    fn test_deinterleave() {
        let (left, right) = deinterleave(&[1.0, 5.0, 2.0, 6.0, 3.0]);
        assert_eq!(left, vec![1.0, 2.0]);
        assert_eq!(right, vec![5.0, 6.0]);
    }

    #[test]
    fn test_sine_length_and_channels() {
        let tone = sine(440.0, 0.5, 8000).unwrap();
        assert_eq!(tone.len(), 4000);
        assert_eq!(tone.left(), tone.right());
    }

    #[test]
    fn test_round_trip_in_memory() {
        let original = Sound::new(8000, vec![0.25, -0.5, 0.75], vec![-0.25, 0.5, 0.0]).unwrap();

        let mut cursor = Cursor::new(Vec::new());
        encode_wav(&original, &mut cursor).unwrap();
        cursor.set_position(0);
        let decoded = decode_wav(cursor).unwrap();

        assert_eq!(decoded.rate(), 8000);
        assert_eq!(decoded.len(), 3);
        for (a, b) in original.left().iter().zip(decoded.left()) {
            assert!((a - b).abs() <= 1.0 / 32768.0);
        }
    }

    #[test]
    fn test_mono_file_is_duplicated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_raw(&path, 1, 16, &[0, 16384, -16384, 32767]);

        let sound = load_wav(&path).unwrap();
        assert_eq!(sound.len(), 4);
        assert_eq!(sound.left(), sound.right());
        assert_eq!(sound.left()[1], 0.5);
    }

    #[test]
    fn test_stereo_file_is_split() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_raw(&path, 2, 16, &[16384, -16384, 8192, -8192]);

        let sound = load_wav(&path).unwrap();
        assert_eq!(sound.left(), &[0.5, 0.25]);
        assert_eq!(sound.right(), &[-0.5, -0.25]);
    }

    #[test]
    fn test_24bit_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep.wav");
        write_raw(&path, 2, 24, &[0, 0, 100, -100]);

        let result = load_wav(&path);
        assert!(matches!(result, Err(SoundError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_garbage_is_unsupported_format() {
        let result = decode_wav(Cursor::new(b"definitely not a wav file".to_vec()));
        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_wav("/nonexistent/path/audio.wav");
        match result.unwrap_err() {
            SoundError::FileNotFound { path } => assert!(path.contains("nonexistent")),
            other => panic!("Expected FileNotFound error, got: {:?}", other),
        }
    }
}

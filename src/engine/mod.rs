//! Audio Engine Module
//!
//! Core sound handling:
//! - In-memory stereo sound value
//! - WAV file I/O operations

pub mod io;
pub mod sound;

pub use io::{decode_wav, encode_wav, load_wav, sine, write_wav};
pub use sound::Sound;

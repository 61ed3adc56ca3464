//! File I/O and offline rendering for the muros wall filter.
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`]
//! - **Offline rendering**: [`render`] drives a `WallProcessor` through a
//!   stereo buffer block by block, the way a real-time host would

mod render;
mod wav;

pub use render::render;
pub use wav::{
    StereoSamples, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav_stereo,
};

/// Error types for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for file I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

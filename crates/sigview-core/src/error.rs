//! Codec error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding an audio source
///
/// Decode is all-or-nothing: no partial buffer is ever returned, and retry
/// policy belongs to the caller that owns the source.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to read audio source: {path:?}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("no audio track found in source")]
    NoAudioTrack,

    #[error("source does not declare a sample rate")]
    UnknownSampleRate,
}

/// Errors that can occur while writing an encoded buffer to disk
///
/// hound wraps the underlying I/O failure, so one variant covers both
/// filesystem and encoding problems.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

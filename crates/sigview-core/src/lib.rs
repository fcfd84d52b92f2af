//! SigView Core - signal buffers and the PCM audio codec
//!
//! This crate owns the data model shared by the viewer crates: mono float
//! sample buffers with a derived time axis, decode of audio sources into
//! those buffers, and encode back into a canonical playable WAV container.

pub mod codec;
pub mod error;
pub mod types;

pub use error::{DecodeError, EncodeError};
pub use types::SignalBuffer;

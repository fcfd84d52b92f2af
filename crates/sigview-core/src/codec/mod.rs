//! Audio decode/encode between sample buffers and playable containers
//!
//! Decode runs on Symphonia and accepts anything the enabled format/codec
//! features cover (WAV/PCM plus MP3 and FLAC uploads). Only the first channel
//! is kept: the viewer renders mono signals, matching the signal the encoder
//! produces. Encode lives in [`pcm`] and emits a canonical 44-byte mono
//! 16-bit PCM WAV container.

pub mod pcm;

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{DecodeError, EncodeError, Result};
use crate::types::SignalBuffer;

pub use pcm::PcmContainer;

/// Decode an audio file into a mono signal at its native sample rate
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<SignalBuffer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DecodeError::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    // A hint with the file extension speeds up format probing
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    decode_source(Box::new(file), hint)
}

/// Decode an in-memory audio payload into a mono signal
///
/// `extension` is an optional format hint (e.g. `"wav"`, `"mp3"`) taken from
/// wherever the bytes came from; probing works without it.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<SignalBuffer> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    decode_source(Box::new(Cursor::new(bytes)), hint)
}

/// Decode a file and rescale so the peak absolute sample equals 1.0
pub fn decode_file_normalized<P: AsRef<Path>>(path: P) -> Result<SignalBuffer> {
    Ok(decode_file(path)?.normalized())
}

/// Decode an in-memory payload and rescale to unit peak
pub fn decode_bytes_normalized(bytes: Vec<u8>, extension: Option<&str>) -> Result<SignalBuffer> {
    Ok(decode_bytes(bytes, extension)?.normalized())
}

/// Shared Symphonia decode loop: probe, pick the first audio track, decode
/// every packet, keep channel 0 of the interleaved output
fn decode_source(source: Box<dyn MediaSource>, hint: Hint) -> Result<SignalBuffer> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels = 1usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("error reading packet: {}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("error decoding packet: {}", e);
                continue;
            }
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            channels = spec.channels.count().max(1);
            let duration = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(duration, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            // First channel only; remaining channels are discarded
            samples.extend(buf.samples().iter().step_by(channels));
        }
    }

    log::debug!(
        "decoded {} samples at {} Hz ({} source channels)",
        samples.len(),
        sample_rate,
        channels
    );

    Ok(SignalBuffer::new(samples, sample_rate))
}

/// Write a signal buffer to disk as mono 16-bit PCM WAV
///
/// Uses the same clamp-and-scale quantization as [`PcmContainer::encode`],
/// so a file written here is byte-identical in payload to the in-memory
/// container for the same buffer.
pub fn write_wav_file<P: AsRef<Path>>(
    path: P,
    buffer: &SignalBuffer,
) -> std::result::Result<(), EncodeError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for &s in buffer.samples() {
        writer.write_sample(pcm::sample_to_i16(s))?;
    }
    writer.finalize()?;

    log::info!(
        "wrote {} samples at {} Hz to {:?}",
        buffer.len(),
        buffer.sample_rate(),
        path.as_ref()
    );

    Ok(())
}

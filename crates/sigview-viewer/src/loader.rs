//! Background signal loader
//!
//! Moves decode work (file I/O, format probing, channel extraction) off the
//! UI thread so a large upload never stalls interaction. One long-lived
//! worker thread serves all viewer slots; requests and results flow over
//! mpsc channels and the UI polls `try_recv` once per frame.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use sigview_core::SignalBuffer;

/// Request to decode a signal in the background
#[derive(Debug)]
pub struct LoadRequest {
    /// Which viewer slot the signal is destined for
    pub slot: usize,
    /// Path to the audio file
    pub path: PathBuf,
    /// Rescale to unit peak after decode
    pub normalize: bool,
}

/// Result of a background load
///
/// Errors are carried as display strings: the UI shows them verbatim and
/// never needs to match on the failure kind.
#[derive(Debug)]
pub struct LoadResult {
    /// Slot from the originating request
    pub slot: usize,
    /// Decoded signal or an error message
    pub result: Result<SignalBuffer, String>,
}

/// Handle to the background loader thread
pub struct SignalLoader {
    tx: Sender<LoadRequest>,
    rx: Receiver<LoadResult>,
    _handle: JoinHandle<()>,
}

impl SignalLoader {
    /// Spawn the background loader thread
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<LoadRequest>();
        let (result_tx, result_rx) = std::sync::mpsc::channel::<LoadResult>();

        let handle = thread::Builder::new()
            .name("signal-loader".to_string())
            .spawn(move || {
                loader_thread(request_rx, result_tx);
            })
            .expect("Failed to spawn signal loader thread");

        Self {
            tx: request_tx,
            rx: result_rx,
            _handle: handle,
        }
    }

    /// Request decoding a file (non-blocking)
    pub fn load(&self, slot: usize, path: PathBuf, normalize: bool) -> Result<(), String> {
        self.tx
            .send(LoadRequest {
                slot,
                path,
                normalize,
            })
            .map_err(|e| format!("Loader thread disconnected: {}", e))
    }

    /// Try to receive a completed load (non-blocking)
    pub fn try_recv(&self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Loader thread disconnected unexpectedly");
                None
            }
        }
    }
}

/// The background loader thread function
fn loader_thread(rx: Receiver<LoadRequest>, tx: Sender<LoadResult>) {
    log::info!("Signal loader thread started");

    while let Ok(request) = rx.recv() {
        let start = std::time::Instant::now();

        let result = if request.normalize {
            sigview_core::codec::decode_file_normalized(&request.path)
        } else {
            sigview_core::codec::decode_file(&request.path)
        };

        match &result {
            Ok(buffer) => log::info!(
                "Loaded {:?} for slot {}: {} samples at {} Hz in {:?}",
                request.path,
                request.slot,
                buffer.len(),
                buffer.sample_rate(),
                start.elapsed()
            ),
            Err(e) => log::error!("Failed to load {:?}: {}", request.path, e),
        }

        let send = tx.send(LoadResult {
            slot: request.slot,
            result: result.map_err(|e| e.to_string()),
        });
        if send.is_err() {
            // Receiver dropped; no one is listening anymore
            break;
        }
    }

    log::info!("Signal loader thread shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn recv_blocking(loader: &SignalLoader) -> LoadResult {
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = loader.try_recv() {
                return result;
            }
            assert!(std::time::Instant::now() < deadline, "loader timed out");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_load_decodes_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let buffer = SignalBuffer::new(vec![0.5, -0.5, 0.25, -0.25], 8000);
        sigview_core::codec::write_wav_file(&path, &buffer).unwrap();

        let loader = SignalLoader::spawn();
        loader.load(3, path, false).unwrap();

        let result = recv_blocking(&loader);
        assert_eq!(result.slot, 3);
        let loaded = result.result.unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded.sample_rate(), 8000);
    }

    #[test]
    fn test_load_with_normalize_rescales_peak() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiet.wav");
        let buffer = SignalBuffer::new(vec![0.25, -0.125, 0.0625], 8000);
        sigview_core::codec::write_wav_file(&path, &buffer).unwrap();

        let loader = SignalLoader::spawn();
        loader.load(0, path, true).unwrap();

        let result = recv_blocking(&loader);
        let loaded = result.result.unwrap();
        assert!((loaded.peak() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_missing_file_reports_error_string() {
        let loader = SignalLoader::spawn();
        loader
            .load(1, PathBuf::from("/nonexistent/signal.wav"), false)
            .unwrap();

        let result = recv_blocking(&loader);
        assert_eq!(result.slot, 1);
        assert!(result.result.is_err());
    }

    #[test]
    fn test_try_recv_empty_returns_none() {
        let loader = SignalLoader::spawn();
        assert!(loader.try_recv().is_none());
    }
}

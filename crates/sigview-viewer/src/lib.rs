//! SigView Viewer - viewport and playback synchronization engine
//!
//! State and pure transition functions for interactive signal display:
//! zoom/pan viewport math with strided decimation under a point budget,
//! played/unplayed partitioning around a live playback position, axis
//! scale transforms for audiogram-style spectrum display, and a background
//! loader that keeps decode off the UI thread.
//!
//! Rendering is an external collaborator: it re-reads viewer state after
//! each transition and draws the materialized traces. Nothing in this crate
//! touches a widget toolkit.

pub mod config;
pub mod loader;
pub mod playback;
pub mod scale;
pub mod trace;
pub mod viewport;

pub use config::{ViewerConfig, ViewerMode};
pub use playback::{Transport, TransportState};
pub use scale::ScaleKind;
pub use trace::{SpectrumScale, SpectrumTrace, TracePoint, TraceSet};
pub use viewport::{ViewportConfig, ViewportState, VisibleWindow};

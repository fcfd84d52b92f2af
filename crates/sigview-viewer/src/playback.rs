//! Playback transport state and played/unplayed partitioning
//!
//! The transport mirrors whatever audio element actually produces sound; it
//! never advances time itself. The embedding application feeds position
//! updates in (`set_position`) as playback progresses and reads the state
//! back out to restyle traces.

use crate::trace::TracePoint;

/// Lowest accepted playback speed multiplier
pub const MIN_SPEED: f64 = 0.25;

/// Highest accepted playback speed multiplier
pub const MAX_SPEED: f64 = 2.0;

/// Transport lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Not playing; position is 0
    #[default]
    Stopped,
    /// Position advances with the audio clock
    Playing,
    /// Not playing; position retained for resume
    Paused,
}

/// Playback position, state, and speed for one signal
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    state: TransportState,
    position: f64,
    speed: f64,
}

impl Transport {
    /// A stopped transport at position 0, speed 1
    pub fn new() -> Self {
        Self {
            state: TransportState::Stopped,
            position: 0.0,
            speed: 1.0,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Current playback position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current speed multiplier in [MIN_SPEED, MAX_SPEED]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Begin or resume playback from the current position
    pub fn play(&mut self) {
        self.state = TransportState::Playing;
    }

    /// Halt playback, keeping the position for resume
    pub fn pause(&mut self) {
        if self.state == TransportState::Playing {
            self.state = TransportState::Paused;
        }
    }

    /// Halt playback and rewind to 0
    ///
    /// Also the handler for natural end-of-signal.
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        self.position = 0.0;
    }

    /// Accept a position update from the audio clock (negative values clamp to 0)
    pub fn set_position(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    /// Set the speed multiplier, clamped into the supported range
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

/// Split trace points at the playback position
///
/// Points with `time <= current_time` land in the played half, the rest in
/// the unplayed half. Single left-to-right scan; input order is preserved
/// and no point is dropped or duplicated.
pub fn partition(points: &[TracePoint], current_time: f64) -> (Vec<TracePoint>, Vec<TracePoint>) {
    let mut played = Vec::new();
    let mut unplayed = Vec::new();
    for point in points {
        if point.time <= current_time {
            played.push(*point);
        } else {
            unplayed.push(*point);
        }
    }
    (played, unplayed)
}

/// Whether the playback marker falls inside the visible time range
///
/// Inclusive on both ends so the marker stays drawn at the exact window
/// edges. An empty window shows no marker.
pub fn marker_visible(points: &[TracePoint], current_time: f64) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => current_time >= first.time && current_time <= last.time,
        _ => false,
    }
}

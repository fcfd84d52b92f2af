//! Renderable trace materialization
//!
//! Bridges viewer state to whatever actually draws: a trace set is the
//! complete, self-contained description of one frame (played segment,
//! unplayed segment, optional playback marker), recomputed from scratch on
//! every state change rather than patched incrementally.

use sigview_core::SignalBuffer;

use crate::playback::{marker_visible, partition};
use crate::scale::ScaleKind;
use crate::viewport::ViewportState;

/// One renderable sample: a time/value pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    /// Position on the time axis in seconds
    pub time: f64,
    /// Amplitude at that time
    pub value: f32,
}

/// Vertical playback marker spanning the visible value range
///
/// `min`/`max` are taken from the currently visible points so the marker
/// always covers exactly the drawn trace, regardless of zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Time of the playback position in seconds
    pub time: f64,
    /// Lowest visible amplitude
    pub min: f32,
    /// Highest visible amplitude
    pub max: f32,
}

/// Everything a renderer needs for one time-domain frame
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSet {
    /// Points at or before the playback position
    pub played: Vec<TracePoint>,
    /// Points after the playback position
    pub unplayed: Vec<TracePoint>,
    /// Playback marker, present only while it falls inside the window
    pub marker: Option<Marker>,
}

impl TraceSet {
    /// The empty frame: nothing to draw, clear the display
    pub fn empty() -> Self {
        Self {
            played: Vec::new(),
            unplayed: Vec::new(),
            marker: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty() && self.unplayed.is_empty()
    }

    /// Total number of points across both segments
    pub fn point_count(&self) -> usize {
        self.played.len() + self.unplayed.len()
    }
}

/// Materialize the visible window of a signal into a renderable frame
///
/// Applies the viewport (range and stride), splits at `current_time`, and
/// places the marker if the playback position is inside the window. An empty
/// buffer yields the empty frame.
pub fn build_signal_traces(
    buffer: &SignalBuffer,
    viewport: &ViewportState,
    current_time: f64,
) -> TraceSet {
    let window = viewport.visible_window(buffer.len());
    if window.is_empty() {
        return TraceSet::empty();
    }

    let samples = buffer.samples();
    let points: Vec<TracePoint> = window
        .indices()
        .map(|i| TracePoint {
            time: buffer.time_at(i),
            value: samples[i],
        })
        .collect();

    let marker = if marker_visible(&points, current_time) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for p in &points {
            min = min.min(p.value);
            max = max.max(p.value);
        }
        Some(Marker {
            time: current_time,
            min,
            max,
        })
    } else {
        None
    };

    let (played, unplayed) = partition(&points, current_time);

    TraceSet {
        played,
        unplayed,
        marker,
    }
}

/// Axis scaling preset for spectrum frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumScale {
    /// Raw frequency and magnitude
    #[default]
    Linear,
    /// Audiogram view: log-frequency x axis, decibel y axis
    Audiogram,
}

impl SpectrumScale {
    /// Scale applied to the frequency axis
    pub fn frequency_scale(self) -> ScaleKind {
        match self {
            SpectrumScale::Linear => ScaleKind::Linear,
            SpectrumScale::Audiogram => ScaleKind::LogFrequency,
        }
    }

    /// Scale applied to the magnitude axis
    pub fn magnitude_scale(self) -> ScaleKind {
        match self {
            SpectrumScale::Linear => ScaleKind::Linear,
            SpectrumScale::Audiogram => ScaleKind::Decibel,
        }
    }

    /// Frequency axis caption
    pub fn frequency_label(self) -> &'static str {
        match self {
            SpectrumScale::Linear => "Frequency (Hz)",
            SpectrumScale::Audiogram => "Log Frequency (log Hz)",
        }
    }

    /// Magnitude axis caption
    pub fn magnitude_label(self) -> &'static str {
        match self {
            SpectrumScale::Linear => "Magnitude",
            SpectrumScale::Audiogram => "Magnitude (dB)",
        }
    }

    /// The other preset
    pub fn toggled(self) -> Self {
        match self {
            SpectrumScale::Linear => SpectrumScale::Audiogram,
            SpectrumScale::Audiogram => SpectrumScale::Linear,
        }
    }
}

/// One renderable spectrum frame with display-space coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTrace {
    /// Frequency axis values after scaling
    pub x: Vec<f32>,
    /// Magnitude axis values after scaling
    pub y: Vec<f32>,
    /// Frequency axis caption
    pub x_label: &'static str,
    /// Magnitude axis caption
    pub y_label: &'static str,
}

/// Materialize the visible window of a spectrum under a scale preset
///
/// Frequency/magnitude pairs beyond the shorter of the two slices are
/// ignored. The viewport windows the bin index range exactly as it does
/// time-domain sample indices.
pub fn build_spectrum_trace(
    frequencies: &[f32],
    magnitudes: &[f32],
    viewport: &ViewportState,
    scale: SpectrumScale,
) -> SpectrumTrace {
    let len = frequencies.len().min(magnitudes.len());
    let window = viewport.visible_window(len);

    let fx = scale.frequency_scale();
    let fy = scale.magnitude_scale();

    let mut x = Vec::with_capacity(window.len());
    let mut y = Vec::with_capacity(window.len());
    for i in window.indices() {
        x.push(fx.apply(frequencies[i]));
        y.push(fy.apply(magnitudes[i]));
    }

    SpectrumTrace {
        x,
        y,
        x_label: scale.frequency_label(),
        y_label: scale.magnitude_label(),
    }
}

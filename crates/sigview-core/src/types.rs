//! Core signal types
//!
//! A `SignalBuffer` is the unit of exchange between the loader, the codec,
//! and the viewer: a mono float sample sequence paired with its sample rate.
//! The time axis is always derived (`time[i] = i / sample_rate`), never
//! stored, so it can never drift out of sync with the samples.

/// Default sample rate in Hz when a source doesn't dictate one
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// A mono signal: ordered amplitude samples plus the rate that defines
/// their time axis
///
/// Samples are expected in [-1, 1] after normalization. Buffers are replaced
/// wholesale on every new load or processing result; viewers only ever
/// borrow them read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SignalBuffer {
    /// Create a buffer from samples and a sample rate
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create an empty buffer at the given sample rate
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// The raw sample slice
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Time in seconds of the sample at `index`
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value (0.0 for an empty buffer)
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Rescale in place so the peak absolute sample equals 1.0
    ///
    /// A silent buffer (peak 0) is left unchanged to avoid division by zero.
    pub fn normalize(&mut self) {
        let peak = self.peak();
        if peak > 0.0 {
            let scale = 1.0 / peak;
            for s in &mut self.samples {
                *s *= scale;
            }
        }
    }

    /// Consuming variant of [`normalize`](Self::normalize)
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Format a position in seconds as `m:ss` for duration readouts
    pub fn format_time(seconds: f64) -> String {
        let total = seconds.max(0.0) as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

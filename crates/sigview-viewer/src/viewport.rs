//! Zoom/pan viewport state and visible-window computation
//!
//! One `ViewportState` per viewer instance. Zoom and offset are the only
//! stored state; everything else (index range, decimation stride) is
//! recomputed on demand from the buffer length, so a buffer swap never
//! leaves stale geometry behind.
//!
//! Decimation is stride-based rather than averaging: it bounds the point
//! count handed to the renderer independent of buffer size and keeps
//! transient peaks visible at the chosen stride. The trade-off (no
//! anti-aliasing) is accepted.

/// Maximum number of points emitted to a renderer per window
pub const DEFAULT_POINT_BUDGET: usize = 2000;

/// Multiplicative zoom step per zoom-in/zoom-out action
pub const ZOOM_STEP: f64 = 1.5;

/// Zoom ceiling for time-domain viewers
pub const TIME_DOMAIN_MAX_ZOOM: f64 = 4000.0;

/// Zoom ceiling for audiogram viewers
pub const AUDIOGRAM_MAX_ZOOM: f64 = 10.0;

/// Per-viewer viewport parameters
///
/// The zoom ceilings differ between viewer variants, so they are
/// configuration rather than constants. `max_zoom: None` means uncapped
/// (frequency-domain viewers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Multiplicative step applied by zoom_in/zoom_out
    pub zoom_step: f64,
    /// Saturating zoom ceiling; `None` means no ceiling
    pub max_zoom: Option<f64>,
    /// Maximum points emitted per visible window
    pub point_budget: usize,
}

impl ViewportConfig {
    /// Preset for time-domain signal viewers (generous 4000x ceiling)
    pub fn time_domain() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            max_zoom: Some(TIME_DOMAIN_MAX_ZOOM),
            point_budget: DEFAULT_POINT_BUDGET,
        }
    }

    /// Preset for frequency-domain viewers (uncapped zoom)
    pub fn frequency_domain() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            max_zoom: None,
            point_budget: DEFAULT_POINT_BUDGET,
        }
    }

    /// Preset for audiogram viewers (tight 10x ceiling)
    pub fn audiogram() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            max_zoom: Some(AUDIOGRAM_MAX_ZOOM),
            point_budget: DEFAULT_POINT_BUDGET,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::time_domain()
    }
}

/// The index range and decimation stride a viewport exposes for rendering
///
/// Emitted indices are `start, start + stride, start + 2*stride, ...`
/// strictly below `end`. An empty window (`start == end`) is the defined
/// result for empty buffers and means "no data, clear the display".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    /// First visible sample index (inclusive)
    pub start: usize,
    /// End of the visible range (exclusive)
    pub end: usize,
    /// Decimation step between emitted indices (>= 1)
    pub stride: usize,
}

impl VisibleWindow {
    /// The empty window
    pub fn empty() -> Self {
        Self {
            start: 0,
            end: 0,
            stride: 1,
        }
    }

    /// Number of indices this window emits
    pub fn len(&self) -> usize {
        (self.end - self.start).div_ceil(self.stride)
    }

    /// Check whether the window emits nothing
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Iterator over the emitted sample indices
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(self.stride.max(1))
    }
}

/// Zoom factor and pan offset for one viewer instance
///
/// Invariants maintained by every mutation:
/// - `zoom >= 1` (cannot zoom out past the full buffer)
/// - `offset` in `[0, max(0, 1 - 1/zoom)]`, re-clamped after every zoom
///   change and every pan, so an out-of-range offset is never observable.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    zoom: f64,
    offset: f64,
    config: ViewportConfig,
}

impl ViewportState {
    /// Create a viewport at rest (zoom 1, offset 0)
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            zoom: 1.0,
            offset: 0.0,
            config,
        }
    }

    /// Current zoom factor (>= 1)
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in [0, max_offset]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The viewport's configuration
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Largest valid offset at the current zoom
    ///
    /// Shrinks toward 0 as zoom approaches 1: the visible window spans
    /// `1/zoom` of the buffer, so panning can move it by at most `1 - 1/zoom`.
    pub fn max_offset(&self) -> f64 {
        (1.0 - 1.0 / self.zoom).max(0.0)
    }

    /// Zoom in one step, saturating at the configured ceiling
    pub fn zoom_in(&mut self) {
        self.zoom *= self.config.zoom_step;
        if let Some(max) = self.config.max_zoom {
            self.zoom = self.zoom.min(max);
        }
        self.clamp_offset();
    }

    /// Zoom out one step, floored at 1x (the full buffer)
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / self.config.zoom_step).max(1.0);
        self.clamp_offset();
    }

    /// Accept a raw pan value in [0, 1] and re-clamp
    pub fn set_offset(&mut self, value: f64) {
        self.offset = value;
        self.clamp_offset();
    }

    /// Clamp the offset into the range valid at the current zoom
    pub fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Return to the resting state: zoom 1, offset 0
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = 0.0;
    }

    /// Compute the visible index window for a buffer of `total_len` samples
    ///
    /// `visible = floor(total/zoom)`, `start = floor(offset * (total - visible))`,
    /// `end = min(start + visible, total)`, stride chosen so at most
    /// `point_budget` indices are emitted.
    pub fn visible_window(&self, total_len: usize) -> VisibleWindow {
        if total_len == 0 {
            return VisibleWindow::empty();
        }

        let visible = (total_len as f64 / self.zoom).floor() as usize;
        let start = (self.offset * (total_len - visible) as f64).floor() as usize;
        let end = (start + visible).min(total_len);

        let span = end - start;
        let stride = span.div_ceil(self.config.point_budget.max(1)).max(1);

        VisibleWindow { start, end, stride }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example_window() {
        // Buffer length 10000, zoom 2, offset 0.5:
        // visible 5000, start 2500, end 7500, stride ceil(5000/2000) = 3
        let mut vp = ViewportState::new(ViewportConfig::time_domain());
        vp.zoom = 2.0;
        vp.set_offset(0.5);

        let window = vp.visible_window(10_000);
        assert_eq!(window.start, 2500);
        assert_eq!(window.end, 7500);
        assert_eq!(window.stride, 3);
        assert_eq!(window.len(), 1667);

        let indices: Vec<usize> = window.indices().collect();
        assert_eq!(indices.len(), 1667);
        assert_eq!(indices[0], 2500);
        assert_eq!(indices[1], 2503);
        assert!(*indices.last().unwrap() < 7500);
    }

    #[test]
    fn test_window_bounds_and_budget() {
        let mut vp = ViewportState::new(ViewportConfig::frequency_domain());
        for total in [1usize, 7, 1999, 2000, 2001, 123_456] {
            for _ in 0..8 {
                for pan in [0.0, 0.3, 0.99, 1.0] {
                    vp.set_offset(pan);
                    let w = vp.visible_window(total);
                    assert!(w.start <= w.end);
                    assert!(w.end <= total);
                    assert!(w.stride >= 1);
                    assert!(w.len() <= DEFAULT_POINT_BUDGET);
                }
                vp.zoom_in();
            }
            vp.reset();
        }
    }

    #[test]
    fn test_empty_buffer_yields_empty_window() {
        let vp = ViewportState::default();
        let w = vp.visible_window(0);
        assert!(w.is_empty());
        assert_eq!(w.len(), 0);
        assert_eq!(w.indices().count(), 0);
    }

    #[test]
    fn test_zoom_out_floors_at_one() {
        let mut vp = ViewportState::default();
        vp.zoom_out();
        vp.zoom_out();
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), 0.0);
    }

    #[test]
    fn test_zoom_in_saturates_at_ceiling() {
        let mut vp = ViewportState::new(ViewportConfig::audiogram());
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom(), AUDIOGRAM_MAX_ZOOM);

        let mut uncapped = ViewportState::new(ViewportConfig::frequency_domain());
        for _ in 0..50 {
            uncapped.zoom_in();
        }
        assert!(uncapped.zoom() > AUDIOGRAM_MAX_ZOOM);
    }

    #[test]
    fn test_clamp_offset_property() {
        let mut vp = ViewportState::default();
        for zoom_steps in 0..12 {
            for raw in [0.0, 0.1, 0.5, 0.9, 1.0] {
                vp.set_offset(raw);
                let max = (1.0 - 1.0 / vp.zoom()).max(0.0);
                assert!(vp.offset() >= 0.0);
                assert!(vp.offset() <= max + f64::EPSILON);
            }
            let _ = zoom_steps;
            vp.zoom_in();
        }
    }

    #[test]
    fn test_offset_reclamped_when_zooming_out() {
        let mut vp = ViewportState::default();
        for _ in 0..4 {
            vp.zoom_in();
        }
        vp.set_offset(1.0);
        assert!(vp.offset() > 0.0);

        // Zooming back to 1x must drag the offset back to 0
        for _ in 0..4 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), 0.0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut vp = ViewportState::default();
        vp.zoom_in();
        vp.set_offset(0.2);

        vp.reset();
        let once = vp.clone();
        vp.reset();
        assert_eq!(vp, once);
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), 0.0);
    }

    #[test]
    fn test_small_window_uses_stride_one() {
        let mut vp = ViewportState::default();
        for _ in 0..10 {
            vp.zoom_in();
        }
        let w = vp.visible_window(1000);
        assert_eq!(w.stride, 1);
        assert_eq!(w.len(), w.end - w.start);
    }
}

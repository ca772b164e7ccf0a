/// Distance from the true bottom that still counts as having read to the end.
pub const REACHED_END_TOLERANCE_PX: f64 = 50.0;
/// Content this close to the viewport height needs no scrolling at all.
pub const SHORT_CONTENT_SLACK_PX: f64 = 100.0;

/// Geometry of a scrollable region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top
    pub scroll_top: f64,
    /// Height of the visible viewport
    pub client_height: f64,
    /// Total height of the content
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    pub fn reached_end(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - REACHED_END_TOLERANCE_PX
    }

    /// True when the content is short enough that there is nothing to scroll.
    pub fn fits_without_scrolling(&self) -> bool {
        self.scroll_height <= self.client_height + SHORT_CONTENT_SLACK_PX
    }
}

/// Result of feeding one scroll position to the latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollObservation {
    StillReading,
    /// The end was reached for the first time with this observation.
    JustReached,
    AlreadyLatched,
}

/// One-way flag that becomes true once the reader reaches the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollLatch {
    latched: bool,
}

impl ScrollLatch {
    /// Creates a latch for a region with the given initial geometry.
    ///
    /// Content that fits without scrolling starts latched.
    pub fn new(initial: ScrollMetrics) -> Self {
        Self {
            latched: initial.fits_without_scrolling(),
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn observe(&mut self, metrics: ScrollMetrics) -> ScrollObservation {
        if self.latched {
            return ScrollObservation::AlreadyLatched;
        }
        if metrics.reached_end() {
            self.latched = true;
            ScrollObservation::JustReached
        } else {
            ScrollObservation::StillReading
        }
    }
}

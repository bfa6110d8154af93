/// Which part of a file to decode and how strictly to check its rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Start of the range in seconds, negative values start at the first frame
    pub start_seconds: f64,
    /// End of the range in seconds, clamped to the end of the file
    pub end_seconds: f64,
    /// Reject files whose rate differs from
    /// [`TARGET_SAMPLE_RATE`](crate::constants::TARGET_SAMPLE_RATE)
    pub require_standard_rate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            start_seconds: 0.0,
            end_seconds: f64::INFINITY,
            require_standard_rate: true,
        }
    }
}

impl LoadOptions {
    pub fn with_range(start_seconds: f64, end_seconds: f64) -> Self {
        Self {
            start_seconds,
            end_seconds,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn starting_at(mut self, start_seconds: f64) -> Self {
        self.start_seconds = start_seconds;
        self
    }

    #[must_use]
    pub fn ending_at(mut self, end_seconds: f64) -> Self {
        self.end_seconds = end_seconds;
        self
    }

    /// Accept any frame rate, the buffer keeps the file's own rate
    #[must_use]
    pub fn lenient_rate(mut self) -> Self {
        self.require_standard_rate = false;
        self
    }
}

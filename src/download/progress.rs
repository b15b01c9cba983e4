//! Byte counting and percentage progress for a single transfer.

/// Tracks bytes written against an optional declared length.
///
/// The declared length is advisory: it only feeds the percentage, never the
/// reported byte count. Percentages are clamped to `[0, 100]` and never go
/// backwards, even when the server under-declares the length.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    declared_len: Option<u64>,
    bytes_written: u64,
    last_percent: f64,
    last_reported_step: u8,
}

impl ProgressTracker {
    /// Percentage granularity at which [`record`](Self::record) reports a step.
    pub const REPORT_STEP_PERCENT: u8 = 10;

    /// Creates a tracker; a declared length of zero is treated as unknown.
    #[must_use]
    pub fn new(declared_len: Option<u64>) -> Self {
        Self {
            declared_len: declared_len.filter(|len| *len > 0),
            bytes_written: 0,
            last_percent: 0.0,
            last_reported_step: 0,
        }
    }

    /// Records a written chunk.
    ///
    /// Returns the current percentage when it crosses a new
    /// [`REPORT_STEP_PERCENT`](Self::REPORT_STEP_PERCENT) boundary, so callers
    /// can log progress without emitting an event per chunk.
    pub fn record(&mut self, chunk_len: usize) -> Option<f64> {
        self.bytes_written = self.bytes_written.saturating_add(chunk_len as u64);
        let percent = self.percent()?;
        self.last_percent = percent;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let step = (percent as u8 / Self::REPORT_STEP_PERCENT) * Self::REPORT_STEP_PERCENT;
        if step > self.last_reported_step {
            self.last_reported_step = step;
            Some(percent)
        } else {
            None
        }
    }

    /// Total bytes recorded so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The declared length, if one was known.
    #[must_use]
    pub fn declared_len(&self) -> Option<u64> {
        self.declared_len
    }

    /// Current percentage, or `None` without a declared length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> Option<f64> {
        let total = self.declared_len?;
        let raw = self.bytes_written as f64 / total as f64 * 100.0;
        Some(raw.clamp(0.0, 100.0).max(self.last_percent))
    }
}

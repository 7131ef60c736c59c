//! Reporting hooks and the report interval.

use mp_core::Tick;

use crate::Snapshot;

/// Callbacks invoked by [`Model::step`][crate::Model::step] and
/// [`Model::run`][crate::Model::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl Reporter for Printer {
///     fn on_snapshot(&mut self, snapshot: &Snapshot) {
///         println!("{snapshot}");
///     }
/// }
/// ```
pub trait Reporter {
    /// Called at the start of each step, before the clock advances.
    fn on_step_start(&mut self, _step: Tick) {}

    /// Called at the end of each step with the new step index.
    fn on_step_end(&mut self, _step: Tick) {}

    /// Called whenever the report interval has elapsed.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once after [`Model::run`][crate::Model::run] completes.
    fn on_run_end(&mut self, _final_snapshot: &Snapshot) {}
}

/// A [`Reporter`] that does nothing.
pub struct NoopReporter;

impl Reporter for NoopReporter {}

// ── ReportSchedule ────────────────────────────────────────────────────────────

/// Reporting interval plus the last step reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReportSchedule {
    /// Steps between reports.  Always > 0.
    interval:      u64,
    last_reported: Option<Tick>,
}

impl ReportSchedule {
    /// `None` if `interval == 0`.
    pub fn new(interval: u64) -> Option<Self> {
        (interval > 0).then_some(Self { interval, last_reported: None })
    }

    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    #[inline]
    pub fn last_reported(&self) -> Option<Tick> {
        self.last_reported
    }

    /// `true` if nothing has been reported yet or `interval` steps have
    /// passed since the last report.
    pub fn is_due(&self, now: Tick) -> bool {
        match self.last_reported {
            None => true,
            Some(last) => now.since(last) >= self.interval,
        }
    }

    pub fn mark(&mut self, now: Tick) {
        self.last_reported = Some(now);
    }
}

impl Default for ReportSchedule {
    fn default() -> Self {
        Self { interval: 1, last_reported: None }
    }
}

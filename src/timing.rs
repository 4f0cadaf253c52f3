//! Scoped wall-clock timing.
//!
//! A [`ScopedTimer`] measures from creation until it is dropped and logs the
//! elapsed time at `debug` level. Callers place it explicitly around the
//! phases they want measured.

use std::time::{Duration, Instant};

use tracing::debug;

/// Logs the elapsed wall-clock time of a scope when dropped.
///
/// # Example
/// ```
/// use u_festival::timing::ScopedTimer;
///
/// let timer = ScopedTimer::new("phase");
/// let secs = timer.elapsed_secs();
/// assert!(secs >= 0.0);
/// ```
#[derive(Debug)]
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    /// Starts a timer.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Timer label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time elapsed since creation, in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        debug!(
            phase = self.label,
            secs = self.elapsed_secs(),
            "phase finished"
        );
    }
}

/// Runs `f` inside a [`ScopedTimer`] and returns its value with the elapsed time.
pub fn timed<T>(label: &'static str, f: impl FnOnce() -> T) -> (T, Duration) {
    let timer = ScopedTimer::new(label);
    let value = f();
    (value, timer.elapsed())
}

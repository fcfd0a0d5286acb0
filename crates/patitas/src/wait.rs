//! Explicit-wait utilities.
//!
//! All temporal tolerance in the toolkit lives here: page objects never
//! retry internally, they hand a wait budget to the driver or call
//! [`Waiter`] directly. The default budget is 10 seconds with a 50ms poll,
//! overridable per call.

use crate::result::{PatitasError, PatitasResult};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitOutcome {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Blocking condition waiter.
///
/// Polls a predicate until it returns `true` or the budget elapses.
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a waiter with custom options
    #[must_use]
    pub const fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// The configured options
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Wait until `predicate` returns `true`.
    ///
    /// # Errors
    ///
    /// Returns [`PatitasError::Timeout`] if the budget elapses first.
    pub fn wait_for<F>(
        &self,
        description: impl Into<String>,
        predicate: F,
    ) -> PatitasResult<WaitOutcome>
    where
        F: Fn() -> bool,
    {
        let description = description.into();
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll = self.options.poll_interval();

        loop {
            if predicate() {
                return Ok(WaitOutcome {
                    elapsed: start.elapsed(),
                    waited_for: description,
                });
            }
            if start.elapsed() >= timeout {
                return Err(PatitasError::Timeout {
                    ms: self.options.timeout_ms,
                    waiting_for: description,
                });
            }
            std::thread::sleep(poll);
        }
    }

    /// Wait until `read` yields `Ok`, retrying read failures.
    ///
    /// Non-read failures (driver faults) abort the wait immediately.
    pub fn wait_for_value<T, F>(
        &self,
        description: impl Into<String>,
        read: F,
    ) -> PatitasResult<T>
    where
        F: Fn() -> PatitasResult<T>,
    {
        let description = description.into();
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll = self.options.poll_interval();

        loop {
            match read() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_read_failure() => {
                    if start.elapsed() >= timeout {
                        return Err(PatitasError::Timeout {
                            ms: self.options.timeout_ms,
                            waiting_for: description,
                        });
                    }
                    std::thread::sleep(poll);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Wait for a condition with an explicit budget in milliseconds
pub fn wait_until<F>(description: &str, predicate: F, timeout_ms: u64) -> PatitasResult<()>
where
    F: Fn() -> bool,
{
    let waiter = Waiter::with_options(WaitOptions::new().with_timeout(timeout_ms));
    waiter.wait_for(description, predicate)?;
    Ok(())
}

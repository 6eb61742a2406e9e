//! Saving to an output file that another process may hold open
//!
//! Spreadsheet applications keep the file locked while it is open. A save
//! that hits the lock notifies the operator and retries a bounded number of
//! times.

use crate::error::{Error, Result};
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// How often and how patiently to retry a locked save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl LockRetryPolicy {
    /// `max_attempts` counts the first try and is at least 1
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Total attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between attempts
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for LockRetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(2))
    }
}

/// Told each time a save finds the output file locked
pub trait LockNotifier: Send + Sync {
    /// Called after failed attempt `attempt` of `max_attempts`, before the pause
    fn output_locked(&self, path: &Path, attempt: u32, max_attempts: u32);
}

/// Logs a warning and lets the retry delay do the waiting
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LockNotifier for LogNotifier {
    fn output_locked(&self, path: &Path, attempt: u32, max_attempts: u32) {
        warn!(
            path = %path.display(),
            attempt,
            max_attempts,
            "Output file is locked; close it to let the save continue"
        );
    }
}

/// Asks the operator on stderr and waits for Enter on stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptNotifier;

impl LockNotifier for PromptNotifier {
    fn output_locked(&self, path: &Path, attempt: u32, max_attempts: u32) {
        eprintln!(
            "Permission denied: please close '{}' and press Enter to try again ({attempt}/{max_attempts})",
            path.display()
        );
        let mut line = String::new();
        if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
            warn!(error = %e, "Could not read from stdin");
        }
    }
}

/// Run `op` against `path`, retrying while the file is locked.
///
/// Errors other than a locked file are returned at once. Blocks the calling
/// thread between attempts.
pub fn save_with_retry<T, F>(
    path: &Path,
    policy: &LockRetryPolicy,
    notifier: &dyn LockNotifier,
    mut op: F,
) -> Result<T>
where
    F: FnMut(&Path) -> Result<T>,
{
    let mut attempt = 1;
    loop {
        match op(path) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_file_locked() => {
                if attempt >= policy.max_attempts {
                    return Err(Error::OutputLocked {
                        path: path.to_path_buf(),
                        attempts: attempt,
                    });
                }
                notifier.output_locked(path, attempt, policy.max_attempts);
                if !policy.delay.is_zero() {
                    std::thread::sleep(policy.delay);
                }
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

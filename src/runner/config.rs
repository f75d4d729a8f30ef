use std::time::Duration;

use crate::args::LoadArgs;
use crate::error::ConfigError;

/// Validated knobs for one load-test run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Total virtual users, spread across the workers.
    pub users: u64,
    /// Worker tasks driving the virtual users.
    pub threads: usize,
    /// Wall-clock length of the run.
    pub duration: Duration,
    /// Pause between consecutive requests of one virtual user.
    pub delay: Duration,
}

impl RunConfig {
    #[must_use]
    pub fn from_args(args: &LoadArgs) -> Self {
        Self {
            users: args.users.get(),
            threads: args.threads.get(),
            duration: Duration::from_secs(args.duration.get()),
            delay: Duration::from_millis(args.delay),
        }
    }

    /// Rejects configurations that must abort before any worker starts.
    ///
    /// # Errors
    ///
    /// Returns an error for zero users/threads/duration or when threads
    /// exceed users.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users == 0 || self.threads == 0 {
            return Err(ConfigError::ValueTooSmall { min: 1 });
        }
        if self.duration.is_zero() {
            return Err(ConfigError::ValueTooSmall { min: 1 });
        }
        let threads = self.threads as u64;
        if threads > self.users {
            return Err(ConfigError::ThreadsExceedUsers {
                threads,
                users: self.users,
            });
        }
        Ok(())
    }
}

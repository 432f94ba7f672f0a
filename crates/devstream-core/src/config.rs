//! Generation volume and window configuration.

use crate::error::{Result, StreamError};

/// How much of each entity kind to generate, and over what window.
///
/// Counts of zero are legal and simply produce nothing for that phase.
/// The window must cover at least one day; anything shorter would leave no
/// room for a lifecycle to complete inside it.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Number of pull request lifecycles.
    pub pull_requests: usize,

    /// Number of individual commit events.
    pub commits: usize,

    /// Number of CI build lifecycles (each may trail a deployment).
    pub builds: usize,

    /// Size of the generation window in days, counting back from the
    /// generation instant.
    pub time_span_days: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            pull_requests: 2_500,
            commits: 10_000,
            builds: 3_000,
            time_span_days: 90,
        }
    }
}

impl StreamConfig {
    /// Reject configurations that would produce a degenerate window.
    ///
    /// Fails fast here so corrupted timestamps can never reach the stream.
    pub fn validate(&self) -> Result<()> {
        if self.time_span_days == 0 {
            return Err(StreamError::EmptyTimeSpan(self.time_span_days));
        }
        Ok(())
    }
}

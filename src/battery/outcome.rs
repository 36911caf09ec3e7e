// Per-test outcome: a result, or the reason the test could not run

use crate::hypothesis::StatError;
use std::fmt;

/// Outcome of one test in the battery
///
/// A degenerate input (too few groups, singular design, ...) never aborts
/// the battery; the test is recorded as skipped with the reason instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome<T> {
    Completed(T),
    Skipped { reason: String },
}

impl<T> TestOutcome<T> {
    /// Record a test result, logging a warning when it was skipped
    pub fn from_result(test: &str, result: Result<T, StatError>) -> Self {
        match result {
            Ok(value) => TestOutcome::Completed(value),
            Err(e) => {
                tracing::warn!(test, reason = %e, "Test skipped");
                TestOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        TestOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            TestOutcome::Completed(value) => Some(value),
            TestOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            TestOutcome::Completed(_) => None,
            TestOutcome::Skipped { reason } => Some(reason),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TestOutcome::Skipped { .. })
    }
}

/// Formats only the skip notice; completed results are rendered by the report
pub struct SkipNotice<'a>(pub &'a str);

impl fmt::Display for SkipNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "test skipped: {}", self.0)
    }
}

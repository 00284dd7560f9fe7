//! What to do when a single creation fails.

/// Per-item failure policy, shared by copy and create-only runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the remaining batch on the first failed creation.
    #[default]
    StopOnError,
    /// Record the failure, leave it out of the mapping, and keep going.
    ContinueOnError,
}

impl FailurePolicy {
    #[must_use]
    pub const fn from_stop_on_error(stop_on_error: bool) -> Self {
        if stop_on_error {
            Self::StopOnError
        } else {
            Self::ContinueOnError
        }
    }
}

//! Build orchestration errors.

use thiserror::Error;

use halpack_toolchain::ToolchainError;

/// Errors that abort the build pipeline.
///
/// Every variant is stage-fatal: the remaining stages never run and no
/// stage is retried.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Configuration-time validation failed; no build step was attempted.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// The external build collaborator returned a nonzero status.
    #[error("{stage} step failed with exit status {code}")]
    BuildFailure { stage: String, code: i32 },

    /// The produced test binary returned a nonzero status.
    #[error("unit tests failed with exit status {code}")]
    TestFailure { code: i32 },

    /// The collaborator could not be invoked at all.
    #[error("build collaborator failed: {message}")]
    Collaborator { message: String },
}

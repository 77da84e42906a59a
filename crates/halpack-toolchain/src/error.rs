//! Toolchain validation errors.

use thiserror::Error;

/// Errors raised by configuration-time toolchain validation.
///
/// Both variants are fatal and reported before any build step runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolchainError {
    /// The requested language standard is below the package minimum.
    #[error("C++{requested} requested, but this package requires at least C++{minimum}")]
    UnsupportedStandard { requested: u32, minimum: u32 },

    /// The compiler is older than the minimum this package supports.
    #[error("compiler {family}-{version} does not support this package (requires {family} >= {minimum})")]
    UnsupportedToolchain {
        family: String,
        version: String,
        minimum: String,
    },

    /// A version string contained a non-numeric component.
    #[error("unparseable compiler version '{raw}'")]
    InvalidVersion { raw: String },
}

//! Platform errors.

use thiserror::Error;

/// Errors raised while interpreting platform configuration.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform identifier does not name a part of the given family.
    #[error("'{token}' is not a valid {family} platform identifier (expected '{prefix}…', {expected_len} characters)")]
    InvalidIdentifier {
        token: String,
        family: String,
        prefix: String,
        expected_len: usize,
    },
}

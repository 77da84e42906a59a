//! Lenient compiler version parsing and comparison.

use serde::{Deserialize, Serialize};

use crate::error::ToolchainError;

/// A compiler version as reported by external configuration.
///
/// Unlike a full semantic version, any non-empty dot-separated run of
/// numeric components is accepted: `"9"`, `"11.2"`, `"14.0.0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerVersion {
    raw: String,
    components: Vec<u64>,
}

impl CompilerVersion {
    /// Parse a dot-separated numeric version string.
    pub fn parse(raw: &str) -> Result<Self, ToolchainError> {
        let components = raw
            .split('.')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ToolchainError::InvalidVersion {
                raw: raw.to_string(),
            })?;
        if components.is_empty() {
            return Err(ToolchainError::InvalidVersion {
                raw: raw.to_string(),
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            components,
        })
    }

    /// The original version string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Component-wise `<`, truncated to the shorter of the two versions.
    ///
    /// Truncation means a bare major like `"11"` is satisfied by any
    /// `"11.x"`: only the components both sides specify are compared.
    pub fn truncated_lt(&self, other: &CompilerVersion) -> bool {
        let len = self.components.len().min(other.components.len());
        self.components[..len] < other.components[..len]
    }
}

impl std::fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

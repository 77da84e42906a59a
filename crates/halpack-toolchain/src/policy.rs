//! Toolchain validation policy.

use serde::{Deserialize, Serialize};

use crate::error::ToolchainError;
use crate::version::CompilerVersion;

/// Minimum language standard and compiler versions for a package.
///
/// The policy is immutable data constructed once per invocation. A
/// compiler family absent from the table carries no version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainPolicy {
    /// Minimum C++ standard, if the package requires one.
    pub min_standard: Option<u32>,
    /// Minimum version per compiler family.
    pub minimum_versions: Vec<(String, String)>,
}

impl ToolchainPolicy {
    /// The policy for libhal driver packages: C++20, gcc 11, clang 14,
    /// apple-clang 14.0.0.
    pub fn libhal_cxx20() -> Self {
        Self {
            min_standard: Some(20),
            minimum_versions: vec![
                ("gcc".to_string(), "11".to_string()),
                ("clang".to_string(), "14".to_string()),
                ("apple-clang".to_string(), "14.0.0".to_string()),
            ],
        }
    }

    /// Look up the minimum version for a compiler family.
    pub fn minimum_for(&self, family: &str) -> Option<&str> {
        self.minimum_versions
            .iter()
            .find(|(name, _)| name == family)
            .map(|(_, version)| version.as_str())
    }

    /// Validate the requested standard and compiler against this policy.
    ///
    /// Pure check with no side effects; a failure aborts the pipeline
    /// before any build step runs.
    pub fn validate(
        &self,
        requested_standard: Option<u32>,
        compiler_family: &str,
        compiler_version: &str,
    ) -> Result<(), ToolchainError> {
        if let (Some(requested), Some(minimum)) = (requested_standard, self.min_standard) {
            if requested < minimum {
                return Err(ToolchainError::UnsupportedStandard { requested, minimum });
            }
        }

        if let Some(minimum) = self.minimum_for(compiler_family) {
            let actual = CompilerVersion::parse(compiler_version)?;
            let required = CompilerVersion::parse(minimum)?;
            if actual.truncated_lt(&required) {
                return Err(ToolchainError::UnsupportedToolchain {
                    family: compiler_family.to_string(),
                    version: compiler_version.to_string(),
                    minimum: minimum.to_string(),
                });
            }
        }

        Ok(())
    }
}

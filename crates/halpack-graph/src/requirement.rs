//! Upstream package requirements.

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A requirement on an upstream package, expressed as a compatible
/// (caret) range: `^1.0.0` matches `>=1.0.0, <2.0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRequirement {
    /// Upstream package name.
    pub package: String,
    /// Version range the package must satisfy.
    pub requirement: VersionReq,
}

impl PackageRequirement {
    /// Declare a caret requirement against a major version line.
    pub fn caret(package: &str, base: &str) -> Result<Self, GraphError> {
        let requirement = VersionReq::parse(&format!("^{base}")).map_err(|e| {
            GraphError::InvalidRequirement {
                package: package.to_string(),
                requirement: format!("^{base}"),
                detail: e.to_string(),
            }
        })?;
        Ok(Self {
            package: package.to_string(),
            requirement,
        })
    }

    /// Whether a concrete version satisfies this requirement.
    pub fn matches(&self, version: &Version) -> bool {
        self.requirement.matches(version)
    }

    /// The target name consumers link against (`package::package`).
    pub fn target_name(&self) -> String {
        format!("{0}::{0}", self.package)
    }
}

/// A test-only dependency: pinned exactly, declared for the test build
/// but never part of the runtime requirement graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRequirement {
    /// Package name.
    pub package: String,
    /// Exact pinned version.
    pub version: Version,
}

impl TestRequirement {
    /// Pin a test-only dependency to an exact version.
    pub fn pinned(package: &str, version: &str) -> Result<Self, GraphError> {
        let version = Version::parse(version).map_err(|e| GraphError::InvalidRequirement {
            package: package.to_string(),
            requirement: version.to_string(),
            detail: e.to_string(),
        })?;
        Ok(Self {
            package: package.to_string(),
            version,
        })
    }
}

//! Immutable per-invocation build configuration.

use serde::{Deserialize, Serialize};

use halpack_platform::TargetOs;

/// Everything one build invocation needs to know, assembled once from
/// external configuration (profile file plus command-line overrides) and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Compiler family (e.g. "gcc", "clang", "apple-clang").
    pub compiler_family: String,
    /// Compiler version as reported by the environment ("11", "14.0.0").
    pub compiler_version: String,
    /// Requested C++ standard, if one was configured.
    pub standard: Option<u32>,
    /// Target operating system.
    pub target_os: TargetOs,
    /// Target architecture name (e.g. "armv7", "x86_64").
    pub target_arch: String,
    /// Platform identifier option. Absent means unconstrained.
    pub platform: Option<String>,
    /// Skip the test stage even on hosted targets.
    pub skip_tests: bool,
}

impl BuildConfig {
    /// A hosted-Linux configuration with a current gcc, used as the
    /// starting point for overrides.
    pub fn hosted_linux() -> Self {
        Self {
            compiler_family: "gcc".to_string(),
            compiler_version: "12".to_string(),
            standard: Some(20),
            target_os: TargetOs::Linux,
            target_arch: "x86_64".to_string(),
            platform: None,
            skip_tests: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_linux_defaults() {
        let config = BuildConfig::hosted_linux();
        assert_eq!(config.target_os, TargetOs::Linux);
        assert!(config.platform.is_none());
        assert!(!config.skip_tests);
    }
}

//! `halpack.toml` profile parsing and build configuration assembly.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use halpack_build::BuildConfig;
use halpack_platform::TargetOs;

/// The build profile for a driver-package project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HalpackProfile {
    /// Package metadata (required).
    pub package: PackageSection,
    /// Toolchain the external configuration reports.
    #[serde(default)]
    pub toolchain: ToolchainSection,
    /// Build settings.
    #[serde(default)]
    pub build: BuildSection,
}

/// Package metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageSection {
    /// Package name (required).
    pub name: String,
    /// Minimum halpack version this profile requires (semver range).
    #[serde(default)]
    pub min_tool_version: Option<String>,
}

/// Toolchain section: what the environment's compiler reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainSection {
    /// Compiler family (gcc, clang, apple-clang).
    #[serde(default = "default_compiler")]
    pub compiler: String,
    /// Compiler version string.
    #[serde(default = "default_compiler_version")]
    pub compiler_version: String,
    /// Requested C++ standard.
    #[serde(default)]
    pub standard: Option<u32>,
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            compiler_version: default_compiler_version(),
            standard: Some(20),
        }
    }
}

fn default_compiler() -> String {
    "gcc".to_string()
}

fn default_compiler_version() -> String {
    "12".to_string()
}

/// Build settings section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildSection {
    /// Target operating system name (default: linux).
    #[serde(default)]
    pub target_os: Option<String>,
    /// Target architecture name.
    #[serde(default)]
    pub target_arch: Option<String>,
    /// Platform identifier option. Absent means unconstrained.
    #[serde(default)]
    pub platform: Option<String>,
    /// Skip the test stage.
    #[serde(default)]
    pub skip_tests: bool,
    /// Directory holding the test build scripts (default: tests).
    #[serde(default)]
    pub source_dir: Option<String>,
    /// Build output directory (default: build).
    #[serde(default)]
    pub build_dir: Option<String>,
}

/// Command-line overrides applied on top of the profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileOverrides {
    pub platform: Option<String>,
    pub target_os: Option<String>,
    pub skip_tests: bool,
}

impl HalpackProfile {
    /// Search upward from `start_dir` for a `halpack.toml`, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("halpack.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let profile: HalpackProfile = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((profile, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a profile from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing halpack.toml")
    }

    /// Generate the default template for `halpack init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[package]
name = "{name}"
min-tool-version = ">=0.3.0"

[toolchain]
compiler = "gcc"
compiler-version = "12"
standard = 20

[build]
target-os = "linux"
target-arch = "x86_64"
"#
        )
    }

    /// Fail when the running tool does not satisfy the profile's
    /// `min-tool-version` range.
    pub fn check_tool_version(&self, tool_version: &str) -> Result<()> {
        let Some(ref range) = self.package.min_tool_version else {
            return Ok(());
        };
        let requirement = semver::VersionReq::parse(range)
            .with_context(|| format!("invalid min-tool-version range '{range}'"))?;
        let current = semver::Version::parse(tool_version)
            .with_context(|| format!("invalid tool version '{tool_version}'"))?;
        if !requirement.matches(&current) {
            bail!(
                "this project requires halpack {range}, but halpack {tool_version} is running"
            );
        }
        Ok(())
    }

    /// Assemble the immutable build configuration from profile defaults
    /// and command-line overrides.
    pub fn build_config(&self, overrides: &ProfileOverrides) -> BuildConfig {
        let os_name = overrides
            .target_os
            .clone()
            .or_else(|| self.build.target_os.clone())
            .unwrap_or_else(|| "linux".to_string());
        BuildConfig {
            compiler_family: self.toolchain.compiler.clone(),
            compiler_version: self.toolchain.compiler_version.clone(),
            standard: self.toolchain.standard,
            target_os: TargetOs::parse(&os_name),
            target_arch: self
                .build
                .target_arch
                .clone()
                .unwrap_or_else(|| "armv7".to_string()),
            platform: overrides.platform.clone().or_else(|| self.build.platform.clone()),
            skip_tests: overrides.skip_tests || self.build.skip_tests,
        }
    }

    /// Test-script directory relative to the project.
    pub fn source_dir(&self) -> &str {
        self.build.source_dir.as_deref().unwrap_or("tests")
    }

    /// Build output directory relative to the project.
    pub fn build_dir(&self) -> &str {
        self.build.build_dir.as_deref().unwrap_or("build")
    }
}

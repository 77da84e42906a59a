//! Build variant derivation.

use serde::{Deserialize, Serialize};

use crate::family::McuFamily;
use crate::identifier::{LinkerScriptSelector, PlatformIdentifier};

/// The operating system the build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetOs {
    /// No hosting operating system.
    BareMetal,
    Windows,
    Linux,
    MacOs,
    /// Any other hosted OS; treated like Linux by the orchestrator.
    Other,
}

impl TargetOs {
    /// Interpret an OS name from external configuration. Unrecognized
    /// names map to [`TargetOs::Other`] rather than failing, since every
    /// hosted OS takes the same build path.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "baremetal" | "bare-metal" | "none" => TargetOs::BareMetal,
            "windows" => TargetOs::Windows,
            "linux" => TargetOs::Linux,
            "macos" | "darwin" => TargetOs::MacOs,
            _ => TargetOs::Other,
        }
    }
}

impl std::fmt::Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetOs::BareMetal => "baremetal",
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::MacOs => "macos",
            TargetOs::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// The resolved build variant, derived once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildVariant {
    /// True iff the target has no hosting OS.
    pub bare_metal: bool,
    /// Target operating system.
    pub target_os: TargetOs,
    /// Whether the test stage runs. Bare-metal targets cannot execute
    /// host test binaries, and the skip flag disables tests explicitly.
    pub test_enabled: bool,
}

/// Resolve the build variant and linker-script selector.
///
/// The platform identifier is advisory: an absent or unmatched identifier
/// falls back to the unconstrained path with no selector and no
/// family-specific flags. Resolution is deterministic and consults no
/// external state.
pub fn resolve(
    platform: Option<&str>,
    target_os: TargetOs,
    skip_tests: bool,
    family: &McuFamily,
) -> (BuildVariant, Option<LinkerScriptSelector>) {
    let bare_metal = target_os == TargetOs::BareMetal;
    let variant = BuildVariant {
        bare_metal,
        target_os,
        test_enabled: !skip_tests && !bare_metal,
    };

    let selector = if bare_metal {
        platform
            .and_then(|token| PlatformIdentifier::parse(token, family).ok())
            .map(|id| id.linker_script_selector(family))
    } else {
        None
    };

    (variant, selector)
}

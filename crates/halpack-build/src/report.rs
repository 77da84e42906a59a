//! Build pipeline report.

use serde::{Deserialize, Serialize};

use halpack_platform::{BuildVariant, LinkerScriptSelector};

use crate::pipeline::BuildStage;

/// The record of one completed build invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildReport {
    /// The resolved build variant.
    pub variant: BuildVariant,
    /// Linker-script selector, when the platform identifier matched a
    /// bare-metal part.
    pub selector: Option<LinkerScriptSelector>,
    /// Variables handed to the configure step.
    pub configure_variables: Vec<(String, String)>,
    /// Stages that ran, in order.
    pub stages: Vec<BuildStage>,
    /// Whether the test stage executed.
    pub tests_run: bool,
    /// Wall-clock duration of the pipeline.
    pub duration_ms: u64,
}

impl std::fmt::Display for BuildReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Target OS:  {}", self.variant.target_os)?;
        if let Some(ref selector) = self.selector {
            writeln!(f, "Linker script: {}", selector.file_name())?;
        }
        let stages: Vec<String> = self.stages.iter().map(|s| s.to_string()).collect();
        writeln!(f, "Stages:     {}", stages.join(" -> "))?;
        writeln!(
            f,
            "Tests:      {}",
            if self.tests_run { "run" } else { "skipped" }
        )?;
        writeln!(f, "Duration:   {} ms", self.duration_ms)
    }
}

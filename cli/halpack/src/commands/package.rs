//! `halpack package` — run the pipeline, then assemble the package.

use std::path::Path;

use anyhow::{Context, Result};

use halpack_graph::ComponentGraph;
use halpack_package::{assemble, METADATA_FILE};
use halpack_platform::McuFamily;

use crate::commands::build::run_pipeline;
use crate::profile::{HalpackProfile, ProfileOverrides};

/// Build and assemble the distributable package layout.
pub fn run(
    project_dir: &Path,
    profile: &HalpackProfile,
    dest: Option<&str>,
    overrides: &ProfileOverrides,
) -> Result<()> {
    let report = run_pipeline(project_dir, profile, overrides)?;

    let family = McuFamily::stm32f1();
    let graph = ComponentGraph::for_family(&family)
        .context("declaring component graph")?;

    let package_dir = match dest {
        Some(path) => project_dir.join(path),
        None => project_dir.join("package"),
    };

    let assembled = assemble(
        project_dir,
        &package_dir,
        &graph,
        &report.variant,
        report.selector.as_ref(),
        &family,
    )
    .with_context(|| format!("assembling package in {}", package_dir.display()))?;

    println!("Staged {} files into {}", assembled.layout.staged.len(), package_dir.display());
    if let Some(ref selector) = report.selector {
        println!("Linker script: {}", selector.file_name());
    }
    println!("Metadata: {}", package_dir.join(METADATA_FILE).display());

    Ok(())
}

//! `halpack build` — validate, configure, build, test.

use std::path::Path;

use anyhow::{Context, Result};

use halpack_build::{run_build, BuildReport, CommandRunner};
use halpack_platform::McuFamily;
use halpack_toolchain::ToolchainPolicy;

use crate::profile::{HalpackProfile, ProfileOverrides};

/// Run the build pipeline for the active profile.
pub fn run(
    project_dir: &Path,
    profile: &HalpackProfile,
    overrides: &ProfileOverrides,
) -> Result<()> {
    let report = run_pipeline(project_dir, profile, overrides)?;
    print!("{report}");
    Ok(())
}

/// Shared pipeline entry used by `build` and `package`.
pub(crate) fn run_pipeline(
    project_dir: &Path,
    profile: &HalpackProfile,
    overrides: &ProfileOverrides,
) -> Result<BuildReport> {
    profile.check_tool_version(env!("CARGO_PKG_VERSION"))?;

    let config = profile.build_config(overrides);
    let policy = ToolchainPolicy::libhal_cxx20();
    let family = McuFamily::stm32f1();

    println!("Package: {}", profile.package.name);
    println!("Target OS: {}", config.target_os);
    if let Some(ref platform) = config.platform {
        println!("Platform: {platform}");
    }

    let mut runner = CommandRunner::new(
        project_dir.join(profile.source_dir()),
        project_dir.join(profile.build_dir()),
    );

    run_build(&config, &policy, &family, &mut runner)
        .with_context(|| format!("building {}", profile.package.name))
}

//! `halpack doctor` — toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use halpack_platform::{resolve, McuFamily, TargetOs};
use halpack_toolchain::ToolchainPolicy;

use crate::profile::HalpackProfile;

/// Print toolchain diagnostic information.
pub fn run(
    project_dir: &Path,
    profile: Option<&HalpackProfile>,
    target_os: Option<&str>,
    platform: Option<&str>,
) -> Result<()> {
    println!("=== halpack doctor ===");
    println!();

    println!("halpack version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let policy = ToolchainPolicy::libhal_cxx20();
    println!("--- Toolchain Policy ---");
    if let Some(standard) = policy.min_standard {
        println!("  Minimum standard: C++{standard}");
    }
    for (family, version) in &policy.minimum_versions {
        println!("  {family}: >= {version}");
    }
    println!();

    println!("--- System Tools ---");
    print_tool_status("cmake", &["--version"]);
    print_tool_status("arm-none-eabi-g++", &["--version"]);
    println!();

    println!("--- Project Status ---");
    match profile {
        Some(profile) => {
            println!("  halpack.toml: found at {}", project_dir.display());
            println!("  Package:      {}", profile.package.name);
            if let Some(ref range) = profile.package.min_tool_version {
                println!("  Requires:     halpack {range}");
            }
            println!(
                "  Toolchain:    {}-{}",
                profile.toolchain.compiler, profile.toolchain.compiler_version
            );
        }
        None => {
            println!("  halpack.toml: not found");
        }
    }

    if let Some(token) = platform {
        let os = TargetOs::parse(target_os.unwrap_or("baremetal"));
        let family = McuFamily::stm32f1();
        let (variant, selector) = resolve(Some(token), os, false, &family);
        println!();
        println!("--- Platform: {token} ---");
        println!("  Bare metal: {}", variant.bare_metal);
        match selector {
            Some(selector) => println!("  Linker script: {}", selector.file_name()),
            None => println!("  Linker script: none (identifier not matched)"),
        }
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        super::run(dir.path(), None, None, Some("stm32f103c8")).unwrap();
    }
}

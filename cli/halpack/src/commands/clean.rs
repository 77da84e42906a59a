//! `halpack clean` — remove build artifacts.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::profile::HalpackProfile;

/// Remove the build output directory.
pub fn run(project_dir: &Path, profile: &HalpackProfile) -> Result<()> {
    let build_dir = project_dir.join(profile.build_dir());
    if build_dir.exists() {
        fs::remove_dir_all(&build_dir)?;
        println!("Removed {}", build_dir.display());
    } else {
        println!("Already clean: {} does not exist", build_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> HalpackProfile {
        HalpackProfile::from_str("[package]\nname = \"p\"\n").unwrap()
    }

    #[test]
    fn clean_removes_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        fs::create_dir(&build).unwrap();
        fs::write(build.join("artifact.o"), b"data").unwrap();

        run(dir.path(), &profile()).unwrap();
        assert!(!build.exists());
    }

    #[test]
    fn clean_handles_already_clean() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &profile()).unwrap();
    }
}

//! `halpack init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::profile::HalpackProfile;

/// Create a new driver-package project at the given path.
///
/// `name` is the package name. The directory `name` is created relative
/// to cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("include").join(name))
        .context("creating include/ directory")?;
    fs::create_dir_all(project_dir.join("linker_scripts"))
        .context("creating linker_scripts/ directory")?;
    fs::create_dir_all(project_dir.join("tests")).context("creating tests/ directory")?;

    let profile_content = HalpackProfile::template(name);
    fs::write(project_dir.join("halpack.toml"), &profile_content)
        .context("writing halpack.toml")?;

    fs::write(project_dir.join(".gitignore"), "build/\npackage/\n")
        .context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/halpack.toml");
    println!("  {name}/include/{name}/");
    println!("  {name}/linker_scripts/");
    println!("  {name}/tests/");
    println!("  {name}/.gitignore");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("libhal-stm32f1");

        create_project(&project_path, "libhal-stm32f1").unwrap();

        assert!(project_path.join("halpack.toml").is_file());
        assert!(project_path.join("include/libhal-stm32f1").is_dir());
        assert!(project_path.join("linker_scripts").is_dir());
        assert!(project_path.join("tests").is_dir());
        assert!(project_path.join(".gitignore").is_file());
    }

    #[test]
    fn init_generates_valid_profile() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("valid-profile");

        create_project(&project_path, "valid-profile").unwrap();

        let content = fs::read_to_string(project_path.join("halpack.toml")).unwrap();
        let profile = HalpackProfile::from_str(&content).unwrap();
        assert_eq!(profile.package.name, "valid-profile");
    }

    #[test]
    fn init_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("existing");
        fs::create_dir(&project_path).unwrap();

        let result = create_project(&project_path, "existing");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}

//! Package layout staging.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::digest::FileDigest;
use crate::error::PackageError;

/// Destination subdirectory for the license file.
pub const LICENSES_DIR: &str = "licenses";
/// Destination subdirectory for headers.
pub const INCLUDE_DIR: &str = "include";
/// Destination subdirectory for linker scripts.
pub const LINKER_SCRIPTS_DIR: &str = "linker_scripts";

/// One file staged into the package, with its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StagedFile {
    /// Path relative to the package root.
    pub path: PathBuf,
    /// SHA-256 digest of the staged contents.
    pub digest: FileDigest,
}

/// The assembled package tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageLayout {
    /// Package root directory.
    pub package_dir: PathBuf,
    /// Every staged file, sorted by path.
    pub staged: Vec<StagedFile>,
}

impl PackageLayout {
    /// Stage license, headers and linker scripts from `source_dir` into
    /// `package_dir`. Reads only from the source tree and writes only
    /// inside the package tree.
    pub fn stage(source_dir: &Path, package_dir: &Path) -> Result<Self, PackageError> {
        let mut staged = Vec::new();

        let license = source_dir.join("LICENSE");
        if license.is_file() {
            copy_into(
                &license,
                &package_dir.join(LICENSES_DIR).join("LICENSE"),
                Path::new(LICENSES_DIR).join("LICENSE"),
                &mut staged,
            )?;
        }

        // Headers keep their tree below include/; both extensions the
        // package recognizes are staged.
        stage_tree(
            &source_dir.join(INCLUDE_DIR),
            &package_dir.join(INCLUDE_DIR),
            Path::new(INCLUDE_DIR),
            &["h", "hpp"],
            &mut staged,
        )?;

        stage_tree(
            &source_dir.join(LINKER_SCRIPTS_DIR),
            &package_dir.join(LINKER_SCRIPTS_DIR),
            Path::new(LINKER_SCRIPTS_DIR),
            &["ld"],
            &mut staged,
        )?;

        staged.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self {
            package_dir: package_dir.to_path_buf(),
            staged,
        })
    }

    /// The package's linker-script directory.
    pub fn linker_script_dir(&self) -> PathBuf {
        self.package_dir.join(LINKER_SCRIPTS_DIR)
    }
}

fn stage_tree(
    source_root: &Path,
    dest_root: &Path,
    relative_root: &Path,
    extensions: &[&str],
    staged: &mut Vec<StagedFile>,
) -> Result<(), PackageError> {
    if !source_root.is_dir() {
        return Ok(());
    }
    let entries = std::fs::read_dir(source_root).map_err(|e| PackageError::io(source_root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PackageError::io(source_root, e))?;
        let path = entry.path();
        let name = entry.file_name();
        if path.is_dir() {
            stage_tree(
                &path,
                &dest_root.join(&name),
                &relative_root.join(&name),
                extensions,
                staged,
            )?;
        } else if has_extension(&path, extensions) {
            copy_into(
                &path,
                &dest_root.join(&name),
                relative_root.join(&name),
                staged,
            )?;
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

fn copy_into(
    source: &Path,
    dest: &Path,
    relative: PathBuf,
    staged: &mut Vec<StagedFile>,
) -> Result<(), PackageError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PackageError::io(parent, e))?;
    }
    std::fs::copy(source, dest).map_err(|e| PackageError::io(source, e))?;
    staged.push(StagedFile {
        digest: FileDigest::from_file(dest)?,
        path: relative,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn sample_source(root: &Path) {
        write(&root.join("LICENSE"), "Apache-2.0\n");
        write(
            &root.join("include/libhal-stm32f1/clock.hpp"),
            "#pragma once\n",
        );
        write(&root.join("include/libhal-stm32f1/pin.h"), "#pragma once\n");
        write(
            &root.join("include/libhal-stm32f1/clock.cpp"),
            "// not a header\n",
        );
        write(
            &root.join("linker_scripts/stm32f10xx8.ld"),
            "MEMORY {}\n",
        );
        write(&root.join("tests/main.test.cpp"), "int main() {}\n");
    }

    #[test]
    fn stages_recognized_files_into_fixed_subdirectories() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        sample_source(source.path());

        let layout = PackageLayout::stage(source.path(), package.path()).unwrap();

        let paths: Vec<String> = layout
            .staged
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            paths,
            vec![
                "include/libhal-stm32f1/clock.hpp",
                "include/libhal-stm32f1/pin.h",
                "licenses/LICENSE",
                "linker_scripts/stm32f10xx8.ld",
            ]
        );
        for staged in &layout.staged {
            assert!(package.path().join(&staged.path).is_file());
        }
    }

    #[test]
    fn non_headers_and_tests_are_not_staged() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        sample_source(source.path());

        let layout = PackageLayout::stage(source.path(), package.path()).unwrap();

        assert!(!package
            .path()
            .join("include/libhal-stm32f1/clock.cpp")
            .exists());
        assert!(layout
            .staged
            .iter()
            .all(|f| !f.path.to_string_lossy().contains("test")));
    }

    #[test]
    fn source_tree_is_never_mutated() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        sample_source(source.path());

        let count_before = walk_count(source.path());
        PackageLayout::stage(source.path(), package.path()).unwrap();
        assert_eq!(walk_count(source.path()), count_before);
    }

    #[test]
    fn digests_match_staged_contents() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        sample_source(source.path());

        let layout = PackageLayout::stage(source.path(), package.path()).unwrap();
        for staged in &layout.staged {
            let data = std::fs::read(package.path().join(&staged.path)).unwrap();
            assert!(staged.digest.matches(&data));
        }
    }

    #[test]
    fn missing_license_is_tolerated() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        write(
            &source.path().join("include/libhal-stm32f1/pin.h"),
            "#pragma once\n",
        );

        let layout = PackageLayout::stage(source.path(), package.path()).unwrap();
        assert_eq!(layout.staged.len(), 1);
    }

    fn walk_count(root: &Path) -> usize {
        let mut count = 0;
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    count += 1;
                }
            }
        }
        count
    }
}

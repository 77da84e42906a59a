//! Package assembly entry point.

use std::path::Path;

use halpack_graph::ComponentGraph;
use halpack_platform::{BuildVariant, LinkerScriptSelector, McuFamily};

use crate::error::PackageError;
use crate::layout::PackageLayout;
use crate::metadata::{PackageMetadata, METADATA_FILE};

/// The result of assembling a package.
#[derive(Debug, Clone)]
pub struct AssembledPackage {
    /// Staged file tree.
    pub layout: PackageLayout,
    /// Metadata written alongside it.
    pub metadata: PackageMetadata,
}

/// Assemble the distributable package: stage license, headers and linker
/// scripts into `package_dir`, then write the consumer metadata document
/// into the package root.
pub fn assemble(
    source_dir: &Path,
    package_dir: &Path,
    graph: &ComponentGraph,
    variant: &BuildVariant,
    selector: Option<&LinkerScriptSelector>,
    family: &McuFamily,
) -> Result<AssembledPackage, PackageError> {
    let layout = PackageLayout::stage(source_dir, package_dir)?;
    let metadata = PackageMetadata::export(graph, &layout, variant, selector, family);

    let document = serde_json::to_string_pretty(&MetadataDocument {
        metadata: &metadata,
        files: &layout,
    })?;
    let metadata_path = package_dir.join(METADATA_FILE);
    std::fs::write(&metadata_path, document).map_err(|e| PackageError::io(&metadata_path, e))?;

    Ok(AssembledPackage { layout, metadata })
}

#[derive(serde::Serialize)]
struct MetadataDocument<'a> {
    #[serde(flatten)]
    metadata: &'a PackageMetadata,
    files: &'a PackageLayout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use halpack_platform::{resolve, TargetOs};

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn sample_source(root: &Path) {
        write(&root.join("LICENSE"), "Apache-2.0\n");
        write(
            &root.join("include/libhal-stm32f1/output_pin.hpp"),
            "#pragma once\n",
        );
        write(&root.join("linker_scripts/stm32f10xx8.ld"), "MEMORY {}\n");
    }

    #[test]
    fn assemble_bare_metal_package() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        sample_source(source.path());

        let fam = McuFamily::stm32f1();
        let graph = ComponentGraph::for_family(&fam).unwrap();
        let (variant, selector) =
            resolve(Some("stm32f103c8"), TargetOs::BareMetal, false, &fam);

        let assembled = assemble(
            source.path(),
            package.path(),
            &graph,
            &variant,
            selector.as_ref(),
            &fam,
        )
        .unwrap();

        assert_eq!(assembled.layout.staged.len(), 3);
        assert!(package.path().join(METADATA_FILE).is_file());
        assert!(assembled
            .metadata
            .consumer_link_flags
            .contains(&"-Tlibhal-stm32f1/stm32f10xx8.ld".to_string()));
    }

    #[test]
    fn metadata_document_round_trips() {
        let source = tempfile::tempdir().unwrap();
        let package = tempfile::tempdir().unwrap();
        sample_source(source.path());

        let fam = McuFamily::stm32f1();
        let graph = ComponentGraph::for_family(&fam).unwrap();
        let (variant, _) = resolve(None, TargetOs::Linux, false, &fam);

        assemble(source.path(), package.path(), &graph, &variant, None, &fam).unwrap();

        let raw = std::fs::read_to_string(package.path().join(METADATA_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["lookup-name"], "libhal-stm32f1");
        assert!(value["files"]["staged"].as_array().unwrap().len() >= 3);
    }
}

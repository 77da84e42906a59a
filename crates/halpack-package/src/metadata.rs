//! Exported package metadata for downstream consumers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use halpack_graph::ComponentGraph;
use halpack_platform::{BuildVariant, LinkerScriptSelector, McuFamily};

use crate::layout::PackageLayout;

/// File name of the metadata document in the package root.
pub const METADATA_FILE: &str = "halpack-package.json";

/// Per-component metadata exported to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentMetadata {
    /// Component name.
    pub name: String,
    /// Target name consumers link against.
    pub exported_target: String,
    /// Required components and upstream targets.
    pub requires: BTreeSet<String>,
    /// Compile flags for consumers of this component.
    pub compile_flags: Vec<String>,
    /// Link flags for consumers of this component.
    pub link_flags: Vec<String>,
}

/// The package-level metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageMetadata {
    /// Name consumers look the package up under.
    pub lookup_name: String,
    /// How the lookup is resolved ("module", "config" or "both").
    pub find_mode: String,
    /// The package carries only headers and scripts, so its identity is
    /// independent of compiler and build-type settings.
    pub settings_independent: bool,
    /// The variant this package was assembled for.
    pub variant: BuildVariant,
    /// Compile flags every consumer of the package inherits.
    pub consumer_compile_flags: Vec<String>,
    /// Link flags every consumer of the package inherits.
    pub consumer_link_flags: Vec<String>,
    /// Per-component metadata.
    pub components: Vec<ComponentMetadata>,
}

impl PackageMetadata {
    /// Export metadata for an assembled package.
    ///
    /// The root component gains the link search-path flag for the staged
    /// linker scripts. When a wildcard selector was resolved (bare-metal
    /// match), consumers also inherit the `-T` script flag and the
    /// family's architecture flags on both compile and link.
    pub fn export(
        graph: &ComponentGraph,
        layout: &PackageLayout,
        variant: &BuildVariant,
        selector: Option<&LinkerScriptSelector>,
        family: &McuFamily,
    ) -> Self {
        let search_path = format!("-L{}", layout.linker_script_dir().display());

        let components = graph
            .components()
            .iter()
            .map(|component| {
                let mut link_flags = component.link_flags.clone();
                if component.name == graph.root_name() {
                    link_flags.push(search_path.clone());
                }
                ComponentMetadata {
                    name: component.name.clone(),
                    exported_target: component.exported_target.clone(),
                    requires: component.requires.clone(),
                    compile_flags: component.compile_flags.clone(),
                    link_flags,
                }
            })
            .collect();

        let (consumer_compile_flags, consumer_link_flags) = match selector {
            Some(selector) => {
                // Single-core family; the arch flags apply to every part
                // the wildcard script covers.
                let arch_flags: Vec<String> = family
                    .cores
                    .first()
                    .map(|core| core.arch_flags())
                    .unwrap_or_default();
                let mut link = vec![selector.link_flag(&family.package_name)];
                link.extend(arch_flags.iter().cloned());
                (arch_flags, link)
            }
            None => (Vec::new(), Vec::new()),
        };

        Self {
            lookup_name: family.package_name.clone(),
            find_mode: "both".to_string(),
            settings_independent: true,
            variant: *variant,
            consumer_compile_flags,
            consumer_link_flags,
            components,
        }
    }
}

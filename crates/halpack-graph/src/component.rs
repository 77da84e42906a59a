//! Component graph declaration.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use halpack_platform::McuFamily;

use crate::error::GraphError;
use crate::requirement::{PackageRequirement, TestRequirement};

/// A named unit of exported build metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Component {
    /// Component name, unique within the graph.
    pub name: String,
    /// Components or upstream targets this component requires.
    pub requires: BTreeSet<String>,
    /// Flags applied when compiling against this component.
    pub compile_flags: Vec<String>,
    /// Flags applied when linking against this component.
    pub link_flags: Vec<String>,
    /// Target name exported to consumers (e.g. "libhal::stm32f103").
    pub exported_target: String,
}

/// The package's component DAG plus its upstream requirements.
///
/// The root component carries the upstream requirements; each core
/// variant contributes a child that requires the root and adds the
/// architecture flags for its CPU and floating-point ABI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentGraph {
    /// Upstream package requirements (caret ranges).
    pub requirements: Vec<PackageRequirement>,
    /// Test-only dependency, outside the runtime requirement graph.
    pub test_requirement: TestRequirement,
    root: String,
    components: Vec<Component>,
}

impl ComponentGraph {
    /// Declare the component graph for a family.
    pub fn for_family(family: &McuFamily) -> Result<Self, GraphError> {
        let requirements = vec![
            PackageRequirement::caret("libhal", "1.0.0")?,
            PackageRequirement::caret("libhal-util", "1.0.0")?,
            PackageRequirement::caret("libhal-armcortex", "1.0.0")?,
        ];
        let test_requirement = TestRequirement::pinned("boost-ext-ut", "1.1.9")?;

        let root = Component {
            name: family.name.clone(),
            requires: requirements.iter().map(|r| r.target_name()).collect(),
            compile_flags: Vec::new(),
            link_flags: Vec::new(),
            exported_target: family.root_target(),
        };

        let mut components = vec![root];
        for core in &family.cores {
            let arch_flags = core.arch_flags();
            components.push(Component {
                name: core.name.clone(),
                requires: BTreeSet::from([family.name.clone()]),
                compile_flags: arch_flags.clone(),
                link_flags: arch_flags,
                exported_target: format!("{}::{}", family.target_namespace, core.name),
            });
        }

        let graph = Self {
            requirements,
            test_requirement,
            root: family.name.clone(),
            components,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// The root component's name.
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// The root component.
    pub fn root(&self) -> Option<&Component> {
        self.component(&self.root)
    }

    /// All components, root first.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Check the graph invariants: unique names, unique exported targets,
    /// every child requires the root, requirements resolve, no cycles.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut targets: BTreeMap<&str, &str> = BTreeMap::new();
        let mut names: BTreeSet<&str> = BTreeSet::new();

        for component in &self.components {
            if !names.insert(&component.name) {
                return Err(GraphError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
            if let Some(first) = targets.insert(&component.exported_target, &component.name) {
                return Err(GraphError::DuplicateTarget {
                    target: component.exported_target.clone(),
                    first: first.to_string(),
                    second: component.name.clone(),
                });
            }
        }

        let upstream: BTreeSet<String> =
            self.requirements.iter().map(|r| r.target_name()).collect();

        for component in &self.components {
            if component.name != self.root && !component.requires.contains(&self.root) {
                return Err(GraphError::MissingRootRequirement {
                    name: component.name.clone(),
                    root: self.root.clone(),
                });
            }
            for requirement in &component.requires {
                if !names.contains(requirement.as_str()) && !upstream.contains(requirement) {
                    return Err(GraphError::UnknownRequirement {
                        name: component.name.clone(),
                        requirement: requirement.clone(),
                    });
                }
            }
        }

        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<(), GraphError> {
        // Depth-first walk over component-to-component edges; upstream
        // targets are leaves and cannot participate in a cycle.
        for start in &self.components {
            let mut stack = vec![&start.name];
            let mut visited: BTreeSet<&str> = BTreeSet::new();
            while let Some(name) = stack.pop() {
                if !visited.insert(name) {
                    continue;
                }
                if let Some(component) = self.component(name) {
                    for requirement in &component.requires {
                        if requirement == &start.name {
                            return Err(GraphError::Cycle {
                                name: start.name.clone(),
                            });
                        }
                        stack.push(requirement);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> ComponentGraph {
        ComponentGraph::for_family(&McuFamily::stm32f1()).unwrap()
    }

    #[test]
    fn declares_upstream_caret_requirements() {
        let g = graph();
        let names: Vec<&str> = g.requirements.iter().map(|r| r.package.as_str()).collect();
        assert_eq!(names, vec!["libhal", "libhal-util", "libhal-armcortex"]);
        for req in &g.requirements {
            assert!(req.matches(&semver::Version::new(1, 0, 0)));
            assert!(!req.matches(&semver::Version::new(2, 0, 0)));
        }
    }

    #[test]
    fn test_requirement_is_not_a_runtime_requirement() {
        let g = graph();
        assert_eq!(g.test_requirement.package, "boost-ext-ut");
        assert!(g
            .requirements
            .iter()
            .all(|r| r.package != g.test_requirement.package));
    }

    #[test]
    fn root_requires_all_upstream_targets() {
        let g = graph();
        let root = g.root().unwrap();
        assert_eq!(root.name, "stm32f1");
        assert_eq!(root.exported_target, "libhal::stm32f1");
        for req in &g.requirements {
            assert!(root.requires.contains(&req.target_name()));
        }
    }

    #[test]
    fn every_child_requires_the_root() {
        let g = graph();
        for component in g.components().iter().filter(|c| c.name != "stm32f1") {
            assert!(component.requires.contains("stm32f1"));
        }
    }

    #[test]
    fn child_carries_arch_flags_on_compile_and_link() {
        let g = graph();
        let child = g.component("stm32f103").unwrap();
        assert_eq!(child.compile_flags, child.link_flags);
        assert!(child.compile_flags.contains(&"-mcpu=cortex-m3".to_string()));
        assert!(child
            .compile_flags
            .contains(&"-mfloat-abi=soft".to_string()));
        assert_eq!(child.exported_target, "libhal::stm32f103");
    }

    #[test]
    fn exported_targets_are_unique() {
        let g = graph();
        let mut seen = BTreeSet::new();
        for component in g.components() {
            assert!(seen.insert(component.exported_target.clone()));
        }
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let mut g = graph();
        let dup = g.components()[1].clone();
        g.components.push(dup);
        assert!(matches!(
            g.validate(),
            Err(GraphError::DuplicateComponent { .. })
        ));
    }

    #[test]
    fn validate_rejects_child_without_root() {
        let mut g = graph();
        g.components.push(Component {
            name: "stm32f107".to_string(),
            requires: BTreeSet::new(),
            compile_flags: Vec::new(),
            link_flags: Vec::new(),
            exported_target: "libhal::stm32f107".to_string(),
        });
        assert!(matches!(
            g.validate(),
            Err(GraphError::MissingRootRequirement { .. })
        ));
    }

    #[test]
    fn validate_rejects_cycles() {
        let mut g = graph();
        // Make the root require its own child.
        let child_name = g.components[1].name.clone();
        g.components[0].requires.insert(child_name);
        assert!(matches!(g.validate(), Err(GraphError::Cycle { .. })));
    }
}

//! Component graph errors.

use thiserror::Error;

/// Errors detected while validating a component graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Two components share a name.
    #[error("duplicate component name: {name}")]
    DuplicateComponent { name: String },

    /// Two components export the same target name.
    #[error("duplicate exported target '{target}' (components '{first}' and '{second}')")]
    DuplicateTarget {
        target: String,
        first: String,
        second: String,
    },

    /// A child component does not require the root.
    #[error("component '{name}' does not require the root component '{root}'")]
    MissingRootRequirement { name: String, root: String },

    /// A requirement names a component that does not exist in the graph
    /// and is not an upstream package target.
    #[error("component '{name}' requires unknown component '{requirement}'")]
    UnknownRequirement { name: String, requirement: String },

    /// The component requirements form a cycle.
    #[error("component requirement cycle through '{name}'")]
    Cycle { name: String },

    /// A version requirement string failed to parse.
    #[error("invalid version requirement '{requirement}' for '{package}': {detail}")]
    InvalidRequirement {
        package: String,
        requirement: String,
        detail: String,
    },
}

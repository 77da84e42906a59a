//! Upstream requirements and component graph declaration.
//!
//! Declares what the driver package requires from the wider ecosystem
//! (hardware-abstraction core, utility library, architecture support)
//! and assembles the component DAG whose per-component flags and target
//! names downstream consumers link against.

pub mod component;
pub mod error;
pub mod requirement;

pub use component::{Component, ComponentGraph};
pub use error::GraphError;
pub use requirement::{PackageRequirement, TestRequirement};

//! Build orchestration.
//!
//! Drives one build invocation through validate, configure, build and
//! test, selecting steps from the resolved [`BuildVariant`]. The external
//! build tool and test binary sit behind the [`BuildRunner`] contract;
//! both calls block until the collaborator finishes and any nonzero
//! status aborts the remaining stages.
//!
//! [`BuildVariant`]: halpack_platform::BuildVariant

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod runner;

pub use config::BuildConfig;
pub use error::BuildError;
pub use pipeline::{configure_variables, run_build, BuildStage};
pub use report::BuildReport;
pub use runner::{BuildRunner, CommandRunner};

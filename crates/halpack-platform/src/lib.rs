//! Microcontroller family model and platform variant resolution.
//!
//! A build invocation names its target part with a platform identifier
//! (e.g. `stm32f103c8`). This crate validates that identifier against an
//! immutable [`McuFamily`] descriptor and derives the [`BuildVariant`] and
//! the shared linker-script selector used by the rest of the pipeline.

pub mod error;
pub mod family;
pub mod identifier;
pub mod variant;

pub use error::PlatformError;
pub use family::{CoreVariant, McuFamily};
pub use identifier::{LinkerScriptSelector, PlatformIdentifier};
pub use variant::{resolve, BuildVariant, TargetOs};

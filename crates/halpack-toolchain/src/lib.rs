//! Toolchain and language-standard validation.
//!
//! Gates a build invocation on the requested language standard and the
//! compiler's version before any build step runs. Compiler versions are
//! compared leniently: `"9"`, `"11.2"` and `"14.0.0"` are all valid, and
//! ordering truncates to the shorter operand so `"11.2"` satisfies a
//! minimum of `"11"`.

pub mod error;
pub mod policy;
pub mod version;

pub use error::ToolchainError;
pub use policy::ToolchainPolicy;
pub use version::CompilerVersion;

//! Package layout assembly and exported metadata.
//!
//! Stages the distributable files (license, headers, linker scripts)
//! into the package layout and writes the metadata downstream consumers
//! read: exported target names, link search paths, and the wildcard
//! linker-script flag for bare-metal builds. Staged files are
//! content-hashed so consumers can verify the package.

pub mod assemble;
pub mod digest;
pub mod error;
pub mod layout;
pub mod metadata;

pub use assemble::{assemble, AssembledPackage};
pub use digest::FileDigest;
pub use error::PackageError;
pub use layout::{PackageLayout, StagedFile};
pub use metadata::{ComponentMetadata, PackageMetadata, METADATA_FILE};

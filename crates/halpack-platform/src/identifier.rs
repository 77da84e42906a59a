//! Validated platform identifiers and linker-script selection.

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::family::McuFamily;

/// A platform identifier validated against a family descriptor.
///
/// Construction checks the family prefix and the exact expected length,
/// so a held value is always addressable by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformIdentifier {
    token: String,
}

impl PlatformIdentifier {
    /// Parse an identifier for the given family.
    pub fn parse(token: &str, family: &McuFamily) -> Result<Self, PlatformError> {
        if token.len() != family.identifier_len
            || !token.starts_with(&family.identifier_prefix)
            || !token.is_ascii()
        {
            return Err(PlatformError::InvalidIdentifier {
                token: token.to_string(),
                family: family.name.clone(),
                prefix: family.identifier_prefix.clone(),
                expected_len: family.identifier_len,
            });
        }
        Ok(Self {
            token: token.to_string(),
        })
    }

    /// The raw identifier token.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// The MCU-revision character (first masked position).
    pub fn revision(&self, family: &McuFamily) -> char {
        self.token.as_bytes()[family.wildcard_positions[0]] as char
    }

    /// The pin-count character (second masked position).
    pub fn pin_count(&self, family: &McuFamily) -> char {
        self.token.as_bytes()[family.wildcard_positions[1]] as char
    }

    /// Derive the shared linker-script selector for this part.
    ///
    /// Copies the identifier and overwrites the family's two masked
    /// positions with the wildcard character, so every revision/pin-count
    /// combination of a sub-family maps to one script.
    pub fn linker_script_selector(&self, family: &McuFamily) -> LinkerScriptSelector {
        let mut name = self.token.clone().into_bytes();
        for pos in family.wildcard_positions {
            name[pos] = family.wildcard as u8;
        }
        LinkerScriptSelector {
            name: String::from_utf8(name).unwrap_or_else(|_| self.token.clone()),
        }
    }
}

/// The name of a wildcard linker script shared by a sub-family of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerScriptSelector {
    name: String,
}

impl LinkerScriptSelector {
    /// The selector name (e.g. "stm32f10xx8").
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The linker-script file name (e.g. "stm32f10xx8.ld").
    pub fn file_name(&self) -> String {
        format!("{}.ld", self.name)
    }

    /// The `-T` link flag consumers pass to the linker, rooted at the
    /// package's linker-script directory.
    pub fn link_flag(&self, package_name: &str) -> String {
        format!("-T{}/{}", package_name, self.file_name())
    }
}

impl std::fmt::Display for LinkerScriptSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

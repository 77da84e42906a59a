//! Immutable microcontroller family descriptors.
//!
//! A family descriptor bundles everything the pipeline needs to know about
//! one line of parts: how its platform identifiers are shaped, which
//! identifier positions are masked to pick a shared linker script, and
//! which core variants the driver package supports. Descriptors are
//! constructed once per invocation and never mutated.

use serde::{Deserialize, Serialize};

/// A supported processor core within a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoreVariant {
    /// Component name for this core (e.g. "stm32f103").
    pub name: String,
    /// CPU name passed to the cross compiler (e.g. "cortex-m3").
    pub cpu: String,
    /// Floating-point ABI (e.g. "soft").
    pub float_abi: String,
}

impl CoreVariant {
    /// Architecture flags for this core, applied identically to compile
    /// and link steps.
    pub fn arch_flags(&self) -> Vec<String> {
        vec![
            format!("-mcpu={}", self.cpu),
            format!("-mfloat-abi={}", self.float_abi),
        ]
    }
}

/// A complete family descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct McuFamily {
    /// Family name (e.g. "stm32f1").
    pub name: String,
    /// Distributable package name (e.g. "libhal-stm32f1").
    pub package_name: String,
    /// Namespace prefix for exported component targets (e.g. "libhal").
    pub target_namespace: String,
    /// Identifier prefix every part of this family shares.
    pub identifier_prefix: String,
    /// Exact identifier length for this family.
    pub identifier_len: usize,
    /// Identifier positions masked when selecting a shared linker script.
    ///
    /// These encode the MCU revision and pin count. The positions are
    /// per-family data, not a universal rule; parts differing only at
    /// these positions link with the same script.
    pub wildcard_positions: [usize; 2],
    /// Character written into the masked positions.
    pub wildcard: char,
    /// Core variants the driver package supports.
    pub cores: Vec<CoreVariant>,
}

impl McuFamily {
    /// Construct the STM32F1 family descriptor.
    pub fn stm32f1() -> Self {
        Self {
            name: "stm32f1".to_string(),
            package_name: "libhal-stm32f1".to_string(),
            target_namespace: "libhal".to_string(),
            identifier_prefix: "stm32f1".to_string(),
            identifier_len: 11,
            wildcard_positions: [8, 9],
            wildcard: 'x',
            cores: vec![CoreVariant {
                name: "stm32f103".to_string(),
                cpu: "cortex-m3".to_string(),
                float_abi: "soft".to_string(),
            }],
        }
    }

    /// Exported target name for the family root component.
    pub fn root_target(&self) -> String {
        format!("{}::{}", self.target_namespace, self.name)
    }
}

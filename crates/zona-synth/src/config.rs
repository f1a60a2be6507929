//! Configuration of the synthesis components.
//!
//! All configuration structs round-trip through JSON. Component configs
//! without parameters are kept as empty structs so the on-disk shape
//! stays stable when parameters are added later.

use serde::{Deserialize, Serialize};
use zona_arch::Architecture;

use crate::error::{SynthError, SynthResult};

/// Configuration of the code generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeGeneratorConfig {
    /// Offset in architecture units applied to already-loaded atoms
    /// while the next row is picked up. Must be strictly positive and
    /// smaller than every site separation, so an offset atom never sits
    /// on top of another trap.
    pub parking_offset: i64,
    /// Emit a warning when a local gate outside the RZ family falls
    /// through to a U3 gate.
    pub warn_unsupported_gates: bool,
}

impl Default for CodeGeneratorConfig {
    fn default() -> Self {
        Self {
            parking_offset: 1,
            warn_unsupported_gates: true,
        }
    }
}

impl CodeGeneratorConfig {
    /// Check the configuration against the architecture it will be used
    /// with.
    pub fn validate(&self, architecture: &Architecture) -> SynthResult<()> {
        if self.parking_offset <= 0 {
            return Err(SynthError::ConfigOutOfRange {
                name: "parking_offset",
                value: self.parking_offset,
                reason: "must be strictly positive",
            });
        }
        let min_separation = architecture
            .slms()
            .iter()
            .map(|slm| slm.site_separation.0.min(slm.site_separation.1))
            .min();
        if let Some(min_separation) = min_separation {
            if self.parking_offset >= min_separation {
                return Err(SynthError::ConfigOutOfRange {
                    name: "parking_offset",
                    value: self.parking_offset,
                    reason: "must be smaller than the smallest site separation",
                });
            }
        }
        Ok(())
    }
}

/// Configuration of the independent-set router.
///
/// The router has no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {}

/// Configuration of the vertex-matching reuse analyzer.
///
/// The analyzer has no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReuseAnalyzerConfig {}

/// Aggregate configuration of one synthesis pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Opaque configuration forwarded to the placer implementation.
    pub placer: serde_json::Value,
    /// Router configuration.
    pub router: RouterConfig,
    /// Code generator configuration.
    pub code_generator: CodeGeneratorConfig,
    /// Reuse analyzer configuration.
    pub reuse_analyzer: ReuseAnalyzerConfig,
}

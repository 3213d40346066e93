//! Output fingerprinting: deterministic identity of a computed chart.
//!
//! The render bundle is serialized to canonical JSON and hashed with BLAKE3.
//! serde_json writes each f64 in its shortest round-trip form, so two bundles
//! have equal fingerprints exactly when every bar, series value and signal is
//! bit-identical.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chart::RenderBundle;
use crate::config::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleFingerprint(pub String);

impl BundleFingerprint {
    pub fn of(bundle: &RenderBundle) -> Self {
        let json = serde_json::to_string(bundle).expect("RenderBundle must serialize");
        Self::from_bytes(json.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// Short form for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for BundleFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash of the engine parameters, for naming cached or exported outputs.
///
/// `EngineConfig` holds only ordered collections, so its JSON is canonical.
pub fn config_hash(config: &EngineConfig) -> BundleFingerprint {
    let json = serde_json::to_string(config).expect("EngineConfig must serialize");
    BundleFingerprint::from_bytes(json.as_bytes())
}

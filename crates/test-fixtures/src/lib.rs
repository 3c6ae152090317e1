//! Shared helpers for Chorus tests: context builders, a scripted generative
//! capability, a switchable failing store, and JSON scenario loading.

mod capability;
mod context;
mod storage;

pub use capability::{ScriptedCapability, Step};
pub use context::{silent_tick, speaking_tick, ContextBuilder};
pub use storage::FailingStorage;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the bundled scenario files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// One pickup-detection scenario: a comment, a later utterance, and the
/// expected verdict.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PickupScenario {
    pub name: String,
    pub comment: String,
    pub speech: String,
    pub delay_ms: i64,
    pub detected: bool,
}

/// All bundled pickup scenarios.
pub fn pickup_scenarios() -> Vec<PickupScenario> {
    load_fixture("pickup_scenarios.json")
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the store; the platform data dir is used when unset
    pub path: Option<String>,
}

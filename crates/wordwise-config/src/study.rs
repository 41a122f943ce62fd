use serde::{Deserialize, Serialize};

fn default_daily_goal() -> u32 {
    5
}

fn default_history_limit() -> usize {
    30
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct StudyConfig {
    /// Lookups per day that complete the daily goal
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            daily_goal: default_daily_goal(),
            history_limit: default_history_limit(),
        }
    }
}

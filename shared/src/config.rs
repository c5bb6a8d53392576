use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{BASE_TURNS, INITIAL_ROTATION, SPIN_DURATION_MS};

/// Tunables for the reward wheel. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouletteConfig {
    pub spin_duration_ms: u32,
    pub base_turns: u32,
    pub initial_rotation: i64,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            base_turns: BASE_TURNS,
            initial_rotation: INITIAL_ROTATION,
        }
    }
}

impl RouletteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.spin_duration_ms))
    }
}

/// Where the REST API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

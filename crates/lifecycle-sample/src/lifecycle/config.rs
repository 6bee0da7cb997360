use serde::Deserialize;
use tracing::warn;

/// Environment variable overriding [`SystemConfig::channel_capacity`].
pub const CHANNEL_CAPACITY_VAR: &str = "LIFECYCLE_CHANNEL_CAPACITY";

const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Runtime settings for the member system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Capacity of the store actor's request channel.
    pub channel_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl SystemConfig {
    /// Reads settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let raw = std::env::var(CHANNEL_CAPACITY_VAR).ok();
        Self {
            channel_capacity: parse_capacity(raw.as_deref()),
        }
    }
}

fn parse_capacity(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_CHANNEL_CAPACITY;
    };
    match raw.trim().parse::<usize>() {
        Ok(capacity) if capacity > 0 => capacity,
        _ => {
            warn!(var = CHANNEL_CAPACITY_VAR, value = raw, "Invalid channel capacity, using default");
            DEFAULT_CHANNEL_CAPACITY
        }
    }
}

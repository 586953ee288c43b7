use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const DEFAULT_EXPECTED_HOST: &str = "thenewatlantis.com";

/// Runtime settings. Override with `ATLANTIS_USER_AGENT`, `ATLANTIS_TIMEOUT_SECS`,
/// `ATLANTIS_EXPECTED_HOST`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub user_agent: String,
    /// No timeout when unset.
    pub timeout_secs: Option<u64>,
    pub expected_host: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("user_agent", defaults.user_agent)?
            .set_default("expected_host", defaults.expected_host)?
            .add_source(Environment::with_prefix("ATLANTIS").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            expected_host: DEFAULT_EXPECTED_HOST.to_string(),
        }
    }
}

// ── Tests ──

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use grove_ledger::LedgerConfig;

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Delay before the simulated partner settlement runs after a first
    /// confirmation. `0` disables it.
    pub settle_delay_ms: u64,
    pub ledger: LedgerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            settle_delay_ms: 2000,
            ledger: LedgerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ServerResult<()> {
        self.ledger.validate()?;
        Ok(())
    }

    pub fn settle_delay(&self) -> Option<Duration> {
        (self.settle_delay_ms > 0).then(|| Duration::from_millis(self.settle_delay_ms))
    }
}

//! Server configuration: YAML file, environment override, or defaults.

use serde::Deserialize;

use crate::http::response::SERVER_PRODUCT;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listening socket binds, e.g. `127.0.0.1:8080`.
    /// `127.0.0.1:0` picks an ephemeral port.
    pub bind_addr: String,
    /// Pending-connection backlog passed to `listen`.
    pub backlog: u32,
    /// Product identifier placed in the `Server` header of responses that
    /// do not set their own.
    pub server_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            backlog: 128,
            server_name: SERVER_PRODUCT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, with the bind address taken from `TRANSCEIVER_LISTEN` when
    /// set.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("TRANSCEIVER_LISTEN") {
            config.bind_addr = addr;
        }
        config
    }

    /// Loads a YAML config file. Missing keys fall back to the defaults.
    pub fn from_yaml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

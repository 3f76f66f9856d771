use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Sources, later ones win:
//   1. built-in defaults
//   2. mscustomer.toml in the working directory (optional)
//   3. MSCUSTOMER__* environment variables, e.g. MSCUSTOMER__SERVER__PORT=9000
//
// ============================================================================

const CONFIG_FILE: &str = "mscustomer";
const ENV_PREFIX: &str = "MSCUSTOMER";

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub known_nodes: Vec<String>,
    pub keyspace: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Scylla,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is not set
    pub filter: String,
}

impl ServiceConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<ServiceConfig>()
    }

    /// Defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize::<ServiceConfig>()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("store.backend", "memory")?
            .set_default("store.known_nodes", vec!["127.0.0.1:9042"])?
            .set_default("store.keyspace", "customers_ks")?
            .set_default("logging.filter", "info,mscustomer=debug")
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

//! Registry configuration.

use serde::Deserialize;
use tracing::warn;

/// Configuration for the profile registry.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// JSON-RPC endpoint used for `manager()` reads.
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,

    #[serde(default = "defaults::rpc_timeout_ms")]
    pub rpc_timeout_ms: u64,

    /// Redis URL. `None` keeps profiles in memory.
    #[serde(default)]
    pub store_url: Option<String>,

    /// Allowed CORS origin. Ignored in dev mode (wildcard).
    #[serde(default)]
    pub cors_origin: Option<String>,

    #[serde(default)]
    pub dev_mode: bool,

    #[serde(default = "defaults::freshness_window_secs")]
    pub freshness_window_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            rpc_url: defaults::rpc_url(),
            rpc_timeout_ms: defaults::rpc_timeout_ms(),
            store_url: None,
            cors_origin: None,
            dev_mode: false,
            freshness_window_secs: defaults::freshness_window_secs(),
        }
    }
}

impl Config {
    /// Load from optional `registry.toml`, then `REGISTRY_*` env vars.
    /// A missing source falls back to defaults; malformed values fail.
    pub fn load() -> Result<Self, crate::Error> {
        let built = config::Config::builder()
            .add_source(config::File::with_name("registry").required(false))
            .add_source(config::Environment::with_prefix("REGISTRY").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Config>());

        let config = match built {
            Ok(c) => c,
            Err(e) => {
                let err_str = format!("{e}");
                if err_str.contains("not found") {
                    warn!(error = %e, "No config file found, using defaults");
                    Config::default()
                } else {
                    return Err(crate::Error::Config(err_str));
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.rpc_timeout_ms == 0 {
            return Err(crate::Error::Config("rpc_timeout_ms must be > 0".into()));
        }
        if self.freshness_window_secs <= 0 {
            return Err(crate::Error::Config(
                "freshness_window_secs must be > 0".into(),
            ));
        }
        if let Some(origin) = &self.cors_origin {
            axum::http::HeaderValue::from_str(origin)
                .map_err(|e| crate::Error::Config(format!("Invalid cors_origin: {e}")))?;
        }
        Ok(())
    }

    pub fn rpc_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.freshness_window_secs)
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:8787".into()
    }

    pub fn rpc_url() -> String {
        // Priority: ETH_RPC_URL > local node
        if let Ok(url) = std::env::var("ETH_RPC_URL") {
            if !url.is_empty() {
                return url;
            }
        }
        "http://127.0.0.1:8545".into()
    }

    pub fn rpc_timeout_ms() -> u64 {
        10_000
    }

    pub fn freshness_window_secs() -> i64 {
        profile_auth::freshness::DEFAULT_WINDOW_SECS
    }
}

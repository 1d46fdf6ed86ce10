pub mod policy;

use crate::client::DEFAULT_TIMEOUT;
use crate::client::wire::SELL_METHOD;
use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use policy::ContinuationPolicy;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:5001/rpc";
pub const DEFAULT_AMOUNT: &str = "all";
pub const DEFAULT_SLIPPAGE: &str = "0.25";

/* =======================
CLI ARGS
======================= */

#[derive(Parser, Debug)]
#[command(author, version, about = "Sell PumpFun tokens through a JSON-RPC trading backend")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "sell-config.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sell with a single private key
    Sell {
        /// "all", a percentage such as "25%", or a token quantity
        #[arg(long)]
        amount: Option<String>,

        /// Full private key (falls back to PRIVATE_KEY from the environment)
        #[arg(long)]
        key: Option<String>,

        /// Token mint address
        #[arg(long)]
        mint: String,

        /// Maximum slippage as a fraction, e.g. 0.25 = 25%
        #[arg(long)]
        slippage: Option<String>,
    },

    /// Sell the same token for every private key in a list, one after another
    Batch {
        #[arg(long)]
        amount: Option<String>,

        /// File with one private key per line; "-" or omitted reads stdin
        #[arg(long)]
        keys_file: Option<PathBuf>,

        #[arg(long)]
        mint: String,

        #[arg(long)]
        slippage: Option<String>,
    },

    /// Convert a byte array such as [1, 2, ...] into a base58 private key
    Convert {
        /// The literal itself; stdin is read when neither this nor --file is given
        literal: Option<String>,

        #[arg(long, conflicts_with = "literal")]
        file: Option<PathBuf>,
    },
}

/* =======================
MAIN CONFIG
======================= */

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub defaults: SellDefaults,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    pub method: String,
    pub timeout_secs: u64,
}

/// Pre-filled field values, used when a flag is omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SellDefaults {
    pub amount: String,
    pub slippage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BatchConfig {
    #[serde(default)]
    pub continuation: ContinuationPolicy,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            method: SELL_METHOD.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for SellDefaults {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT.to_string(),
            slippage: DEFAULT_SLIPPAGE.to_string(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid rpc url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("rpc url must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("rpc timeout must be at least one second")]
    ZeroTimeout,

    #[error("rpc method name cannot be empty")]
    EmptyMethod,

    #[error("{var} has invalid value {value:?}")]
    InvalidEnv { var: String, value: String },
}

/* =======================
LOAD / CREATE CONFIG
======================= */

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
        } else {
            let cfg = Config::default();
            let content = serde_json::to_string_pretty(&cfg)?;
            std::fs::write(path, content)
                .with_context(|| format!("write default config to {}", path.display()))?;
            info!("📝 Wrote default config to {}", path.display());
            Ok(cfg)
        }
    }

    /// RPC_URL and RPC_TIMEOUT_SECS take precedence over the file.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|var| env::var(var).ok())
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RPC_URL").filter(|v| !v.trim().is_empty()) {
            self.rpc.url = url.trim().to_string();
        }

        if let Some(raw) = lookup("RPC_TIMEOUT_SECS") {
            self.rpc.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "RPC_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.rpc.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.rpc.url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if self.rpc.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.rpc.method.trim().is_empty() {
            return Err(ConfigError::EmptyMethod);
        }

        Ok(())
    }
}

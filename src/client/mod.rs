pub mod wire;

use crate::config::RpcConfig;
use crate::domain::{RpcOutcome, SellRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use wire::{classify_response, RpcEnvelope};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: &SellRequest) -> RpcOutcome;
}

// ==================================================
// HTTP JSON-RPC CLIENT
// ==================================================

#[derive(Clone)]
pub struct SellRpcClient {
    client: Client,
    pub rpc_url: String,
    pub method: String,
    timeout: Duration,
}

impl SellRpcClient {
    pub fn new(rpc_url: &str, method: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
            method: method.to_string(),
            timeout,
        })
    }

    pub fn from_config(cfg: &RpcConfig) -> Result<Self> {
        Self::new(&cfg.url, &cfg.method, Duration::from_secs(cfg.timeout_secs))
    }

    fn describe_failure(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs_f64())
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        }
    }

    async fn post(&self, request: &SellRequest) -> std::result::Result<Value, String> {
        let envelope = RpcEnvelope::sell(&self.method, request);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| self.describe_failure(&e))?;

        let status = response.status();
        if !status.is_success() {
            // body is still interpreted; the backend may put a JSON-RPC error in it
            debug!("sell RPC returned HTTP {}", status);
        }

        let text = response.text().await.map_err(|e| self.describe_failure(&e))?;

        serde_json::from_str(&text)
            .map_err(|e| format!("unreadable response body (HTTP {}): {}", status, e))
    }
}

#[async_trait]
impl Transport for SellRpcClient {
    async fn call(&self, request: &SellRequest) -> RpcOutcome {
        debug!(
            "📤 {} → {} (key {}, mint {})",
            self.method,
            self.rpc_url,
            request.credential_hint(),
            request.token_address
        );

        match self.post(request).await {
            Ok(body) => classify_response(body),
            Err(reason) => {
                warn!("🚫 Sell request failed: {}", reason);
                RpcOutcome::TransportFailure(reason)
            }
        }
    }
}

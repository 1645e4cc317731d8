//! JSON-RPC client for read-only contract calls.
//!
//! Issues a single `eth_call` per request with an explicit timeout. No retry
//! or failover: a failed call fails the request.

use async_trait::async_trait;
use profile_auth::{ManagerReader, MANAGER_SELECTOR};
use profile_types::{Address, AuthError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::metrics::METRICS;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallObject<'a>, &'static str),
}

#[derive(Serialize)]
struct CallObject<'a> {
    to: String,
    data: &'a str,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// `eth_call` client bound to one endpoint.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, crate::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| crate::Error::Config(format!("HTTP client build failed: {e}")))?;
        info!(url, timeout_ms = timeout.as_millis() as u64, "RPC client initialized");
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `eth_call` at `latest`; returns the decoded return bytes.
    pub async fn eth_call(&self, to: &Address, data: &str) -> Result<Vec<u8>, AuthError> {
        METRICS.rpc_calls.fetch_add(1, Ordering::Relaxed);
        let start = Instant::now();
        let result = self.eth_call_inner(to, data).await;
        METRICS.record_rpc_duration(start);
        if let Err(e) = &result {
            METRICS.rpc_errors.fetch_add(1, Ordering::Relaxed);
            warn!(to = %to, error = %e, "eth_call failed");
        }
        result
    }

    async fn eth_call_inner(&self, to: &Address, data: &str) -> Result<Vec<u8>, AuthError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallObject {
                    to: to.to_string(),
                    data,
                },
                "latest",
            ),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::RemoteCall("eth_call timed out".into())
                } else {
                    AuthError::RemoteCall(format!("eth_call request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::RemoteCall(format!("eth_call HTTP {status}")));
        }

        let body: RpcResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AuthError::RemoteCall("eth_call timed out".into())
            } else {
                AuthError::RemoteCall(format!("eth_call parse error: {e}"))
            }
        })?;

        if let Some(err) = body.error {
            return Err(AuthError::RemoteCall(format!(
                "eth_call error {}: {}",
                err.code, err.message
            )));
        }

        let result = body
            .result
            .ok_or_else(|| AuthError::RemoteCall("eth_call returned no result".into()))?;
        let hex_body = result.strip_prefix("0x").unwrap_or(&result);
        hex::decode(hex_body)
            .map_err(|e| AuthError::RemoteCall(format!("eth_call result is not hex: {e}")))
    }
}

/// Call data for the zero-argument `manager()` accessor.
pub fn manager_call_data() -> String {
    format!("0x{}", hex::encode(MANAGER_SELECTOR))
}

#[async_trait]
impl ManagerReader for RpcClient {
    async fn manager_of(&self, pool: &Address) -> Result<Address, AuthError> {
        let word = self.eth_call(pool, &manager_call_data()).await?;
        let manager = Address::from_word(&word).map_err(|_| {
            AuthError::RemoteCall(format!(
                "manager() returned {} bytes, expected 32",
                word.len()
            ))
        })?;
        debug!(pool = %pool, manager = %manager, "Resolved pool manager");
        Ok(manager)
    }
}

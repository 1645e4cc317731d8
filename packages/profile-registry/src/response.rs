//! Response types for the registry API.

use serde::Serialize;

/// Response from `POST /profile`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub digest: String,
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub rpc_url: String,
    pub uptime_secs: u64,
    pub requests: u64,
}

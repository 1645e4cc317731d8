//! Prometheus metrics (lock-free atomics, zero allocation on hot path).

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use profile_auth::{AuthDecision, AuthVia};

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub requests_total: AtomicU64,
    pub profiles_created: AtomicU64,
    pub profiles_patched: AtomicU64,

    // --- Auth ---
    pub auth_owner: AtomicU64,
    pub auth_manager: AtomicU64,
    pub auth_denied: AtomicU64,

    // --- RPC ---
    pub rpc_calls: AtomicU64,
    pub rpc_errors: AtomicU64,
    pub rpc_duration_us_sum: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            profiles_created: AtomicU64::new(0),
            profiles_patched: AtomicU64::new(0),
            auth_owner: AtomicU64::new(0),
            auth_manager: AtomicU64::new(0),
            auth_denied: AtomicU64::new(0),
            rpc_calls: AtomicU64::new(0),
            rpc_errors: AtomicU64::new(0),
            rpc_duration_us_sum: AtomicU64::new(0),
        }
    }

    pub fn record_decision(&self, decision: &AuthDecision) {
        let counter = match decision {
            AuthDecision::Authorized { via: AuthVia::Owner } => &self.auth_owner,
            AuthDecision::Authorized { via: AuthVia::Manager } => &self.auth_manager,
            AuthDecision::Denied { .. } => &self.auth_denied,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rpc_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.rpc_duration_us_sum.fetch_add(us, Ordering::Relaxed);
    }

    /// Text exposition format.
    pub fn render(&self) -> String {
        let rows: [(&str, &str, &AtomicU64); 9] = [
            ("registry_requests_total", "counter", &self.requests_total),
            ("registry_profiles_created_total", "counter", &self.profiles_created),
            ("registry_profiles_patched_total", "counter", &self.profiles_patched),
            ("registry_auth_owner_total", "counter", &self.auth_owner),
            ("registry_auth_manager_total", "counter", &self.auth_manager),
            ("registry_auth_denied_total", "counter", &self.auth_denied),
            ("registry_rpc_calls_total", "counter", &self.rpc_calls),
            ("registry_rpc_errors_total", "counter", &self.rpc_errors),
            ("registry_rpc_duration_us_sum", "counter", &self.rpc_duration_us_sum),
        ];

        let mut out = String::with_capacity(1024);
        for (name, kind, value) in rows {
            let _ = writeln!(out, "# TYPE {name} {kind}");
            let _ = writeln!(out, "{name} {}", value.load(Ordering::Relaxed));
        }
        out
    }
}

//! HTTP request handlers.

use crate::metrics::METRICS;
use crate::middleware::RequestId;
use crate::response::{CreatedResponse, HealthResponse};
use crate::schemas::{CreateProfileRequest, PatchProfileRequest, ProofQuery};
use crate::state::AppState;
use crate::store::{load_profile, save_profile};
use crate::Error;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use profile_auth::{authenticate_create, authenticate_login, AuthDecision, AuthVia, LoginProof};
use profile_types::{Address, Profile};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Health check with basic counters.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        store: state.store.backend(),
        rpc_url: state.config.rpc_url.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        METRICS.render(),
    )
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn count_request(state: &AppState) {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.requests_total.fetch_add(1, Ordering::Relaxed);
}

/// Check a login proof against `profile`. `require_pool` makes
/// `poolAddress` mandatory (patch).
async fn authorize_login(
    state: &AppState,
    profile: &Profile,
    query: &ProofQuery,
    require_pool: bool,
    req_id: &str,
) -> Result<AuthVia, Error> {
    let (Some(time), Some(signature)) = (query.time(), query.signature()) else {
        warn!(req_id = %req_id, id = %profile.id, "Missing time or signature");
        return Err(Error::Unauthorized);
    };

    let pool_address = match query.pool_address() {
        Some(raw) => Some(raw.parse::<Address>().map_err(|_| {
            warn!(req_id = %req_id, pool = raw, "Malformed poolAddress");
            Error::Unauthorized
        })?),
        None => None,
    };
    if require_pool && pool_address.is_none() {
        warn!(req_id = %req_id, id = %profile.id, "Missing poolAddress");
        return Err(Error::Unauthorized);
    }

    let proof = LoginProof {
        time,
        signature,
        pool_address,
    };
    let decision = authenticate_login(
        profile,
        &proof,
        chrono::Utc::now(),
        state.config.freshness_window(),
        state.managers.as_ref(),
    )
    .await
    .map_err(|e| {
        warn!(req_id = %req_id, id = %profile.id, error = %e, "Authorization lookup failed");
        Error::from(e)
    })?;

    METRICS.record_decision(&decision);
    match decision {
        AuthDecision::Authorized { via } => {
            info!(req_id = %req_id, id = %profile.id, via = via.as_str(), "Authorized");
            Ok(via)
        }
        AuthDecision::Denied { reason } => {
            warn!(req_id = %req_id, id = %profile.id, reason = reason.as_str(), "Authorization denied");
            Err(Error::Unauthorized)
        }
    }
}

/// `GET /profile/{id}`. Public view without a proof, full profile with one.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(req_id)): Extension<RequestId>,
    Path(id): Path<String>,
    Query(query): Query<ProofQuery>,
) -> Result<Response, Error> {
    count_request(&state);

    let profile = load_profile(state.store.as_ref(), &id)
        .await?
        .ok_or(Error::NotFound)?;

    if query.is_anonymous() {
        return Ok(Json(profile.public_view()).into_response());
    }

    authorize_login(&state, &profile, &query, false, &req_id).await?;
    Ok(Json(&profile).into_response())
}

/// `POST /profile`. The wallet signs the store message; no freshness window.
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(req_id)): Extension<RequestId>,
    body: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), Error> {
    count_request(&state);

    let Json(body) = body.map_err(|e| {
        warn!(req_id = %req_id, error = %e, "Invalid JSON body");
        Error::Internal(e.body_text())
    })?;
    let (draft, signature) = body.into_draft()?;

    let decision = authenticate_create(&draft, &signature);
    METRICS.record_decision(&decision);
    if let AuthDecision::Denied { reason } = decision {
        warn!(
            req_id = %req_id,
            wallet = %draft.wallet_address,
            reason = reason.as_str(),
            "Create signature rejected"
        );
        return Err(Error::Unauthorized);
    }

    let id = uuid::Uuid::new_v4().to_string();
    let profile = draft.into_profile(id);
    save_profile(state.store.as_ref(), &profile).await?;

    METRICS.profiles_created.fetch_add(1, Ordering::Relaxed);
    info!(req_id = %req_id, id = %profile.id, wallet = %profile.wallet_address, "Profile created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: profile.id,
            digest: profile.digest,
        }),
    ))
}

/// `PATCH /profile/{id}`. Replaces `localDetail` only; body is validated
/// after authorization.
pub async fn patch_profile(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(req_id)): Extension<RequestId>,
    Path(id): Path<String>,
    Query(query): Query<ProofQuery>,
    body: Result<Json<PatchProfileRequest>, JsonRejection>,
) -> Result<StatusCode, Error> {
    count_request(&state);

    let profile = load_profile(state.store.as_ref(), &id)
        .await?
        .ok_or(Error::NotFound)?;

    let via = authorize_login(&state, &profile, &query, true, &req_id).await?;

    let Json(body) = body.map_err(|e| {
        warn!(req_id = %req_id, error = %e, "Invalid JSON body");
        Error::Internal(e.body_text())
    })?;
    let detail = body.into_local_detail()?;

    // Last writer wins; no version check between the read above and this write.
    save_profile(state.store.as_ref(), &profile.with_local_detail(detail)).await?;

    METRICS.profiles_patched.fetch_add(1, Ordering::Relaxed);
    info!(req_id = %req_id, id = %id, via = via.as_str(), "Local detail updated");
    Ok(StatusCode::CREATED)
}

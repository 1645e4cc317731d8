//! Auth dispatch for the protected profile operations.

use chrono::{DateTime, Duration, Utc};
use profile_types::{AuthError, Profile, ProfileDraft, login_message_at, parse_timestamp};

use crate::auth_types::{AuthDecision, AuthVia, DenyReason, LoginProof};
use crate::freshness::check_fresh;
use crate::resolver::{ManagerReader, resolve_ownership};
use crate::verify::recover;

fn deny(reason: DenyReason) -> AuthDecision {
    AuthDecision::Denied { reason }
}

/// Authorize an authenticated read or patch of `profile`.
///
/// The stored pool association takes precedence over the caller-supplied
/// `proof.pool_address`. Only `AuthError::RemoteCall` is returned as `Err`;
/// every other failure is a `Denied` decision.
pub async fn authenticate_login<R>(
    profile: &Profile,
    proof: &LoginProof<'_>,
    now: DateTime<Utc>,
    window: Duration,
    reader: &R,
) -> Result<AuthDecision, AuthError>
where
    R: ManagerReader + ?Sized,
{
    let Ok(signed_at) = parse_timestamp(proof.time) else {
        return Ok(deny(DenyReason::BadTimestamp));
    };
    if check_fresh(signed_at, now, window).is_err() {
        return Ok(deny(DenyReason::Expired));
    }

    let message = login_message_at(&signed_at);
    let Ok(recovered) = recover(&message, proof.signature) else {
        return Ok(deny(DenyReason::BadSignature));
    };

    let pool = profile.pool_address.as_ref().or(proof.pool_address.as_ref());
    resolve_ownership(&profile.wallet_address, &recovered, pool, reader).await
}

/// Authorize creation: the store message must recover to the declared wallet.
/// No freshness window applies.
pub fn authenticate_create(draft: &ProfileDraft, signature: &str) -> AuthDecision {
    match recover(&draft.store_message(), signature) {
        Ok(signer) if signer == draft.wallet_address => AuthDecision::Authorized {
            via: AuthVia::Owner,
        },
        Ok(_) => deny(DenyReason::SignerMismatch),
        Err(_) => deny(DenyReason::BadSignature),
    }
}

//! Owner / pool-manager resolution for a recovered signer.

use async_trait::async_trait;
use profile_types::{Address, AuthError};
use sha3::{Digest, Keccak256};

use crate::auth_types::{AuthDecision, AuthVia, DenyReason};

/// `bytes4(keccak256("manager()"))`.
pub const MANAGER_SELECTOR: [u8; 4] = [0x48, 0x1c, 0x6a, 0x75];

/// First four bytes of Keccak-256 over a Solidity function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Read-only access to a pool contract's zero-argument `manager()` accessor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerReader: Send + Sync {
    /// Errors must be `AuthError::RemoteCall`.
    async fn manager_of(&self, pool: &Address) -> Result<Address, AuthError>;
}

/// Decide whether `recovered` may act for a profile owned by `owner`.
///
/// Performs at most one `manager_of` call, and only when the signer is not
/// the owner and a pool address is available.
pub async fn resolve_ownership<R>(
    owner: &Address,
    recovered: &Address,
    pool: Option<&Address>,
    reader: &R,
) -> Result<AuthDecision, AuthError>
where
    R: ManagerReader + ?Sized,
{
    if recovered == owner {
        return Ok(AuthDecision::Authorized {
            via: AuthVia::Owner,
        });
    }

    let Some(pool) = pool else {
        return Ok(AuthDecision::Denied {
            reason: DenyReason::NotOwner,
        });
    };

    let manager = reader.manager_of(pool).await?;
    if &manager == recovered {
        Ok(AuthDecision::Authorized {
            via: AuthVia::Manager,
        })
    } else {
        Ok(AuthDecision::Denied {
            reason: DenyReason::ManagerMismatch,
        })
    }
}

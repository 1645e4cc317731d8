//! Authorization outcomes and request proofs.

use profile_types::{Address, AuthError};

/// Which authorization path granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVia {
    /// Signer is the profile's own wallet.
    Owner,
    /// Signer is the `manager()` of the associated pool contract.
    Manager,
}

impl AuthVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// `time` or `signature` absent.
    MissingProof,
    BadTimestamp,
    Expired,
    BadSignature,
    /// Signer differs from the owner and no pool address was available.
    NotOwner,
    /// Signer differs from both the owner and the pool manager.
    ManagerMismatch,
    /// Create signature does not recover to the declared wallet.
    SignerMismatch,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingProof => "missing_proof",
            Self::BadTimestamp => "bad_timestamp",
            Self::Expired => "expired",
            Self::BadSignature => "bad_signature",
            Self::NotOwner => "not_owner",
            Self::ManagerMismatch => "manager_mismatch",
            Self::SignerMismatch => "signer_mismatch",
        }
    }
}

/// Result of an authorization attempt. Infrastructure failures are
/// reported separately as `Err(AuthError::RemoteCall)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized { via: AuthVia },
    Denied { reason: DenyReason },
}

impl AuthDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized { .. })
    }

    pub fn into_result(self) -> Result<AuthVia, AuthError> {
        match self {
            Self::Authorized { via } => Ok(via),
            Self::Denied { reason } => Err(AuthError::Unauthorized(reason.as_str().into())),
        }
    }
}

/// Login proof carried in the `time`, `signature`, and `poolAddress` query parameters.
#[derive(Debug, Clone)]
pub struct LoginProof<'a> {
    pub time: &'a str,
    pub signature: &'a str,
    pub pool_address: Option<Address>,
}

/// Protocol-independent authentication error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidInput(String),
    Unauthorized(String),
    SignatureInvalid,
    PayloadExpired,
    /// The on-chain read failed (transport, timeout, or JSON-RPC error object).
    RemoteCall(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::SignatureInvalid => write!(f, "invalid secp256k1 signature"),
            Self::PayloadExpired => write!(f, "signed timestamp expired"),
            Self::RemoteCall(msg) => write!(f, "remote call failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

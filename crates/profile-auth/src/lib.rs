//! Off-chain auth for the profile registry: personal-message signature
//! recovery, freshness window, and owner / pool-manager resolution.

mod auth_types;
mod authenticate;
pub mod freshness;
mod resolver;
mod verify;

pub use auth_types::{AuthDecision, AuthVia, DenyReason, LoginProof};
pub use authenticate::{authenticate_create, authenticate_login};
pub use resolver::{MANAGER_SELECTOR, ManagerReader, function_selector, resolve_ownership};
pub use verify::{address_of, personal_message_hash, recover};

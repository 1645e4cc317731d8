//! Content fingerprint over a profile's identity fields.

use sha2::{Digest, Sha256};

use crate::Address;

/// Lowercase hex SHA-256 of `wallet name email phone business_name`
/// joined by single spaces. Absent contact fields contribute an empty string.
pub fn profile_digest(
    wallet_address: &Address,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
    business_name: &str,
) -> String {
    let wallet = wallet_address.to_string();
    let joined = [
        wallet.as_str(),
        name,
        email.unwrap_or_default(),
        phone.unwrap_or_default(),
        business_name,
    ]
    .join(" ");
    hex::encode(Sha256::digest(joined.as_bytes()))
}

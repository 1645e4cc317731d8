//! Personal-message (`eth_sign` style) secp256k1 signature recovery.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use profile_types::{Address, AuthError};
use sha3::{Digest, Keccak256};

fn decode_hex(input: &str, what: &str) -> Result<Vec<u8>, AuthError> {
    let input = input.trim();
    let body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(body).map_err(|e| AuthError::InvalidInput(format!("invalid {what} hex: {e}")))
}

/// Keccak-256 of `"\x19Ethereum Signed Message:\n" + len(message) + message`.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Account address of a public key: last 20 bytes of Keccak-256 over the
/// uncompressed point without its `0x04` prefix.
pub fn address_of(key: &VerifyingKey) -> Address {
    let encoded = key.to_encoded_point(false);
    let hash = Keccak256::digest(&encoded.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::from_bytes(out)
}

/// Recover the signer of a hex-encoded message from a 65-byte `r‖s‖v` signature.
///
/// `v` may be 0/1 or 27/28. High-`s` signatures are normalized before
/// recovery so legacy wallet output still verifies.
pub fn recover(message_hex: &str, signature_hex: &str) -> Result<Address, AuthError> {
    let message = decode_hex(message_hex, "message")?;
    let sig_bytes = decode_hex(signature_hex, "signature")?;
    if sig_bytes.len() != 65 {
        return Err(AuthError::SignatureInvalid);
    }

    let v = match sig_bytes[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(AuthError::SignatureInvalid),
    };
    let mut recovery_id = RecoveryId::from_byte(v).ok_or(AuthError::SignatureInvalid)?;
    let mut signature =
        Signature::from_slice(&sig_bytes[..64]).map_err(|_| AuthError::SignatureInvalid)?;

    // Negating s mirrors R, which flips the parity of its y coordinate.
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let hash = personal_message_hash(&message);
    let key = VerifyingKey::recover_from_prehash(&hash, &signature, recovery_id)
        .map_err(|_| AuthError::SignatureInvalid)?;
    Ok(address_of(&key))
}

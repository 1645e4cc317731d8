//! Signing message construction for the profile registry.
//!
//! Messages are returned as `0x`-prefixed hex of their UTF-8 bytes, the
//! form wallets accept for personal-message signing.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::AuthError;

fn to_hex_message(text: &str) -> String {
    format!("0x{}", hex::encode(text.as_bytes()))
}

/// Parse an ISO-8601 / RFC 3339 timestamp as supplied in a `time` query parameter.
pub fn parse_timestamp(time: &str) -> Result<DateTime<Utc>, AuthError> {
    DateTime::parse_from_rfc3339(time.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AuthError::InvalidInput(format!("invalid timestamp {time:?}: {e}")))
}

/// Format: `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn render_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format: `Authorization {timestamp}`.
pub fn login_message_at(at: &DateTime<Utc>) -> String {
    to_hex_message(&format!("Authorization {}", render_timestamp(at)))
}

/// Login message for a raw `time` value, normalized through [`parse_timestamp`].
pub fn login_message(time: &str) -> Result<String, AuthError> {
    Ok(login_message_at(&parse_timestamp(time)?))
}

/// Store/update message. Phone and email lines appear only when present.
pub fn store_message(
    name: &str,
    business_name: &str,
    phone: Option<&str>,
    email: Option<&str>,
) -> String {
    let mut text = format!("My name is {name}.\nMy business name is {business_name}.");
    if let Some(phone) = phone {
        text.push_str(&format!("\nMy phone is {phone}."));
    }
    if let Some(email) = email {
        text.push_str(&format!("\nMy email is {email}."));
    }
    to_hex_message(&text)
}

//! Shared types and pure-logic utilities for the profile registry.
//! No I/O; shared by the auth crate and the HTTP service.

mod address;
mod digest;
mod error;
mod message;
mod profile;

pub use address::Address;
pub use digest::profile_digest;
pub use error::AuthError;
pub use message::{
    login_message, login_message_at, parse_timestamp, render_timestamp, store_message,
};
pub use profile::{Amount, LocalDetail, Profile, ProfileDraft, PublicProfile};

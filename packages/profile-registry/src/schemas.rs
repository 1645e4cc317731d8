//! Request bodies and query parameters.

use profile_types::{Address, LocalDetail, ProfileDraft};
use serde::Deserialize;

use crate::error::REQUIRED_FIELDS_MSG;
use crate::Error;

/// Trim and drop empty strings.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `POST /profile` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub wallet_signature: Option<String>,
    #[serde(default)]
    pub pool_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub is_local_currency_loan: bool,
    #[serde(default)]
    pub local_detail: Option<LocalDetail>,
}

impl CreateProfileRequest {
    /// Validate into a draft plus the wallet signature over its store message.
    pub fn into_draft(self) -> Result<(ProfileDraft, String), Error> {
        let required = || Error::InvalidArgument(REQUIRED_FIELDS_MSG.into());

        let wallet_address = trimmed(self.wallet_address).ok_or_else(required)?;
        let wallet_signature = trimmed(self.wallet_signature).ok_or_else(required)?;
        let name = trimmed(self.name).ok_or_else(required)?;
        let business_name = trimmed(self.business_name).ok_or_else(required)?;
        let email = trimmed(self.email);
        let phone = trimmed(self.phone);
        if email.is_none() && phone.is_none() {
            return Err(required());
        }

        let wallet_address: Address = wallet_address.parse().map_err(|_| required())?;
        let pool_address = trimmed(self.pool_address)
            .map(|raw| raw.parse::<Address>())
            .transpose()
            .map_err(|_| required())?;

        let local_detail = self.local_detail.unwrap_or_default();
        if self.is_local_currency_loan {
            let missing = local_detail.missing_fields();
            if !missing.is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "localDetail is required for a local currency loan; missing: {}",
                    missing.join(", ")
                )));
            }
        }

        let draft = ProfileDraft {
            wallet_address,
            name,
            email,
            phone,
            business_name,
            pool_address,
            is_local_currency_loan: self.is_local_currency_loan,
            local_detail,
        };
        Ok((draft, wallet_signature))
    }
}

/// `PATCH /profile/{id}` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchProfileRequest {
    #[serde(default)]
    pub local_detail: Option<LocalDetail>,
}

impl PatchProfileRequest {
    /// The replacement detail, with all four fields present and non-falsy.
    pub fn into_local_detail(self) -> Result<LocalDetail, Error> {
        let detail = self.local_detail.unwrap_or_default();
        let missing = detail.missing_fields();
        if !missing.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "Required localDetail field(s) missing or invalid: {}",
                missing.join(", ")
            )));
        }
        Ok(detail)
    }
}

/// Login proof query parameters: `?time&signature&poolAddress`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofQuery {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub pool_address: Option<String>,
}

impl ProofQuery {
    pub fn time(&self) -> Option<&str> {
        non_empty(&self.time)
    }

    pub fn signature(&self) -> Option<&str> {
        non_empty(&self.signature)
    }

    pub fn pool_address(&self) -> Option<&str> {
        non_empty(&self.pool_address)
    }

    /// Neither `time` nor `signature` supplied: an unauthenticated read.
    pub fn is_anonymous(&self) -> bool {
        self.time().is_none() && self.signature().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

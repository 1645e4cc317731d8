//! Persisted profile record and its public projection.

use serde::{Deserialize, Serialize};

use crate::{Address, profile_digest, store_message};

/// A loan figure as submitted: a JSON number or a numeric string. Kept in
/// the form it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Numbers must be finite and non-zero; strings non-empty and numeric.
    pub fn is_set(&self) -> bool {
        match self {
            Amount::Number(n) => n.is_finite() && *n != 0.0,
            Amount::Text(_) => self.value().is_some_and(f64::is_finite),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

/// Local-currency loan detail. The only profile field mutable after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_loan_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx_rate: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_installment_amount: Option<Amount>,
}

impl LocalDetail {
    /// Wire names of fields that are absent or falsy.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let number_set = |v: &Option<Amount>| v.as_ref().is_some_and(Amount::is_set);
        let mut missing = Vec::new();
        if !number_set(&self.local_loan_amount) {
            missing.push("localLoanAmount");
        }
        if !self
            .local_currency_code
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
        {
            missing.push("localCurrencyCode");
        }
        if !number_set(&self.fx_rate) {
            missing.push("fxRate");
        }
        if !number_set(&self.local_installment_amount) {
            missing.push("localInstallmentAmount");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A registered business profile, stored as JSON under its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub wallet_address: Address,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub business_name: String,
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<Address>,
    #[serde(default)]
    pub is_local_currency_loan: bool,
    #[serde(default)]
    pub local_detail: LocalDetail,
}

/// Unauthenticated view: never carries wallet, contact, or digest fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile<'a> {
    pub name: &'a str,
    pub business_name: &'a str,
    pub is_local_currency_loan: bool,
    pub local_detail: &'a LocalDetail,
}

impl Profile {
    pub fn public_view(&self) -> PublicProfile<'_> {
        PublicProfile {
            name: &self.name,
            business_name: &self.business_name,
            is_local_currency_loan: self.is_local_currency_loan,
            local_detail: &self.local_detail,
        }
    }

    /// Copy with `local_detail` replaced; every other field is untouched.
    pub fn with_local_detail(&self, local_detail: LocalDetail) -> Self {
        Self {
            local_detail,
            ..self.clone()
        }
    }
}

/// Validated create payload, before an id is assigned.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub wallet_address: Address,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business_name: String,
    pub pool_address: Option<Address>,
    pub is_local_currency_loan: bool,
    pub local_detail: LocalDetail,
}

impl ProfileDraft {
    /// The hex message the wallet must have signed to create this profile.
    pub fn store_message(&self) -> String {
        store_message(
            &self.name,
            &self.business_name,
            self.phone.as_deref(),
            self.email.as_deref(),
        )
    }

    pub fn digest(&self) -> String {
        profile_digest(
            &self.wallet_address,
            &self.name,
            self.email.as_deref(),
            self.phone.as_deref(),
            &self.business_name,
        )
    }

    pub fn into_profile(self, id: String) -> Profile {
        let digest = self.digest();
        Profile {
            id,
            wallet_address: self.wallet_address,
            name: self.name,
            email: self.email,
            phone: self.phone,
            business_name: self.business_name,
            digest,
            pool_address: self.pool_address,
            is_local_currency_loan: self.is_local_currency_loan,
            local_detail: self.local_detail,
        }
    }
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// Errors returned by bearer-token verification.
//
// Each variant is distinguishable for server-side logging; callers must not
// echo them to clients.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::BadSignature,
            _ => Self::Malformed(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenConfigError {
    #[error("token secret must not be empty")]
    EmptySecret,
}

/// Claims carried by a verified bearer token.
///
/// NOTE:
/// - `uid` is the subject. A `uid` that is present but not a JSON string is
///   decoded as `None`, so "no usable subject" is a single, explicit case.
/// - `exp` is an optional NumericDate and may be fractional. It is enforced by
///   `TokenVerifier::verify`, not by `jsonwebtoken`, which only accepts integers.
/// - Other registered claims (`iat`, `nbf`, ...) are ignored whatever their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub uid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
}

impl Claims {
    pub fn subject(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp?;
        if !exp.is_finite() {
            return None;
        }
        DateTime::from_timestamp(exp.floor() as i64, 0)
    }

    /// `exp` is in the past by more than `leeway_seconds` at `now`.
    fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: u64) -> bool {
        match self.exp {
            Some(exp) => exp < (now.timestamp() as f64) - (leeway_seconds as f64),
            None => false,
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// HMAC (HS256/HS384/HS512) bearer-token verifier.
///
/// - The secret is fixed at construction and never printed via Debug.
/// - `verify` is a pure function of the token and the current time.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: u64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Result<Self, TokenConfigError> {
        if secret.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // No claim is required. `exp` is checked in `verify` so fractional values pass.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            leeway_seconds,
        })
    }

    /// Verify signature and expiry, then decode the claim set.
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        if token.is_empty() {
            return Err(VerifyError::Malformed("empty token".to_string()));
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.is_expired_at(Utc::now(), self.leeway_seconds) {
            return Err(VerifyError::Expired);
        }

        Ok(data.claims)
    }
}

//! Verified JWT claims
//!
//! `Claims` is the decoded payload of a token whose signature has already been
//! checked. Registered claims get typed fields; anything else the issuer put in
//! the payload is kept untouched in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `aud` may be a single string or an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == expected,
            Audience::Multiple(auds) => auds.iter().any(|aud| aud == expected),
        }
    }
}

/// Claims extracted from a validated token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier
    pub sub: String,

    /// Issued at (Unix timestamp)
    #[serde(
        default,
        deserialize_with = "numeric_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(
        default,
        deserialize_with = "numeric_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(
        default,
        deserialize_with = "numeric_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub nbf: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Application-defined attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Look up an application-defined attribute
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// True when `exp` is set and at or before `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// NumericDate may carry a fractional part; it is truncated to whole seconds.
mod numeric_date {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumericDate {
        Whole(i64),
        Fractional(f64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumericDate>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumericDate::Whole(secs)) => Ok(Some(secs)),
            Some(NumericDate::Fractional(secs))
                if secs.is_finite() && secs >= i64::MIN as f64 && secs < i64::MAX as f64 =>
            {
                Ok(Some(secs.trunc() as i64))
            }
            Some(NumericDate::Fractional(secs)) => Err(de::Error::custom(format!(
                "NumericDate out of range: {}",
                secs
            ))),
        }
    }
}

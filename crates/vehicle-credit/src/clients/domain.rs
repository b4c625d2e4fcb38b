use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier wrapper for registered clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inbound payload for creating or replacing a client.
///
/// Every field is optional on the wire so that missing values surface as
/// per-field validation messages instead of an opaque decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "whole_years")]
    pub age: Option<i64>,
    #[serde(default)]
    pub income: Option<f64>,
}

/// Accepts integral JSON numbers, including float forms such as `30.0`.
fn whole_years<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Ok(Some(value as i64))
    } else {
        Err(de::Error::custom(format!("age must be a whole number, found {value}")))
    }
}

/// Validated client attributes, not yet bound to an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub age: u32,
    pub income: f64,
}

/// Registered client as persisted by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub registered_at: DateTime<Utc>,
}

impl Client {
    pub fn register(draft: ClientDraft) -> Self {
        Self {
            id: ClientId::generate(),
            name: draft.name,
            age: draft.age,
            income: draft.income,
            registered_at: Utc::now(),
        }
    }

    /// Replace the mutable attributes while keeping identity and registration time.
    pub fn with_details(&self, draft: ClientDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name,
            age: draft.age,
            income: draft.income,
            registered_at: self.registered_at,
        }
    }
}

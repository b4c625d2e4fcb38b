use std::collections::BTreeMap;

use super::domain::{ClientDraft, ClientForm};

pub const MINIMUM_CLIENT_AGE: u32 = 18;

/// Field-level failures collected while validating a client form.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid client form: {}", summary(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    fn record(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.fields
    }
}

fn summary(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field} {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Guard turning inbound forms into validated drafts.
#[derive(Debug, Clone)]
pub struct ClientValidator {
    minimum_age: u32,
}

impl Default for ClientValidator {
    fn default() -> Self {
        Self::with_minimum_age(MINIMUM_CLIENT_AGE)
    }
}

impl ClientValidator {
    pub fn with_minimum_age(minimum_age: u32) -> Self {
        Self { minimum_age }
    }

    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    pub fn draft_from_form(&self, form: ClientForm) -> Result<ClientDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = match form.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => {
                errors.record("name", "is required");
                None
            }
        };

        let age = match form.age {
            None => {
                errors.record("age", "is required");
                None
            }
            Some(age) if age < i64::from(self.minimum_age) => {
                errors.record("age", format!("must be at least {}", self.minimum_age));
                None
            }
            Some(age) => match u32::try_from(age) {
                Ok(age) => Some(age),
                Err(_) => {
                    errors.record("age", "is out of range");
                    None
                }
            },
        };

        let income = match form.income {
            None => {
                errors.record("income", "is required");
                None
            }
            Some(income) if !income.is_finite() || income < 0.0 => {
                errors.record("income", "must be a non-negative amount");
                None
            }
            Some(income) => Some(income),
        };

        match (name, age, income) {
            (Some(name), Some(age), Some(income)) => Ok(ClientDraft { name, age, income }),
            _ => Err(errors),
        }
    }
}

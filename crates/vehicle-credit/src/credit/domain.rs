use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::domain::ClientId;

/// Vehicle classes that can be financed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCategory {
    Hatch,
    Suv,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 2] = [VehicleCategory::Hatch, VehicleCategory::Suv];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleCategory::Hatch => "HATCH",
            VehicleCategory::Suv => "SUV",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleCategory {
    type Err = InvalidCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HATCH" => Ok(VehicleCategory::Hatch),
            "SUV" => Ok(VehicleCategory::Suv),
            _ => Err(InvalidCategory(raw.to_string())),
        }
    }
}

/// Raised when a vehicle label does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle category '{0}' (expected HATCH or SUV)")]
pub struct InvalidCategory(pub String);

/// Credit products offered at onboarding, each bound to one interest rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditType {
    FixedInterest,
    VariableInterest,
    Payroll,
}

impl CreditType {
    pub const ALL: [CreditType; 3] = [
        CreditType::FixedInterest,
        CreditType::VariableInterest,
        CreditType::Payroll,
    ];

    pub const fn interest_rate(self) -> f64 {
        match self {
            CreditType::FixedInterest => 5.0,
            CreditType::VariableInterest => 7.5,
            CreditType::Payroll => 4.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditType::FixedInterest => "FIXED_INTEREST",
            CreditType::VariableInterest => "VARIABLE_INTEREST",
            CreditType::Payroll => "PAYROLL",
        }
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier wrapper for credit offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditOfferId(pub String);

impl CreditOfferId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

/// Credit product attached to a client at onboarding.
///
/// The rate is always derived from the credit type; there is no way to build an
/// offer carrying any other rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditOffer {
    id: CreditOfferId,
    client_id: ClientId,
    credit_type: CreditType,
    interest_rate: f64,
    created_at: DateTime<Utc>,
}

impl CreditOffer {
    pub fn new(client_id: ClientId, credit_type: CreditType) -> Self {
        Self {
            id: CreditOfferId::generate(),
            client_id,
            credit_type,
            interest_rate: credit_type.interest_rate(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &CreditOfferId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn credit_type(&self) -> CreditType {
        self.credit_type
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

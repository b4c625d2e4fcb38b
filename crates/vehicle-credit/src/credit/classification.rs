use serde::Serialize;

use super::domain::{CreditOffer, CreditType};
use super::thresholds::{
    FIXED_INTEREST_AGES, PAYROLL_AGE_FLOOR, VARIABLE_INTEREST_AGES, VARIABLE_INTEREST_INCOME,
};
use crate::clients::domain::Client;

/// Raised when an (age, income) pair matches no credit tier.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("client aged {age} with income {income:.2} does not qualify for any credit type")]
pub struct NotQualified {
    pub age: u32,
    pub income: f64,
}

struct ClassificationRule {
    tier: CreditType,
    condition: &'static str,
    applies: fn(u32, f64) -> bool,
}

fn young_adult(age: u32, _income: f64) -> bool {
    FIXED_INTEREST_AGES.contains(&age)
}

fn working_age_mid_income(age: u32, income: f64) -> bool {
    VARIABLE_INTEREST_AGES.contains(&age) && VARIABLE_INTEREST_INCOME.contains(&income)
}

fn retiree(age: u32, _income: f64) -> bool {
    age > PAYROLL_AGE_FLOOR
}

// First match wins. Ages 21-25 satisfy both of the first two rules, so the
// order decides their tier.
const RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        tier: CreditType::FixedInterest,
        condition: "age 18-25, any income",
        applies: young_adult,
    },
    ClassificationRule {
        tier: CreditType::VariableInterest,
        condition: "age 21-65 with income 5000-15000",
        applies: working_age_mid_income,
    },
    ClassificationRule {
        tier: CreditType::Payroll,
        condition: "age over 65, any income",
        applies: retiree,
    },
];

/// Public description of one classification rule, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDescriptor {
    pub priority: usize,
    pub credit_type: CreditType,
    pub interest_rate: f64,
    pub condition: &'static str,
}

/// Stateless classifier assigning exactly one credit tier per client.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditClassifier;

impl CreditClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, age: u32, income: f64) -> Result<CreditType, NotQualified> {
        RULES
            .iter()
            .find(|rule| (rule.applies)(age, income))
            .map(|rule| rule.tier)
            .ok_or(NotQualified { age, income })
    }

    /// Build the onboarding offer for a client, carrying the tier's fixed rate.
    pub fn offer_for(&self, client: &Client) -> Result<CreditOffer, NotQualified> {
        let tier = self.classify(client.age, client.income)?;
        Ok(CreditOffer::new(client.id.clone(), tier))
    }

    pub fn tiers(&self) -> Vec<TierDescriptor> {
        RULES
            .iter()
            .enumerate()
            .map(|(index, rule)| TierDescriptor {
                priority: index + 1,
                credit_type: rule.tier,
                interest_rate: rule.tier.interest_rate(),
                condition: rule.condition,
            })
            .collect()
    }
}

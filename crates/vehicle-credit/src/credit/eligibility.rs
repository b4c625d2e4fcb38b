use super::domain::VehicleCategory;
use super::thresholds::{HATCH_INCOME_MAX, HATCH_INCOME_MIN, SUV_AGE_FLOOR, SUV_INCOME_FLOOR};
use crate::clients::domain::Client;

/// Stateless verdict on whether an (age, income) pair may finance a vehicle category.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn is_eligible(&self, age: u32, income: f64, category: VehicleCategory) -> bool {
        match category {
            VehicleCategory::Hatch => (HATCH_INCOME_MIN..=HATCH_INCOME_MAX).contains(&income),
            VehicleCategory::Suv => income > SUV_INCOME_FLOOR && age > SUV_AGE_FLOOR,
        }
    }

    pub fn evaluate(&self, client: &Client, category: VehicleCategory) -> bool {
        self.is_eligible(client.age, client.income, category)
    }
}

//! Credit eligibility and tier classification rules.
//!
//! Both components are pure functions over a client's age and income, safe to
//! call from any number of request handlers at once.

mod classification;
pub mod domain;
mod eligibility;
pub mod thresholds;

pub use classification::{CreditClassifier, NotQualified, TierDescriptor};
pub use domain::{CreditOffer, CreditOfferId, CreditType, InvalidCategory, VehicleCategory};
pub use eligibility::EligibilityEvaluator;

//! Vehicle financing credit service: client onboarding with automatic credit
//! tier assignment and per-vehicle eligibility checks.

pub mod clients;
pub mod config;
pub mod credit;
pub mod error;
pub mod telemetry;

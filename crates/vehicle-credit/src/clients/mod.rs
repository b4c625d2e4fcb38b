//! Client onboarding, storage contracts, and the HTTP surface over the credit rules.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Client, ClientDraft, ClientForm, ClientId};
pub use repository::{
    ClientRecord, ClientRepository, ClientView, CreditOfferView, CreditRepository,
    EligibilityCriteria, EligibleClientView, RepositoryError,
};
pub use router::{client_router, CheckCreditRequest};
pub use service::{ClientService, ClientServiceError, EligibleClientsQuery};
pub use validation::{ClientValidator, ValidationErrors, MINIMUM_CLIENT_AGE};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Client, ClientId};
use crate::credit::{CreditOffer, CreditType};

/// Client together with the credit offers created for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub client: Client,
    pub offers: Vec<CreditOffer>,
}

impl ClientRecord {
    pub fn view(&self) -> ClientView {
        ClientView {
            id: self.client.id.clone(),
            name: self.client.name.clone(),
            age: self.client.age,
            income: self.client.income,
            credits: self
                .offers
                .iter()
                .map(|offer| CreditOfferView {
                    id: offer.id().0.clone(),
                    credit_type: offer.credit_type(),
                    interest_rate: offer.interest_rate(),
                    created_at: offer.created_at(),
                })
                .collect(),
        }
    }
}

/// Persistence-side pre-filter for the bulk eligible-clients listing.
///
/// All bounds are inclusive and a client only matches when it owns an offer of
/// `credit_type`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityCriteria {
    pub income_min: f64,
    pub income_max: f64,
    pub age_min: u32,
    pub age_max: u32,
    pub credit_type: CreditType,
}

impl EligibilityCriteria {
    pub fn matches(&self, client: &Client, offers: &[CreditOffer]) -> bool {
        (self.income_min..=self.income_max).contains(&client.income)
            && (self.age_min..=self.age_max).contains(&client.age)
            && offers.iter().any(|offer| {
                offer.client_id() == &client.id && offer.credit_type() == self.credit_type
            })
    }
}

/// Storage abstraction for client records.
pub trait ClientRepository: Send + Sync {
    fn insert(&self, client: Client) -> Result<Client, RepositoryError>;
    fn update(&self, client: Client) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError>;
    fn all(&self) -> Result<Vec<Client>, RepositoryError>;
    fn delete(&self, id: &ClientId) -> Result<(), RepositoryError>;
    fn find_eligible(
        &self,
        criteria: &EligibilityCriteria,
    ) -> Result<Vec<Client>, RepositoryError>;
}

/// Storage abstraction for credit offers.
pub trait CreditRepository: Send + Sync {
    fn save(&self, offer: CreditOffer) -> Result<(), RepositoryError>;
    fn offers_for(&self, client_id: &ClientId) -> Result<Vec<CreditOffer>, RepositoryError>;
    fn remove_for(&self, client_id: &ClientId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Wire representation of a client and its credit offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientView {
    pub id: ClientId,
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub credits: Vec<CreditOfferView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditOfferView {
    pub id: String,
    pub credit_type: CreditType,
    pub interest_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Reduced view returned by the eligible-clients listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibleClientView {
    pub name: String,
    pub income: f64,
}

impl From<&Client> for EligibleClientView {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            income: client.income,
        }
    }
}

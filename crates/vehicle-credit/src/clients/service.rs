use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::domain::{Client, ClientForm, ClientId};
use super::repository::{
    ClientRecord, ClientRepository, CreditRepository, EligibilityCriteria, RepositoryError,
};
use super::validation::{ClientValidator, ValidationErrors};
use crate::credit::thresholds::{HATCH_INCOME_MAX, HATCH_INCOME_MIN};
use crate::credit::{
    CreditClassifier, CreditType, EligibilityEvaluator, InvalidCategory, NotQualified,
    TierDescriptor, VehicleCategory,
};

/// Filters accepted by the bulk eligible-clients listing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleClientsQuery {
    pub min_age: i64,
    pub max_age: i64,
    pub credit_type: CreditType,
}

/// Service composing validation, the credit rules, and the client/credit stores.
pub struct ClientService<R, C> {
    validator: Arc<ClientValidator>,
    clients: Arc<R>,
    credits: Arc<C>,
    evaluator: EligibilityEvaluator,
    classifier: CreditClassifier,
}

impl<R, C> ClientService<R, C>
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    pub fn new(clients: Arc<R>, credits: Arc<C>) -> Self {
        Self::with_validator(ClientValidator::default(), clients, credits)
    }

    pub fn with_validator(validator: ClientValidator, clients: Arc<R>, credits: Arc<C>) -> Self {
        Self {
            validator: Arc::new(validator),
            clients,
            credits,
            evaluator: EligibilityEvaluator::new(),
            classifier: CreditClassifier::new(),
        }
    }

    /// Register a client and attach its onboarding credit offer.
    ///
    /// Classification runs before anything is stored, so a client that matches
    /// no credit tier is never persisted.
    pub fn create(&self, form: ClientForm) -> Result<ClientRecord, ClientServiceError> {
        let draft = self.validator.draft_from_form(form)?;
        let client = Client::register(draft);

        let offer = match self.classifier.offer_for(&client) {
            Ok(offer) => offer,
            Err(err) => {
                warn!(age = client.age, income = client.income, "client rejected: {err}");
                return Err(err.into());
            }
        };

        let client = self.clients.insert(client)?;
        if let Err(err) = self.credits.save(offer.clone()) {
            if let Err(rollback) = self.clients.delete(&client.id) {
                warn!(client_id = %client.id, %rollback, "failed to roll back client without offer");
            }
            return Err(err.into());
        }

        info!(
            client_id = %client.id,
            credit_type = %offer.credit_type(),
            interest_rate = offer.interest_rate(),
            "client registered"
        );

        Ok(ClientRecord {
            client,
            offers: vec![offer],
        })
    }

    /// Fetch a client and its offers.
    pub fn get(&self, id: &ClientId) -> Result<ClientRecord, ClientServiceError> {
        let client = self.fetch_client(id)?;
        let offers = self.credits.offers_for(&client.id)?;
        Ok(ClientRecord { client, offers })
    }

    pub fn list(&self) -> Result<Vec<ClientRecord>, ClientServiceError> {
        self.clients
            .all()?
            .into_iter()
            .map(|client| -> Result<ClientRecord, ClientServiceError> {
                let offers = self.credits.offers_for(&client.id)?;
                Ok(ClientRecord { client, offers })
            })
            .collect()
    }

    /// Replace a client's details. Existing credit offers are left untouched.
    pub fn update(
        &self,
        id: &ClientId,
        form: ClientForm,
    ) -> Result<ClientRecord, ClientServiceError> {
        let draft = self.validator.draft_from_form(form)?;
        let current = self.fetch_client(id)?;
        let updated = current.with_details(draft);

        self.clients.update(updated.clone())?;
        info!(client_id = %id, "client updated");

        let offers = self.credits.offers_for(id)?;
        Ok(ClientRecord {
            client: updated,
            offers,
        })
    }

    /// Remove a client along with the offers created for it.
    ///
    /// Offers go first; if the client itself cannot be removed afterwards they
    /// are saved back so no client is left without its offers.
    pub fn delete(&self, id: &ClientId) -> Result<(), ClientServiceError> {
        self.fetch_client(id)?;
        let offers = self.credits.offers_for(id)?;
        self.credits.remove_for(id)?;

        if let Err(err) = self.clients.delete(id) {
            for offer in offers {
                if let Err(restore) = self.credits.save(offer) {
                    warn!(client_id = %id, %restore, "failed to restore offer after aborted delete");
                }
            }
            return Err(err.into());
        }

        info!(client_id = %id, "client deleted");
        Ok(())
    }

    /// Evaluate a stored client against a vehicle category.
    pub fn check_eligibility(
        &self,
        id: &ClientId,
        category: VehicleCategory,
    ) -> Result<bool, ClientServiceError> {
        let client = self.fetch_client(id)?;
        let eligible = self.evaluator.evaluate(&client, category);
        debug!(client_id = %id, %category, eligible, "eligibility evaluated");
        Ok(eligible)
    }

    /// List stored clients matching the persistence-side pre-filter.
    ///
    /// Only HATCH has a pre-filter; SUV always yields an empty listing.
    pub fn eligible_clients(
        &self,
        category: VehicleCategory,
        query: EligibleClientsQuery,
    ) -> Result<Vec<Client>, ClientServiceError> {
        if query.min_age < 0 || query.max_age < 0 || query.min_age > query.max_age {
            return Err(ClientServiceError::InvalidCriteria(format!(
                "age range {}..={} must be non-negative and ordered",
                query.min_age, query.max_age
            )));
        }

        match category {
            VehicleCategory::Hatch => {
                let criteria = EligibilityCriteria {
                    income_min: HATCH_INCOME_MIN,
                    income_max: HATCH_INCOME_MAX,
                    age_min: clamp_age(query.min_age),
                    age_max: clamp_age(query.max_age),
                    credit_type: query.credit_type,
                };
                Ok(self.clients.find_eligible(&criteria)?)
            }
            VehicleCategory::Suv => Ok(Vec::new()),
        }
    }

    pub fn credit_tiers(&self) -> Vec<TierDescriptor> {
        self.classifier.tiers()
    }

    fn fetch_client(&self, id: &ClientId) -> Result<Client, ClientServiceError> {
        match self.clients.fetch(id)? {
            Some(client) => Ok(client),
            None => {
                debug!(client_id = %id, "client not found");
                Err(RepositoryError::NotFound.into())
            }
        }
    }
}

fn clamp_age(age: i64) -> u32 {
    u32::try_from(age).unwrap_or(u32::MAX)
}

/// Error raised by the client service.
#[derive(Debug, thiserror::Error)]
pub enum ClientServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    NotQualified(#[from] NotQualified),
    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),
    #[error("invalid eligibility criteria: {0}")]
    InvalidCriteria(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use vehicle_credit::clients::{
    Client, ClientId, ClientRepository, CreditRepository, EligibilityCriteria, RepositoryError,
};
use vehicle_credit::credit::CreditOffer;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store backing both clients and their credit offers.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCreditStore {
    clients: Arc<Mutex<HashMap<ClientId, Client>>>,
    offers: Arc<Mutex<Vec<CreditOffer>>>,
}

fn acquire<'a, T>(
    mutex: &'a Mutex<T>,
    name: &str,
) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} mutex poisoned")))
}

impl InMemoryCreditStore {
    fn clients(&self) -> Result<MutexGuard<'_, HashMap<ClientId, Client>>, RepositoryError> {
        acquire(&self.clients, "client")
    }

    fn offers(&self) -> Result<MutexGuard<'_, Vec<CreditOffer>>, RepositoryError> {
        acquire(&self.offers, "offer")
    }
}

impl ClientRepository for InMemoryCreditStore {
    fn insert(&self, client: Client) -> Result<Client, RepositoryError> {
        let mut guard = self.clients()?;
        if guard.contains_key(&client.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    fn update(&self, client: Client) -> Result<(), RepositoryError> {
        let mut guard = self.clients()?;
        if guard.contains_key(&client.id) {
            guard.insert(client.id.clone(), client);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        Ok(self.clients()?.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Client>, RepositoryError> {
        let mut clients: Vec<Client> = self.clients()?.values().cloned().collect();
        clients.sort_by(|left, right| left.registered_at.cmp(&right.registered_at));
        Ok(clients)
    }

    fn delete(&self, id: &ClientId) -> Result<(), RepositoryError> {
        self.clients()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn find_eligible(&self, criteria: &EligibilityCriteria) -> Result<Vec<Client>, RepositoryError> {
        let offers = self.offers()?.clone();
        let mut matches: Vec<Client> = self
            .clients()?
            .values()
            .filter(|client| criteria.matches(client, &offers))
            .cloned()
            .collect();
        matches.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(matches)
    }
}

impl CreditRepository for InMemoryCreditStore {
    fn save(&self, offer: CreditOffer) -> Result<(), RepositoryError> {
        self.offers()?.push(offer);
        Ok(())
    }

    fn offers_for(&self, client_id: &ClientId) -> Result<Vec<CreditOffer>, RepositoryError> {
        Ok(self
            .offers()?
            .iter()
            .filter(|offer| offer.client_id() == client_id)
            .cloned()
            .collect())
    }

    fn remove_for(&self, client_id: &ClientId) -> Result<(), RepositoryError> {
        self.offers()?
            .retain(|offer| offer.client_id() != client_id);
        Ok(())
    }
}

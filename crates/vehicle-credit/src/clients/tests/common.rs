use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::clients::domain::{Client, ClientForm, ClientId};
use crate::clients::repository::{
    ClientRepository, CreditRepository, EligibilityCriteria, RepositoryError,
};
use crate::clients::{client_router, ClientService};
use crate::credit::CreditOffer;

pub(super) fn form(name: &str, age: i64, income: f64) -> ClientForm {
    ClientForm {
        name: Some(name.to_string()),
        age: Some(age),
        income: Some(income),
    }
}

pub(super) fn young_driver() -> ClientForm {
    form("Ana Souza", 22, 4000.0)
}

pub(super) fn mid_career() -> ClientForm {
    form("Bruno Lima", 35, 10000.0)
}

pub(super) fn retiree() -> ClientForm {
    form("Carla Reis", 70, 0.0)
}

pub(super) fn unqualified() -> ClientForm {
    form("Davi Costa", 40, 1000.0)
}

pub(super) fn build_service() -> (ClientService<MemoryStore, MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = ClientService::new(store.clone(), store.clone());
    (service, store)
}

pub(super) fn router_with_service(
    service: ClientService<MemoryStore, MemoryStore>,
) -> axum::Router {
    client_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    clients: Arc<Mutex<HashMap<ClientId, Client>>>,
    offers: Arc<Mutex<Vec<CreditOffer>>>,
}

impl MemoryStore {
    pub(super) fn client_count(&self) -> usize {
        self.clients.lock().expect("client mutex poisoned").len()
    }

    pub(super) fn offer_count(&self) -> usize {
        self.offers.lock().expect("offer mutex poisoned").len()
    }
}

impl ClientRepository for MemoryStore {
    fn insert(&self, client: Client) -> Result<Client, RepositoryError> {
        let mut guard = self.clients.lock().expect("client mutex poisoned");
        if guard.contains_key(&client.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    fn update(&self, client: Client) -> Result<(), RepositoryError> {
        let mut guard = self.clients.lock().expect("client mutex poisoned");
        match guard.get_mut(&client.id) {
            Some(slot) => {
                *slot = client;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Client>, RepositoryError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        let mut clients: Vec<Client> = guard.values().cloned().collect();
        clients.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(clients)
    }

    fn delete(&self, id: &ClientId) -> Result<(), RepositoryError> {
        let mut guard = self.clients.lock().expect("client mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn find_eligible(
        &self,
        criteria: &EligibilityCriteria,
    ) -> Result<Vec<Client>, RepositoryError> {
        let offers = self.offers.lock().expect("offer mutex poisoned").clone();
        let mut matches: Vec<Client> = self
            .all()?
            .into_iter()
            .filter(|client| criteria.matches(client, &offers))
            .collect();
        matches.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(matches)
    }
}

impl CreditRepository for MemoryStore {
    fn save(&self, offer: CreditOffer) -> Result<(), RepositoryError> {
        self.offers
            .lock()
            .expect("offer mutex poisoned")
            .push(offer);
        Ok(())
    }

    fn offers_for(&self, client_id: &ClientId) -> Result<Vec<CreditOffer>, RepositoryError> {
        let guard = self.offers.lock().expect("offer mutex poisoned");
        Ok(guard
            .iter()
            .filter(|offer| offer.client_id() == client_id)
            .cloned()
            .collect())
    }

    fn remove_for(&self, client_id: &ClientId) -> Result<(), RepositoryError> {
        self.offers
            .lock()
            .expect("offer mutex poisoned")
            .retain(|offer| offer.client_id() != client_id);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl ClientRepository for UnavailableStore {
    fn insert(&self, _client: Client) -> Result<Client, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _client: Client) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Client>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ClientId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_eligible(
        &self,
        _criteria: &EligibilityCriteria,
    ) -> Result<Vec<Client>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Client store that keeps every record it is asked to delete.
#[derive(Default, Clone)]
pub(super) struct UndeletableClients {
    inner: MemoryStore,
}

impl ClientRepository for UndeletableClients {
    fn insert(&self, client: Client) -> Result<Client, RepositoryError> {
        self.inner.insert(client)
    }

    fn update(&self, client: Client) -> Result<(), RepositoryError> {
        self.inner.update(client)
    }

    fn fetch(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn all(&self) -> Result<Vec<Client>, RepositoryError> {
        self.inner.all()
    }

    fn delete(&self, _id: &ClientId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("delete refused".to_string()))
    }

    fn find_eligible(
        &self,
        criteria: &EligibilityCriteria,
    ) -> Result<Vec<Client>, RepositoryError> {
        self.inner.find_eligible(criteria)
    }
}

/// Credit store that refuses every write.
pub(super) struct ReadOnlyCredits;

impl CreditRepository for ReadOnlyCredits {
    fn save(&self, _offer: CreditOffer) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn offers_for(&self, _client_id: &ClientId) -> Result<Vec<CreditOffer>, RepositoryError> {
        Ok(Vec::new())
    }

    fn remove_for(&self, _client_id: &ClientId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

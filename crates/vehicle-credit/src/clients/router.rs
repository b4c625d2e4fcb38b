use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use super::domain::{ClientForm, ClientId};
use super::repository::{
    ClientRepository, ClientView, CreditRepository, EligibleClientView, RepositoryError,
};
use super::service::{ClientService, ClientServiceError, EligibleClientsQuery};
use crate::credit::VehicleCategory;

/// Body of the single-client eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCreditRequest {
    #[serde(default, deserialize_with = "category_label")]
    pub vehicle_model: String,
}

// Non-string labels are kept as their JSON text so they fail category parsing.
fn category_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) => label,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Router builder exposing the client CRUD and credit endpoints.
pub fn client_router<R, C>(service: Arc<ClientService<R, C>>) -> Router
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    Router::new()
        .route(
            "/api/clients",
            post(create_handler::<R, C>).get(list_handler::<R, C>),
        )
        .route(
            "/api/clients/:id",
            get(get_handler::<R, C>)
                .put(update_handler::<R, C>)
                .delete(delete_handler::<R, C>),
        )
        .route(
            "/api/clients/check/:client_id",
            post(check_handler::<R, C>),
        )
        .route(
            "/api/clients/eligible/:vehicle_model",
            get(eligible_handler::<R, C>),
        )
        .route("/api/credit-types", get(credit_types_handler::<R, C>))
        .with_state(service)
}

pub(crate) async fn create_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
    payload: Result<Json<ClientForm>, JsonRejection>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return error_response(malformed(rejection)),
    };

    match service.create(form) {
        Ok(record) => {
            let location = format!("/api/clients/{}", record.client.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(record.view()),
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<ClientView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    match service.get(&ClientId(id)) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
    Path(id): Path<String>,
    payload: Result<Json<ClientForm>, JsonRejection>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return error_response(malformed(rejection)),
    };

    match service.update(&ClientId(id), form) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    let id = ClientId(id);
    match service.delete(&id) {
        Ok(()) => {
            let payload = json!({
                "id": id.0,
                "status": "deleted",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
    Path(client_id): Path<String>,
    payload: Result<Json<CheckCreditRequest>, JsonRejection>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return error_response(malformed(rejection)),
    };

    let category = match request.vehicle_model.parse::<VehicleCategory>() {
        Ok(category) => category,
        Err(error) => return error_response(error.into()),
    };

    match service.check_eligibility(&ClientId(client_id), category) {
        Ok(eligible) => (StatusCode::OK, Json(eligible)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligible_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
    Path(vehicle_model): Path<String>,
    Query(query): Query<EligibleClientsQuery>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    let category = match vehicle_model.parse::<VehicleCategory>() {
        Ok(category) => category,
        Err(error) => return error_response(error.into()),
    };

    match service.eligible_clients(category, query) {
        Ok(clients) => {
            let views: Vec<EligibleClientView> =
                clients.iter().map(EligibleClientView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn credit_types_handler<R, C>(
    State(service): State<Arc<ClientService<R, C>>>,
) -> Response
where
    R: ClientRepository + 'static,
    C: CreditRepository + 'static,
{
    (StatusCode::OK, Json(service.credit_tiers())).into_response()
}

fn malformed(rejection: JsonRejection) -> ClientServiceError {
    ClientServiceError::MalformedBody(rejection.body_text())
}

pub(crate) fn error_response(error: ClientServiceError) -> Response {
    let status = match &error {
        ClientServiceError::Validation(errors) => {
            let payload = json!({
                "error": error.to_string(),
                "fields": errors.fields(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
        ClientServiceError::NotQualified(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ClientServiceError::InvalidCategory(_)
        | ClientServiceError::InvalidCriteria(_)
        | ClientServiceError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        ClientServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ClientServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ClientServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

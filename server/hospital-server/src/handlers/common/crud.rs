//! Generic form-driven CRUD handlers
//!
//! Every entity exposes the same five operations: list, add, edit, update and
//! delete. They are written once here against [`FormResource`]; the entity
//! modules only describe their form and listing route.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use database_layer::Entity;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use crate::validation::{parse_id, CoerceForm};

/// An entity that can be created and updated from a submitted form
pub trait FormResource: Entity {
    /// Raw submission, every field as optional text
    type Form: DeserializeOwned + CoerceForm<Output = Self::Fields> + Send + 'static;

    /// Listing route that mutations redirect back to
    const LISTING_PATH: &'static str;
}

pub async fn list<E: FormResource>(
    State(server): State<HospitalServer>,
) -> ApiResult<Json<ApiResponse<Vec<E>>>> {
    let rows = server.repository::<E>().list().await?;
    Ok(Json(api_success(rows)))
}

pub async fn create<E: FormResource>(
    State(server): State<HospitalServer>,
    form: Result<Form<E::Form>, FormRejection>,
) -> ApiResult<Redirect> {
    let fields = read_form::<E>(form)?;
    let created = server.repository::<E>().create(fields).await?;

    log_mutation(&server, "created", &created);
    Ok(Redirect::to(E::LISTING_PATH))
}

/// Current values of one record, used to prefill the edit form
pub async fn edit<E: FormResource>(
    State(server): State<HospitalServer>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<E>>> {
    let id = parse_id(&id)?;
    let row = server.repository::<E>().get_by_id(id).await?;
    Ok(Json(api_success(row)))
}

pub async fn update<E: FormResource>(
    State(server): State<HospitalServer>,
    Path(id): Path<String>,
    form: Result<Form<E::Form>, FormRejection>,
) -> ApiResult<Redirect> {
    let id = parse_id(&id)?;
    let fields = read_form::<E>(form)?;
    let updated = server.repository::<E>().update(id, fields).await?;

    log_mutation(&server, "updated", &updated);
    Ok(Redirect::to(E::LISTING_PATH))
}

pub async fn delete<E: FormResource>(
    State(server): State<HospitalServer>,
    Path(id): Path<String>,
) -> ApiResult<Redirect> {
    let id = parse_id(&id)?;
    server.repository::<E>().delete_by_id(id).await?;

    info!(entity = E::SCHEMA.entity, id, "Record deleted");
    Ok(Redirect::to(E::LISTING_PATH))
}

fn read_form<E: FormResource>(form: Result<Form<E::Form>, FormRejection>) -> ApiResult<E::Fields> {
    let Form(raw) = form.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    raw.coerce()
}

fn log_mutation<E: Entity>(server: &HospitalServer, action: &'static str, record: &E) {
    info!(entity = E::SCHEMA.entity, id = record.id(), action, "Record saved");

    if tracing::enabled!(tracing::Level::DEBUG) {
        let values = serde_json::to_string(record.fields()).unwrap_or_default();
        debug!(
            entity = E::SCHEMA.entity,
            id = record.id(),
            values = %server.redact(&values),
            "Saved values"
        );
    }
}

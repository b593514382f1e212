pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};
use database_layer::{Appointment, Billing, Doctor, Patient};

use crate::{
    handlers::{appointments, billing, common::crud, health},
    server::HospitalServer,
};

/// Create index and health check routes
pub fn health_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::health::INDEX, get(health::index))
        .route(paths::health::HEALTH, get(health::health_check))
}

/// Create patient routes
pub fn patient_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::patients::LIST, get(crud::list::<Patient>))
        .route(paths::patients::ADD, post(crud::create::<Patient>))
        .route(paths::patients::DELETE, get(crud::delete::<Patient>))
        .route(
            paths::patients::UPDATE,
            get(crud::edit::<Patient>).post(crud::update::<Patient>),
        )
}

/// Create doctor routes
pub fn doctor_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::doctors::LIST, get(crud::list::<Doctor>))
        .route(paths::doctors::ADD, post(crud::create::<Doctor>))
        .route(paths::doctors::DELETE, get(crud::delete::<Doctor>))
        .route(
            paths::doctors::UPDATE,
            get(crud::edit::<Doctor>).post(crud::update::<Doctor>),
        )
}

/// Create appointment routes; the listing carries patients and doctors too
pub fn appointment_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::appointments::LIST, get(appointments::list_appointments))
        .route(paths::appointments::ADD, post(crud::create::<Appointment>))
        .route(paths::appointments::DELETE, get(crud::delete::<Appointment>))
        .route(
            paths::appointments::UPDATE,
            get(crud::edit::<Appointment>).post(crud::update::<Appointment>),
        )
}

/// Create billing routes; the listing carries patients too
pub fn billing_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::billing::LIST, get(billing::list_bills))
        .route(paths::billing::ADD, post(crud::create::<Billing>))
        .route(paths::billing::DELETE, get(crud::delete::<Billing>))
        .route(
            paths::billing::UPDATE,
            get(crud::edit::<Billing>).post(crud::update::<Billing>),
        )
}

/// Create all application routes
pub fn create_routes() -> Router<HospitalServer> {
    Router::new()
        .merge(health_routes())
        .merge(patient_routes())
        .merge(doctor_routes())
        .merge(appointment_routes())
        .merge(billing_routes())
}

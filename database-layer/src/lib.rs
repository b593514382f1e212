//! Entity store and CRUD repositories for the Hospital Records Engine
//!
//! This crate owns every persisted row. It provides:
//! - table schemas for patients, doctors, appointments and billing records
//! - a generic [`Repository`] implementing create / list / get / update / delete
//!   once for all entity types
//! - two interchangeable backends behind [`Store`]: a PostgreSQL pool and an
//!   in-process memory store
//! - an explicit [`ReferentialPolicy`] deciding whether foreign keys are enforced
//!
//! # Example
//!
//! ```rust,no_run
//! use database_layer::{Patient, PatientFields, ReferentialPolicy, Repository, Store};
//!
//! # async fn run() -> Result<(), database_layer::DatabaseError> {
//! let store = Store::connect("postgresql://localhost/hospital_db", 10, ReferentialPolicy::Orphan).await?;
//! let patients = Repository::<Patient>::new(store);
//!
//! let created = patients
//!     .create(PatientFields {
//!         name: "Asha".to_string(),
//!         age: 30,
//!         gender: "F".to_string(),
//!         phone: "555-0100".to_string(),
//!     })
//!     .await?;
//! let fetched = patients.get_by_id(created.id).await?;
//! assert_eq!(fetched, created);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod entity;
pub mod error;
pub mod memory;
pub mod models;
mod postgres;
pub mod repository;
pub mod schema;
pub mod store;

pub use connection::DatabasePool;
pub use entity::Entity;
pub use error::{DatabaseError, DatabaseResult};
pub use memory::MemoryStore;
pub use models::*;
pub use repository::Repository;
pub use schema::{Column, ColumnType, ForeignKey, ReferentialPolicy, TableSchema};
pub use store::Store;

//! Common error handling utilities for the Hospital Records Engine
//!
//! Provides the process-level [`HospitalError`] used by the server binary and
//! the stable error codes that API error bodies carry, so that clients can
//! branch on a code instead of parsing messages.
//!
//! # Error Categories
//!
//! - **Validation**: malformed or missing form input (`VALIDATION_*`)
//! - **Database**: connectivity, query and constraint failures (`DB_*`)
//! - **Resource**: operations targeting rows that do not exist (`RESOURCE_*`)
//! - **System**: everything else (`SYSTEM_*`)

pub mod codes;
pub mod types;

pub use types::*;

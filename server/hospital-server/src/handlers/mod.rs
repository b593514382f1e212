pub mod appointments;
pub mod billing;
pub mod common;
pub mod doctors;
pub mod health;
pub mod patients;

//! Domain layer for the idea evaluator
//!
//! Models, errors, response schemas and the port traits external
//! capabilities must satisfy.

pub mod errors;
pub mod models;
pub mod ports;
pub mod schemas;

pub use errors::{DomainError, DomainResult, IntegrationError, IntegrationResult};

//! Adapters implementing the domain ports.

pub mod reasoning;
pub mod sqlite;

//! Database module: models, schema and queries for the record store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: connection factory and every query the app issues

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{ChildFields, DbChild, DbDose, DoseStatus, Reminder, VaccineCoverage};
pub use schema::SQLITE_INIT;
pub use sqlite::{Records, Store};

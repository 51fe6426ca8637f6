//! Row structs and DTOs for the pressure-ingest tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and, where rows are created outside the importer, a
//! `Deserialize` create DTO.

pub mod alert;
pub mod dataset;
pub mod frame;
pub mod patient;

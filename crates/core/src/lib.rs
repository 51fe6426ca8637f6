//! Graphene core: domain types and the pressure ingest pipeline.
//!
//! Nothing in this crate talks to a database. Storage is reached through the
//! sink traits in [`pressure::sink`], which `graphene-db` implements for
//! PostgreSQL and [`pressure::memory`] implements in process.

pub mod error;
pub mod hashing;
pub mod pressure;
pub mod types;

//! Video catalog admin — transactional infrastructure.
//!
//! Hosts the PostgreSQL-backed unit of work and the pool configuration.
//! Repository implementations bind their statements to the transaction
//! this crate exposes.

pub mod config;
pub mod pg_unit_of_work;

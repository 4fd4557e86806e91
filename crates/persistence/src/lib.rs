//! Persistence layer for Taskboard.
//!
//! This crate contains:
//! - Connection pool setup for a dedicated PostgreSQL schema
//! - Entity definitions (database row mappings)
//! - One repository per entity group
//! - The `DatabaseManager` for migrations, wiping and demo data
//! - The `Database` facade tying it all together

pub mod database;
pub mod db;
pub mod entities;
pub mod error;
pub mod manager;
pub mod metrics;
pub mod repositories;

pub use database::Database;
pub use error::{DatabaseError, DatabaseResult};

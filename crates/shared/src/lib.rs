//! Shared utilities for the Taskboard backend.
//!
//! - Password hashing with Argon2id for employee credentials
//! - Validation helpers reused by the domain and persistence crates

pub mod password;
pub mod validation;

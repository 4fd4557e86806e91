//! Domain layer for the Taskboard backend.
//!
//! Plain models for employees, projects, tasks, tags and notifications,
//! plus the validated input payloads used to create them.

pub mod models;

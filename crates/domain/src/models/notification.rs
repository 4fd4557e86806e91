//! Notification domain models.
//!
//! Notifications are append-only; there is no read/unread state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employee asked for their password to be reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgottenPasswordNotification {
    pub id: i64,
    pub working_number: i32,
    pub employee_name: String,
    pub created_at: DateTime<Utc>,
}

/// An employee was assigned to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedToTaskNotification {
    pub id: i64,
    pub working_number: i32,
    pub task_id: i64,
    pub task_title: String,
    pub created_at: DateTime<Utc>,
}

/// An employee was assigned to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedToProjectNotification {
    pub id: i64,
    pub working_number: i32,
    pub project_id: i64,
    pub project_title: String,
    pub created_at: DateTime<Utc>,
}

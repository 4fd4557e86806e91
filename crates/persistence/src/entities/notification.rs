//! Notification entities.
//!
//! Each row is joined with the name or title of what it refers to.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of forgotten_password_notifications joined with the employee name.
#[derive(Debug, Clone, FromRow)]
pub struct ForgottenPasswordNotificationEntity {
    pub id: i64,
    pub working_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ForgottenPasswordNotificationEntity> for domain::models::ForgottenPasswordNotification {
    fn from(entity: ForgottenPasswordNotificationEntity) -> Self {
        Self {
            id: entity.id,
            working_number: entity.working_number,
            employee_name: format!("{} {}", entity.first_name, entity.last_name),
            created_at: entity.created_at,
        }
    }
}

/// Row of assigned_to_task_notifications joined with the task title.
#[derive(Debug, Clone, FromRow)]
pub struct AssignedToTaskNotificationEntity {
    pub id: i64,
    pub working_number: i32,
    pub task_id: i64,
    pub task_title: String,
    pub created_at: DateTime<Utc>,
}

impl From<AssignedToTaskNotificationEntity> for domain::models::AssignedToTaskNotification {
    fn from(entity: AssignedToTaskNotificationEntity) -> Self {
        Self {
            id: entity.id,
            working_number: entity.working_number,
            task_id: entity.task_id,
            task_title: entity.task_title,
            created_at: entity.created_at,
        }
    }
}

/// Row of assigned_to_project_notifications joined with the project title.
#[derive(Debug, Clone, FromRow)]
pub struct AssignedToProjectNotificationEntity {
    pub id: i64,
    pub working_number: i32,
    pub project_id: i64,
    pub project_title: String,
    pub created_at: DateTime<Utc>,
}

impl From<AssignedToProjectNotificationEntity>
    for domain::models::AssignedToProjectNotification
{
    fn from(entity: AssignedToProjectNotificationEntity) -> Self {
        Self {
            id: entity.id,
            working_number: entity.working_number,
            project_id: entity.project_id,
            project_title: entity.project_title,
            created_at: entity.created_at,
        }
    }
}

//! Task entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database row mapping for the tasks table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskEntity {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub deadline: Option<NaiveDate>,
    pub estimated_hours: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<TaskEntity> for domain::models::Task {
    fn from(entity: TaskEntity) -> Self {
        Self {
            id: entity.id,
            project_id: entity.project_id,
            title: entity.title,
            description: entity.description,
            status: entity.status,
            deadline: entity.deadline,
            estimated_hours: entity.estimated_hours,
            created_at: entity.created_at,
        }
    }
}

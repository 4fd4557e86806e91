//! Project entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database row mapping for the projects table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectEntity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectEntity> for domain::models::Project {
    fn from(entity: ProjectEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            deadline: entity.deadline,
            created_at: entity.created_at,
        }
    }
}

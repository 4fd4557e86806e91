//! Tag entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the tags table.
#[derive(Debug, Clone, FromRow)]
pub struct TagEntity {
    pub id: i64,
    pub name: String,
}

impl From<TagEntity> for domain::models::Tag {
    fn from(entity: TagEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

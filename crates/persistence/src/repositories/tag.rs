//! Tag repository for database operations.

use domain::models::{NewTag, Tag};
use sqlx::PgPool;

use crate::entities::TagEntity;
use crate::metrics::QueryTimer;

/// Repository for tag rows and tag lookups by task.
#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Creates a new TagRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find_all(&self) -> Result<Vec<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_tags");
        let result = sqlx::query_as::<_, TagEntity>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_tag_by_id");
        let result = sqlx::query_as::<_, TagEntity>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List the tags attached to a task.
    pub async fn find_by_task(&self, task_id: i64) -> Result<Vec<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_tags_of_task");
        let result = sqlx::query_as::<_, TagEntity>(
            r#"
            SELECT tg.id, tg.name
            FROM task_tags tt
            JOIN tags tg ON tg.id = tt.tag_id
            WHERE tt.task_id = $1
            ORDER BY tg.id
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, tag: &NewTag) -> Result<TagEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_tag");
        let result = sqlx::query_as::<_, TagEntity>(
            "INSERT INTO tags (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&tag.name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rename a tag.
    pub async fn update(&self, tag: &Tag) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_tag");
        let result = sqlx::query("UPDATE tags SET name = $2 WHERE id = $1")
            .bind(tag.id)
            .bind(&tag.name)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete a tag; it disappears from every task.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_tag");
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

//! Task repository for database operations.
//!
//! Besides task rows this covers worker assignments and task tags.

use domain::models::{NewTask, Task};
use sqlx::PgPool;

use crate::entities::TaskEntity;
use crate::metrics::QueryTimer;

/// Repository for tasks, their workers and their tags.
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Creates a new TaskRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List all tasks.
    pub async fn find_all(&self) -> Result<Vec<TaskEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_tasks");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, project_id, title, description, status, deadline, estimated_hours, created_at
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a task by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TaskEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_task_by_id");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, project_id, title, description, status, deadline, estimated_hours, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the tasks of one project.
    pub async fn find_by_project(&self, project_id: i64) -> Result<Vec<TaskEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_tasks_of_project");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, project_id, title, description, status, deadline, estimated_hours, created_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the tasks an employee is assigned to.
    pub async fn find_by_employee(
        &self,
        working_number: i32,
    ) -> Result<Vec<TaskEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_tasks_of_employee");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.deadline,
                   t.estimated_hours, t.created_at
            FROM task_employees te
            JOIN tasks t ON t.id = te.task_id
            WHERE te.working_number = $1
            ORDER BY t.id
            "#,
        )
        .bind(working_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a task and return the stored row.
    pub async fn create(&self, task: &NewTask) -> Result<TaskEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_task");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, deadline, estimated_hours)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, title, description, status, deadline, estimated_hours, created_at
            "#,
        )
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.deadline)
        .bind(task.estimated_hours)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite every editable column of a task, including its project.
    pub async fn update(&self, task: &Task) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_task");
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET project_id = $2, title = $3, description = $4, status = $5,
                deadline = $6, estimated_hours = $7
            WHERE id = $1
            "#,
        )
        .bind(task.id)
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.deadline)
        .bind(task.estimated_hours)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete a task. Worker, tag and notification rows cascade.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_task");
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Set a task's status label.
    ///
    /// Returns the number of rows matched, so setting the current status again
    /// still reports 1.
    pub async fn change_status(&self, id: i64, status: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("change_task_status");
        let result = sqlx::query("UPDATE tasks SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Assign a worker to a task. Returns false if already assigned.
    pub async fn assign_worker(
        &self,
        working_number: i32,
        task_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("assign_worker_to_task");
        let result = sqlx::query(
            r#"
            INSERT INTO task_employees (task_id, working_number)
            VALUES ($1, $2)
            ON CONFLICT (task_id, working_number) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(working_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Remove a worker from a task.
    pub async fn remove_worker(
        &self,
        working_number: i32,
        task_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_worker_from_task");
        let result = sqlx::query(
            r#"
            DELETE FROM task_employees
            WHERE task_id = $1 AND working_number = $2
            "#,
        )
        .bind(task_id)
        .bind(working_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Assign several workers to a task in one statement.
    ///
    /// Same rules as project bulk assignment: duplicates skipped, unknown
    /// working numbers fail the statement. Returns the number of new rows.
    pub async fn assign_workers(
        &self,
        working_numbers: &[i32],
        task_id: i64,
    ) -> Result<u64, sqlx::Error> {
        if working_numbers.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("assign_workers_to_task");
        let result = sqlx::query(
            r#"
            INSERT INTO task_employees (task_id, working_number)
            SELECT DISTINCT $1::BIGINT, wn FROM UNNEST($2::INT[]) AS t(wn)
            ON CONFLICT (task_id, working_number) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(working_numbers)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Remove several workers from a task. Returns the number removed.
    pub async fn unassign_workers(
        &self,
        working_numbers: &[i32],
        task_id: i64,
    ) -> Result<u64, sqlx::Error> {
        if working_numbers.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("unassign_workers_from_task");
        let result = sqlx::query(
            r#"
            DELETE FROM task_employees
            WHERE task_id = $1 AND working_number = ANY($2)
            "#,
        )
        .bind(task_id)
        .bind(working_numbers)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Attach a tag to a task. Returns false if it was already attached.
    pub async fn add_tag(&self, task_id: i64, tag_id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("add_tag_to_task");
        let result = sqlx::query(
            r#"
            INSERT INTO task_tags (task_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT (task_id, tag_id) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Detach a tag from a task.
    pub async fn remove_tag(&self, task_id: i64, tag_id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_tag_from_task");
        let result = sqlx::query("DELETE FROM task_tags WHERE task_id = $1 AND tag_id = $2")
            .bind(task_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

//! Notification repository for database operations.
//!
//! Notifications are only ever appended and read back, newest first.

use sqlx::PgPool;

use crate::entities::{
    AssignedToProjectNotificationEntity, AssignedToTaskNotificationEntity,
    ForgottenPasswordNotificationEntity,
};
use crate::metrics::QueryTimer;

/// Repository for the three notification tables.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Record a password reset request.
    ///
    /// Returns false, without writing, when no employee has this working number.
    pub async fn create_forgotten_password(&self, working_number: i32) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("create_forgotten_password_notification");
        let result = sqlx::query(
            r#"
            INSERT INTO forgotten_password_notifications (working_number)
            SELECT working_number FROM employees WHERE working_number = $1
            "#,
        )
        .bind(working_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// List every pending password reset request.
    pub async fn find_all_forgotten_password(
        &self,
    ) -> Result<Vec<ForgottenPasswordNotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_forgotten_password_notifications");
        let result = sqlx::query_as::<_, ForgottenPasswordNotificationEntity>(
            r#"
            SELECT n.id, n.working_number, e.first_name, e.last_name, n.created_at
            FROM forgotten_password_notifications n
            JOIN employees e ON e.working_number = n.working_number
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the password reset requests of one employee.
    pub async fn find_forgotten_password_by_employee(
        &self,
        working_number: i32,
    ) -> Result<Vec<ForgottenPasswordNotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_forgotten_password_notifications_of_employee");
        let result = sqlx::query_as::<_, ForgottenPasswordNotificationEntity>(
            r#"
            SELECT n.id, n.working_number, e.first_name, e.last_name, n.created_at
            FROM forgotten_password_notifications n
            JOIN employees e ON e.working_number = n.working_number
            WHERE n.working_number = $1
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .bind(working_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record that an employee was assigned to a task. Returns the notification ID.
    pub async fn create_assigned_to_task(
        &self,
        working_number: i32,
        task_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("create_assigned_to_task_notification");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO assigned_to_task_notifications (working_number, task_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(working_number)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Notify several employees about a task assignment in one statement.
    /// Repeated working numbers get a single notification.
    pub async fn create_assigned_to_task_many(
        &self,
        working_numbers: &[i32],
        task_id: i64,
    ) -> Result<u64, sqlx::Error> {
        if working_numbers.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("create_assigned_to_task_notifications");
        let result = sqlx::query(
            r#"
            INSERT INTO assigned_to_task_notifications (working_number, task_id)
            SELECT DISTINCT wn, $2::BIGINT FROM UNNEST($1::INT[]) AS t(wn)
            "#,
        )
        .bind(working_numbers)
        .bind(task_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// List the task assignment notifications of one employee.
    pub async fn find_assigned_to_task_by_employee(
        &self,
        working_number: i32,
    ) -> Result<Vec<AssignedToTaskNotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_assigned_to_task_notifications");
        let result = sqlx::query_as::<_, AssignedToTaskNotificationEntity>(
            r#"
            SELECT n.id, n.working_number, n.task_id, t.title AS task_title, n.created_at
            FROM assigned_to_task_notifications n
            JOIN tasks t ON t.id = n.task_id
            WHERE n.working_number = $1
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .bind(working_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record that an employee was assigned to a project. Returns the notification ID.
    pub async fn create_assigned_to_project(
        &self,
        working_number: i32,
        project_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("create_assigned_to_project_notification");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO assigned_to_project_notifications (working_number, project_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(working_number)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Notify several employees about a project assignment in one statement.
    pub async fn create_assigned_to_project_many(
        &self,
        working_numbers: &[i32],
        project_id: i64,
    ) -> Result<u64, sqlx::Error> {
        if working_numbers.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("create_assigned_to_project_notifications");
        let result = sqlx::query(
            r#"
            INSERT INTO assigned_to_project_notifications (working_number, project_id)
            SELECT DISTINCT wn, $2::BIGINT FROM UNNEST($1::INT[]) AS t(wn)
            "#,
        )
        .bind(working_numbers)
        .bind(project_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// List the project assignment notifications of one employee.
    pub async fn find_assigned_to_project_by_employee(
        &self,
        working_number: i32,
    ) -> Result<Vec<AssignedToProjectNotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_assigned_to_project_notifications");
        let result = sqlx::query_as::<_, AssignedToProjectNotificationEntity>(
            r#"
            SELECT n.id, n.working_number, n.project_id, p.title AS project_title, n.created_at
            FROM assigned_to_project_notifications n
            JOIN projects p ON p.id = n.project_id
            WHERE n.working_number = $1
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .bind(working_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

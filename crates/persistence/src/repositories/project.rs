//! Project repository for database operations.

use domain::models::{NewProject, Project};
use sqlx::PgPool;

use crate::entities::ProjectEntity;
use crate::metrics::QueryTimer;

/// Repository for projects and their employee assignments.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List all projects.
    pub async fn find_all(&self) -> Result<Vec<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_projects");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT id, title, description, deadline, created_at
            FROM projects
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_project_by_id");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT id, title, description, deadline, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the projects an employee is assigned to.
    pub async fn find_by_employee(
        &self,
        working_number: i32,
    ) -> Result<Vec<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_projects_of_employee");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT p.id, p.title, p.description, p.deadline, p.created_at
            FROM project_employees pe
            JOIN projects p ON p.id = pe.project_id
            WHERE pe.working_number = $1
            ORDER BY p.id
            "#,
        )
        .bind(working_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a project and return the stored row.
    pub async fn create(&self, project: &NewProject) -> Result<ProjectEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_project");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            INSERT INTO projects (title, description, deadline)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, deadline, created_at
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.deadline)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite a project's title, description and deadline.
    pub async fn update(&self, project: &Project) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_project");
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = $2, description = $3, deadline = $4
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.deadline)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete a project. Its tasks, assignments and notifications cascade.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_project");
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Assign an employee to a project.
    ///
    /// Returns false if the employee was already assigned.
    pub async fn assign_employee(
        &self,
        working_number: i32,
        project_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("assign_employee_to_project");
        let result = sqlx::query(
            r#"
            INSERT INTO project_employees (project_id, working_number)
            VALUES ($1, $2)
            ON CONFLICT (project_id, working_number) DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(working_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Remove an employee from a project.
    pub async fn remove_employee(
        &self,
        working_number: i32,
        project_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_employee_from_project");
        let result = sqlx::query(
            r#"
            DELETE FROM project_employees
            WHERE project_id = $1 AND working_number = $2
            "#,
        )
        .bind(project_id)
        .bind(working_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Assign several employees to a project in one statement.
    ///
    /// Existing assignments and repeated working numbers are skipped. An unknown
    /// working number fails the whole statement, leaving nothing written.
    /// Returns the number of new assignments.
    pub async fn assign_employees(
        &self,
        working_numbers: &[i32],
        project_id: i64,
    ) -> Result<u64, sqlx::Error> {
        if working_numbers.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("assign_employees_to_project");
        let result = sqlx::query(
            r#"
            INSERT INTO project_employees (project_id, working_number)
            SELECT DISTINCT $1::BIGINT, wn FROM UNNEST($2::INT[]) AS t(wn)
            ON CONFLICT (project_id, working_number) DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(working_numbers)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Remove several employees from a project. Returns the number removed.
    pub async fn dismiss_employees(
        &self,
        working_numbers: &[i32],
        project_id: i64,
    ) -> Result<u64, sqlx::Error> {
        if working_numbers.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("dismiss_employees_from_project");
        let result = sqlx::query(
            r#"
            DELETE FROM project_employees
            WHERE project_id = $1 AND working_number = ANY($2)
            "#,
        )
        .bind(project_id)
        .bind(working_numbers)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::{
        Counter, Gauge, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };
    use sqlx::postgres::PgPoolOptions;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Default)]
    struct CountingHistogram(AtomicUsize);

    impl HistogramFn for CountingHistogram {
        fn record(&self, _value: f64) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct CountingRecorder {
        durations: Arc<CountingHistogram>,
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::from_arc(self.durations.clone())
        }
    }

    #[test]
    fn test_failed_write_is_still_timed() {
        let recorder = CountingRecorder::default();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let result = metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let pool = PgPoolOptions::new()
                    .acquire_timeout(Duration::from_millis(500))
                    .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
                    .unwrap();
                ProjectRepository::new(pool).delete_by_id(1).await
            })
        });

        assert!(result.is_err());
        assert_eq!(recorder.durations.0.load(Ordering::SeqCst), 1);
    }
}

//! Employee repository for database operations.
//!
//! Covers employee rows, stored credentials and the manager/worker pairing.

use domain::models::{Employee, NewEmployee};
use sqlx::PgPool;

use crate::entities::{EmployeeEntity, EmployeeRoleDb};
use crate::metrics::QueryTimer;

/// Repository for employee-related database operations.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List every employee, ordered by working number.
    pub async fn find_all(&self) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_employees");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT working_number, first_name, last_name, email, role, created_at
            FROM employees
            ORDER BY working_number
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List employees holding the given role.
    pub async fn find_by_role(
        &self,
        role: EmployeeRoleDb,
    ) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_employees_by_role");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT working_number, first_name, last_name, email, role, created_at
            FROM employees
            WHERE role = $1
            ORDER BY working_number
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an employee by working number.
    pub async fn find_by_working_number(
        &self,
        working_number: i32,
    ) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_employee_by_working_number");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT working_number, first_name, last_name, email, role, created_at
            FROM employees
            WHERE working_number = $1
            "#,
        )
        .bind(working_number)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert an employee. The working number comes from the sequence.
    pub async fn create(
        &self,
        employee: &NewEmployee,
        password_hash: Option<&str>,
    ) -> Result<EmployeeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_employee");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            INSERT INTO employees (first_name, last_name, email, role, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING working_number, first_name, last_name, email, role, created_at
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(EmployeeRoleDb::from(employee.role))
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite an employee's name, email and role.
    ///
    /// Returns the number of rows updated (0 if the working number is unknown).
    pub async fn update(&self, employee: &Employee) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_employee");
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = $2, last_name = $3, email = $4, role = $5
            WHERE working_number = $1
            "#,
        )
        .bind(employee.working_number)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(EmployeeRoleDb::from(employee.role))
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete an employee. Pairings, assignments and notifications cascade.
    pub async fn delete_by_working_number(&self, working_number: i32) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_employee");
        let result = sqlx::query("DELETE FROM employees WHERE working_number = $1")
            .bind(working_number)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Replace the stored password hash.
    pub async fn set_password_hash(
        &self,
        working_number: i32,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("set_employee_password_hash");
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET password_hash = $2
            WHERE working_number = $1
            "#,
        )
        .bind(working_number)
        .bind(password_hash)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Fetch the stored password hash.
    ///
    /// `None` covers both an unknown employee and one without credentials.
    pub async fn find_password_hash(
        &self,
        working_number: i32,
    ) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("find_employee_password_hash");
        let result = sqlx::query_scalar::<_, Option<String>>(
            "SELECT password_hash FROM employees WHERE working_number = $1",
        )
        .bind(working_number)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(Option::flatten)
    }

    /// Pair a worker with a manager.
    ///
    /// Returns false if the pairing already existed.
    pub async fn assign_worker_to_manager(
        &self,
        manager_number: i32,
        worker_number: i32,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("assign_worker_to_manager");
        let result = sqlx::query(
            r#"
            INSERT INTO manager_workers (manager_number, worker_number)
            VALUES ($1, $2)
            ON CONFLICT (manager_number, worker_number) DO NOTHING
            "#,
        )
        .bind(manager_number)
        .bind(worker_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Remove a manager/worker pairing.
    pub async fn remove_worker_from_manager(
        &self,
        manager_number: i32,
        worker_number: i32,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_worker_from_manager");
        let result = sqlx::query(
            r#"
            DELETE FROM manager_workers
            WHERE manager_number = $1 AND worker_number = $2
            "#,
        )
        .bind(manager_number)
        .bind(worker_number)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// List the workers paired with a manager.
    pub async fn find_workers_of_manager(
        &self,
        manager_number: i32,
    ) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_workers_of_manager");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT e.working_number, e.first_name, e.last_name, e.email, e.role, e.created_at
            FROM manager_workers mw
            JOIN employees e ON e.working_number = mw.worker_number
            WHERE mw.manager_number = $1
            ORDER BY e.working_number
            "#,
        )
        .bind(manager_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the managers a worker is paired with.
    pub async fn find_managers_of_worker(
        &self,
        worker_number: i32,
    ) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_managers_of_worker");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT e.working_number, e.first_name, e.last_name, e.email, e.role, e.created_at
            FROM manager_workers mw
            JOIN employees e ON e.working_number = mw.manager_number
            WHERE mw.worker_number = $1
            ORDER BY e.working_number
            "#,
        )
        .bind(worker_number)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List employees assigned to a task.
    pub async fn find_by_task(&self, task_id: i64) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_employees_of_task");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT e.working_number, e.first_name, e.last_name, e.email, e.role, e.created_at
            FROM task_employees te
            JOIN employees e ON e.working_number = te.working_number
            WHERE te.task_id = $1
            ORDER BY e.working_number
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List employees assigned to a project.
    pub async fn find_by_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_employees_of_project");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT e.working_number, e.first_name, e.last_name, e.email, e.role, e.created_at
            FROM project_employees pe
            JOIN employees e ON e.working_number = pe.working_number
            WHERE pe.project_id = $1
            ORDER BY e.working_number
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}


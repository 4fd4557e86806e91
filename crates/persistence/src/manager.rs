//! Schema maintenance: migrations, wiping, sequence resets and demo data.
//!
//! Meant for test and demo databases. Nothing here asks for confirmation.

use shared::password::hash_password;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::DatabaseResult;

/// Password given to every seeded employee.
pub const DUMMY_PASSWORD: &str = "password";

/// Every table, children before parents, so deleting in this order never
/// trips a foreign key.
pub const TABLES_CHILD_FIRST: [&str; 11] = [
    "assigned_to_project_notifications",
    "assigned_to_task_notifications",
    "forgotten_password_notifications",
    "task_tags",
    "task_employees",
    "project_employees",
    "manager_workers",
    "tasks",
    "tags",
    "projects",
    "employees",
];

/// Tables backed by a serial sequence, with the column it feeds.
const SERIAL_COLUMNS: [(&str, &str); 7] = [
    ("employees", "working_number"),
    ("projects", "id"),
    ("tasks", "id"),
    ("tags", "id"),
    ("forgotten_password_notifications", "id"),
    ("assigned_to_task_notifications", "id"),
    ("assigned_to_project_notifications", "id"),
];

const DUMMY_EMPLOYEES: [(&str, &str, &str); 7] = [
    ("Eva", "Horak", "main_manager"),
    ("Tomas", "Svoboda", "project_manager"),
    ("Lena", "Fischer", "project_manager"),
    ("Marek", "Novak", "worker"),
    ("Ines", "Costa", "worker"),
    ("Omar", "Haddad", "worker"),
    ("Sofia", "Lind", "worker"),
];

const DUMMY_PROJECTS: [(&str, &str, &str); 2] = [
    ("Customer portal", "Self-service portal for customer accounts", "2026-12-15"),
    ("Warehouse migration", "Move inventory tracking to the new platform", "2027-03-01"),
];

// (project index, title, status, estimated hours)
const DUMMY_TASKS: [(usize, &str, &str, i32); 5] = [
    (0, "Design login page", "In progress", 8),
    (0, "Implement password reset", "To do", 5),
    (0, "Write API documentation", "Done", 3),
    (1, "Export inventory data", "To do", 13),
    (1, "Set up staging database", "In progress", 6),
];

const DUMMY_TAGS: [&str; 4] = ["frontend", "backend", "documentation", "urgent"];

// Indices into DUMMY_EMPLOYEES / DUMMY_PROJECTS / DUMMY_TASKS / DUMMY_TAGS.
const DUMMY_MANAGER_WORKERS: [(usize, usize); 6] = [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)];
const DUMMY_PROJECT_EMPLOYEES: [(usize, usize); 6] = [(0, 1), (0, 3), (0, 4), (1, 2), (1, 5), (1, 6)];
const DUMMY_TASK_EMPLOYEES: [(usize, usize); 7] =
    [(0, 3), (1, 3), (1, 4), (2, 4), (3, 5), (4, 5), (4, 6)];
const DUMMY_TASK_TAGS: [(usize, usize); 7] = [(0, 0), (1, 1), (1, 3), (2, 2), (3, 1), (4, 1), (4, 3)];

/// Row counts written by [`DatabaseManager::add_dummy_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub employees: usize,
    pub projects: usize,
    pub tasks: usize,
    pub tags: usize,
    pub associations: usize,
    pub notifications: usize,
}

/// Administrative operations on the Taskboard schema.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded SQL migrations to the configured schema.
    pub async fn migrate(&self) -> DatabaseResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("src/migrations").run(&self.pool).await?;
        info!("Migrations completed");
        Ok(())
    }

    /// Delete every row from every table in one transaction.
    pub async fn clear_all_tables(&self) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;
        for table in TABLES_CHILD_FIRST {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        warn!("All tables cleared");
        Ok(())
    }

    /// Restart every serial sequence. On an empty table the next value is 1;
    /// otherwise it continues just past the largest stored value.
    pub async fn reset_sequences(&self) -> DatabaseResult<()> {
        for (table, column) in SERIAL_COLUMNS {
            sqlx::query(&format!(
                "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), \
                 COALESCE((SELECT MAX({column}) FROM {table}), 0) + 1, false)"
            ))
            .execute(&self.pool)
            .await?;
        }
        info!("Sequences reset");
        Ok(())
    }

    /// Insert the fixed demo dataset in one transaction.
    ///
    /// Every seeded employee can log in with [`DUMMY_PASSWORD`].
    pub async fn add_dummy_data(&self) -> DatabaseResult<SeedSummary> {
        // Hashing stays outside the transaction.
        let hashes = DUMMY_EMPLOYEES
            .iter()
            .map(|_| hash_password(DUMMY_PASSWORD))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool.begin().await?;
        let mut summary = SeedSummary::default();

        let mut employees = Vec::with_capacity(DUMMY_EMPLOYEES.len());
        for ((first_name, last_name, role), hash) in DUMMY_EMPLOYEES.iter().zip(&hashes) {
            let email = format!(
                "{}.{}@taskboard.example",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            );
            let working_number: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO employees (first_name, last_name, email, role, password_hash)
                VALUES ($1, $2, $3, $4::employee_role, $5)
                RETURNING working_number
                "#,
            )
            .bind(*first_name)
            .bind(*last_name)
            .bind(&email)
            .bind(*role)
            .bind(hash)
            .fetch_one(&mut *tx)
            .await?;
            employees.push(working_number);
        }
        summary.employees = employees.len();

        let mut projects = Vec::with_capacity(DUMMY_PROJECTS.len());
        for (title, description, deadline) in DUMMY_PROJECTS {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO projects (title, description, deadline)
                VALUES ($1, $2, $3::DATE)
                RETURNING id
                "#,
            )
            .bind(title)
            .bind(description)
            .bind(deadline)
            .fetch_one(&mut *tx)
            .await?;
            projects.push(id);
        }
        summary.projects = projects.len();

        let mut tasks = Vec::with_capacity(DUMMY_TASKS.len());
        for (project, title, status, hours) in DUMMY_TASKS {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO tasks (project_id, title, status, estimated_hours)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(projects[project])
            .bind(title)
            .bind(status)
            .bind(hours)
            .fetch_one(&mut *tx)
            .await?;
            tasks.push(id);
        }
        summary.tasks = tasks.len();

        let mut tags = Vec::with_capacity(DUMMY_TAGS.len());
        for name in DUMMY_TAGS {
            let id: i64 = sqlx::query_scalar("INSERT INTO tags (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
            tags.push(id);
        }
        summary.tags = tags.len();

        for (manager, worker) in DUMMY_MANAGER_WORKERS {
            sqlx::query("INSERT INTO manager_workers (manager_number, worker_number) VALUES ($1, $2)")
                .bind(employees[manager])
                .bind(employees[worker])
                .execute(&mut *tx)
                .await?;
        }
        for (project, employee) in DUMMY_PROJECT_EMPLOYEES {
            sqlx::query("INSERT INTO project_employees (project_id, working_number) VALUES ($1, $2)")
                .bind(projects[project])
                .bind(employees[employee])
                .execute(&mut *tx)
                .await?;
        }
        for (task, employee) in DUMMY_TASK_EMPLOYEES {
            sqlx::query("INSERT INTO task_employees (task_id, working_number) VALUES ($1, $2)")
                .bind(tasks[task])
                .bind(employees[employee])
                .execute(&mut *tx)
                .await?;
        }
        for (task, tag) in DUMMY_TASK_TAGS {
            sqlx::query("INSERT INTO task_tags (task_id, tag_id) VALUES ($1, $2)")
                .bind(tasks[task])
                .bind(tags[tag])
                .execute(&mut *tx)
                .await?;
        }
        summary.associations = DUMMY_MANAGER_WORKERS.len()
            + DUMMY_PROJECT_EMPLOYEES.len()
            + DUMMY_TASK_EMPLOYEES.len()
            + DUMMY_TASK_TAGS.len();

        sqlx::query("INSERT INTO forgotten_password_notifications (working_number) VALUES ($1)")
            .bind(employees[6])
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO assigned_to_task_notifications (working_number, task_id) VALUES ($1, $2)",
        )
        .bind(employees[3])
        .bind(tasks[0])
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "INSERT INTO assigned_to_project_notifications (working_number, project_id) VALUES ($1, $2)",
        )
        .bind(employees[5])
        .bind(projects[1])
        .execute(&mut *tx)
        .await?;
        summary.notifications = 3;

        tx.commit().await?;
        info!(?summary, "Dummy data inserted");
        Ok(summary)
    }

    /// Wipe the schema, restart sequences and reseed.
    pub async fn reset(&self) -> DatabaseResult<SeedSummary> {
        self.clear_all_tables().await?;
        self.reset_sequences().await?;
        self.add_dummy_data().await
    }

    /// Row count of every table, in [`TABLES_CHILD_FIRST`] order.
    pub async fn table_counts(&self) -> DatabaseResult<Vec<(&'static str, i64)>> {
        let mut counts = Vec::with_capacity(TABLES_CHILD_FIRST.len());
        for table in TABLES_CHILD_FIRST {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&self.pool)
                .await?;
            counts.push((table, count));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_listed_once() {
        let unique: HashSet<_> = TABLES_CHILD_FIRST.iter().collect();
        assert_eq!(unique.len(), TABLES_CHILD_FIRST.len());
    }

    #[test]
    fn test_children_cleared_before_parents() {
        let position = |name: &str| {
            TABLES_CHILD_FIRST
                .iter()
                .position(|t| *t == name)
                .unwrap()
        };
        assert!(position("task_tags") < position("tasks"));
        assert!(position("task_tags") < position("tags"));
        assert!(position("tasks") < position("projects"));
        assert!(position("project_employees") < position("employees"));
        assert!(position("assigned_to_task_notifications") < position("tasks"));
        assert_eq!(position("employees"), TABLES_CHILD_FIRST.len() - 1);
    }

    #[test]
    fn test_serial_tables_are_cleared_tables() {
        for (table, _) in SERIAL_COLUMNS {
            assert!(TABLES_CHILD_FIRST.contains(&table));
        }
    }

    #[test]
    fn test_dummy_indices_in_range() {
        for (manager, worker) in DUMMY_MANAGER_WORKERS {
            assert!(manager < DUMMY_EMPLOYEES.len() && worker < DUMMY_EMPLOYEES.len());
            assert_ne!(DUMMY_EMPLOYEES[worker].2, "main_manager");
        }
        for (project, employee) in DUMMY_PROJECT_EMPLOYEES {
            assert!(project < DUMMY_PROJECTS.len() && employee < DUMMY_EMPLOYEES.len());
        }
        for (task, employee) in DUMMY_TASK_EMPLOYEES {
            assert!(task < DUMMY_TASKS.len() && employee < DUMMY_EMPLOYEES.len());
        }
        for (task, tag) in DUMMY_TASK_TAGS {
            assert!(task < DUMMY_TASKS.len() && tag < DUMMY_TAGS.len());
        }
        for (project, ..) in DUMMY_TASKS {
            assert!(project < DUMMY_PROJECTS.len());
        }
    }

    #[test]
    fn test_dummy_roles_parse() {
        for (_, _, role) in DUMMY_EMPLOYEES {
            assert!(role.parse::<domain::models::EmployeeRole>().is_ok());
        }
    }
}

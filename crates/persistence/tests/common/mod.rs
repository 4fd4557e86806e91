//! Common test utilities for integration tests.
//!
//! Every test gets its own freshly migrated schema inside the database named
//! by `TEST_DATABASE_URL`, so tests can run in parallel. Without that variable
//! the tests return early.

#![allow(dead_code)]

use domain::models::{EmployeeRole, NewEmployee, NewProject, NewTask};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::db::DatabaseConfig;
use persistence::Database;
use uuid::Uuid;

/// Password given to every employee created through these helpers.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub struct TestDb {
    pub db: Database,
    schema: String,
}

impl TestDb {
    /// Drop the test schema and close the pool.
    pub async fn teardown(self) {
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(self.db.pool())
            .await
            .expect("Failed to drop test schema");
        self.db.disconnect().await;
    }
}

/// Connect to a fresh, migrated schema, or `None` when no test database is
/// configured.
pub async fn setup() -> Option<TestDb> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return None;
    };

    let schema = format!("test_{}", Uuid::new_v4().simple());
    let config = DatabaseConfig::new(url).with_schema(schema.clone());
    let db = Database::connect(&config)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    Some(TestDb { db, schema })
}

pub fn fake_employee(role: EmployeeRole) -> NewEmployee {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    NewEmployee::new(first_name, last_name, role)
}

pub async fn create_employee(db: &Database, role: EmployeeRole) -> i32 {
    db.save_employee(&fake_employee(role), TEST_PASSWORD)
        .await
        .expect("Failed to create employee")
}

pub async fn create_project(db: &Database, title: &str) -> i64 {
    db.save_project(&NewProject::new(title))
        .await
        .expect("Failed to create project")
}

pub async fn create_task(db: &Database, project_id: i64, title: &str) -> i64 {
    db.save_task(&NewTask::new(project_id, title))
        .await
        .expect("Failed to create task")
}

//! The `Database` facade: one entry point for every Taskboard use case.
//!
//! Each method forwards to a single repository and turns entity rows into
//! domain models. Nothing here is cached; every call is a round trip.

use domain::models::{
    AssignedToProjectNotification, AssignedToTaskNotification, Employee, EmployeeRole,
    ForgottenPasswordNotification, NewEmployee, NewProject, NewTag, NewTask, Project, Tag, Task,
    UserProfile,
};
use shared::password::{hash_password, verify_password};
use sqlx::PgPool;
use tracing::{debug, info};
use validator::{Validate, ValidationErrors};

use crate::db::{create_pool, DatabaseConfig};
use crate::entities::EmployeeRoleDb;
use crate::error::DatabaseResult;
use crate::manager::{DatabaseManager, SeedSummary};
use crate::metrics::record_pool_metrics;
use crate::repositories::{
    EmployeeRepository, NotificationRepository, ProjectRepository, TagRepository, TaskRepository,
};

fn into_models<E, M: From<E>>(rows: Vec<E>) -> Vec<M> {
    rows.into_iter().map(M::from).collect()
}

fn check_status(status: &str) -> DatabaseResult<()> {
    shared::validation::validate_task_status(status).map_err(|err| {
        let mut errors = ValidationErrors::new();
        errors.add("status", err);
        errors
    })?;
    Ok(())
}

/// Facade over the per-entity repositories and the schema manager.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    employees: EmployeeRepository,
    projects: ProjectRepository,
    tasks: TaskRepository,
    tags: TagRepository,
    notifications: NotificationRepository,
    manager: DatabaseManager,
}

impl Database {
    /// Open a pool for the configured URL and schema.
    ///
    /// Fails if the configuration is invalid or the server cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let pool = create_pool(config).await?;
        info!(schema = %config.schema, "Database connection established");
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            employees: EmployeeRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            tags: TagRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            manager: DatabaseManager::new(pool.clone()),
            pool,
        }
    }

    /// Close every pooled connection.
    pub async fn disconnect(self) {
        record_pool_metrics(&self.pool);
        self.pool.close().await;
        info!("Database connection closed");
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn manager(&self) -> &DatabaseManager {
        &self.manager
    }

    // Employees

    pub async fn get_all_employees(&self) -> DatabaseResult<Vec<Employee>> {
        Ok(into_models(self.employees.find_all().await?))
    }

    pub async fn get_all_project_managers(&self) -> DatabaseResult<Vec<Employee>> {
        let rows = self
            .employees
            .find_by_role(EmployeeRoleDb::from(EmployeeRole::ProjectManager))
            .await?;
        Ok(into_models(rows))
    }

    pub async fn get_all_workers(&self) -> DatabaseResult<Vec<Employee>> {
        let rows = self
            .employees
            .find_by_role(EmployeeRoleDb::from(EmployeeRole::Worker))
            .await?;
        Ok(into_models(rows))
    }

    pub async fn get_employee_by_working_number(
        &self,
        working_number: i32,
    ) -> DatabaseResult<Option<Employee>> {
        let row = self.employees.find_by_working_number(working_number).await?;
        Ok(row.map(Employee::from))
    }

    /// Store a new employee with a login password. Returns the working number.
    pub async fn save_employee(
        &self,
        employee: &NewEmployee,
        password: &str,
    ) -> DatabaseResult<i32> {
        employee.validate()?;
        let password_hash = hash_password(password)?;
        let row = self.employees.create(employee, Some(&password_hash)).await?;
        info!(working_number = row.working_number, role = ?row.role, "Employee created");
        Ok(row.working_number)
    }

    /// Returns false if no employee has this working number.
    pub async fn update_employee(&self, employee: &Employee) -> DatabaseResult<bool> {
        employee.validate()?;
        Ok(self.employees.update(employee).await? > 0)
    }

    pub async fn delete_employee_by_working_number(
        &self,
        working_number: i32,
    ) -> DatabaseResult<bool> {
        let deleted = self.employees.delete_by_working_number(working_number).await? > 0;
        if deleted {
            info!(working_number, "Employee deleted");
        }
        Ok(deleted)
    }

    /// Set the credentials of an existing employee.
    ///
    /// Returns false if no employee has the profile's working number.
    pub async fn add_user_profile(&self, profile: &UserProfile) -> DatabaseResult<bool> {
        let password_hash = hash_password(&profile.password)?;
        let updated = self
            .employees
            .set_password_hash(profile.working_number, &password_hash)
            .await?;
        Ok(updated > 0)
    }

    /// Replace an employee's password. The old one stops working immediately.
    pub async fn change_password(
        &self,
        employee: &Employee,
        new_password: &str,
    ) -> DatabaseResult<bool> {
        let password_hash = hash_password(new_password)?;
        let updated = self
            .employees
            .set_password_hash(employee.working_number, &password_hash)
            .await?;
        if updated > 0 {
            info!(working_number = employee.working_number, "Password changed");
        }
        Ok(updated > 0)
    }

    /// Check credentials and return the matching employee.
    ///
    /// `None` for an unknown working number, an employee without credentials,
    /// or a wrong password.
    pub async fn login(&self, profile: &UserProfile) -> DatabaseResult<Option<Employee>> {
        let Some(stored_hash) = self
            .employees
            .find_password_hash(profile.working_number)
            .await?
        else {
            debug!(working_number = profile.working_number, "Login rejected: no credentials");
            return Ok(None);
        };

        if !verify_password(&profile.password, &stored_hash)? {
            debug!(working_number = profile.working_number, "Login rejected: wrong password");
            return Ok(None);
        }

        debug!(working_number = profile.working_number, "Login accepted");
        self.get_employee_by_working_number(profile.working_number)
            .await
    }

    /// Returns false if the pair already existed.
    pub async fn assign_worker_to_manager(
        &self,
        manager_number: i32,
        worker_number: i32,
    ) -> DatabaseResult<bool> {
        Ok(self
            .employees
            .assign_worker_to_manager(manager_number, worker_number)
            .await?)
    }

    pub async fn remove_worker_from_manager(
        &self,
        manager_number: i32,
        worker_number: i32,
    ) -> DatabaseResult<bool> {
        let removed = self
            .employees
            .remove_worker_from_manager(manager_number, worker_number)
            .await?;
        Ok(removed > 0)
    }

    pub async fn get_employees_assigned_to_manager(
        &self,
        manager_number: i32,
    ) -> DatabaseResult<Vec<Employee>> {
        Ok(into_models(
            self.employees.find_workers_of_manager(manager_number).await?,
        ))
    }

    pub async fn get_all_workers_managers_by_worker_working_number(
        &self,
        worker_number: i32,
    ) -> DatabaseResult<Vec<Employee>> {
        Ok(into_models(
            self.employees.find_managers_of_worker(worker_number).await?,
        ))
    }

    pub async fn get_employees_of_task(&self, task_id: i64) -> DatabaseResult<Vec<Employee>> {
        Ok(into_models(self.employees.find_by_task(task_id).await?))
    }

    pub async fn get_all_employees_assigned_to_project(
        &self,
        project_id: i64,
    ) -> DatabaseResult<Vec<Employee>> {
        Ok(into_models(self.employees.find_by_project(project_id).await?))
    }

    // Projects

    pub async fn get_all_projects(&self) -> DatabaseResult<Vec<Project>> {
        Ok(into_models(self.projects.find_all().await?))
    }

    pub async fn get_project_by_id(&self, id: i64) -> DatabaseResult<Option<Project>> {
        Ok(self.projects.find_by_id(id).await?.map(Project::from))
    }

    /// Returns the new project's ID.
    pub async fn save_project(&self, project: &NewProject) -> DatabaseResult<i64> {
        project.validate()?;
        let row = self.projects.create(project).await?;
        info!(project_id = row.id, "Project created");
        Ok(row.id)
    }

    pub async fn update_project(&self, project: &Project) -> DatabaseResult<bool> {
        project.validate()?;
        Ok(self.projects.update(project).await? > 0)
    }

    /// Delete a project together with its tasks.
    pub async fn delete_project_by_id(&self, id: i64) -> DatabaseResult<bool> {
        let deleted = self.projects.delete_by_id(id).await? > 0;
        if deleted {
            info!(project_id = id, "Project deleted");
        }
        Ok(deleted)
    }

    pub async fn get_all_projects_of_employee(
        &self,
        working_number: i32,
    ) -> DatabaseResult<Vec<Project>> {
        Ok(into_models(self.projects.find_by_employee(working_number).await?))
    }

    pub async fn assign_employee_to_project(
        &self,
        working_number: i32,
        project_id: i64,
    ) -> DatabaseResult<bool> {
        Ok(self
            .projects
            .assign_employee(working_number, project_id)
            .await?)
    }

    pub async fn remove_employee_from_project(
        &self,
        working_number: i32,
        project_id: i64,
    ) -> DatabaseResult<bool> {
        let removed = self
            .projects
            .remove_employee(working_number, project_id)
            .await?;
        Ok(removed > 0)
    }

    /// Returns the number of newly created assignments.
    pub async fn assign_employees_to_project(
        &self,
        working_numbers: &[i32],
        project_id: i64,
    ) -> DatabaseResult<u64> {
        Ok(self
            .projects
            .assign_employees(working_numbers, project_id)
            .await?)
    }

    /// Returns the number of assignments removed.
    pub async fn dismiss_employees_from_project(
        &self,
        working_numbers: &[i32],
        project_id: i64,
    ) -> DatabaseResult<u64> {
        Ok(self
            .projects
            .dismiss_employees(working_numbers, project_id)
            .await?)
    }

    // Tasks

    pub async fn get_all_tasks(&self) -> DatabaseResult<Vec<Task>> {
        Ok(into_models(self.tasks.find_all().await?))
    }

    pub async fn get_task(&self, id: i64) -> DatabaseResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?.map(Task::from))
    }

    pub async fn get_all_tasks_of_project(&self, project_id: i64) -> DatabaseResult<Vec<Task>> {
        Ok(into_models(self.tasks.find_by_project(project_id).await?))
    }

    pub async fn get_all_tasks_by_user_id(&self, working_number: i32) -> DatabaseResult<Vec<Task>> {
        Ok(into_models(self.tasks.find_by_employee(working_number).await?))
    }

    /// Returns the new task's ID.
    pub async fn save_task(&self, task: &NewTask) -> DatabaseResult<i64> {
        task.validate()?;
        let row = self.tasks.create(task).await?;
        info!(task_id = row.id, project_id = row.project_id, "Task created");
        Ok(row.id)
    }

    pub async fn update_task(&self, task: &Task) -> DatabaseResult<bool> {
        task.validate()?;
        Ok(self.tasks.update(task).await? > 0)
    }

    pub async fn delete_task_by_id(&self, id: i64) -> DatabaseResult<bool> {
        Ok(self.tasks.delete_by_id(id).await? > 0)
    }

    /// Returns false only when the task does not exist.
    pub async fn change_task_status(&self, id: i64, status: &str) -> DatabaseResult<bool> {
        check_status(status)?;
        Ok(self.tasks.change_status(id, status).await? > 0)
    }

    pub async fn assign_worker_to_task(
        &self,
        working_number: i32,
        task_id: i64,
    ) -> DatabaseResult<bool> {
        Ok(self.tasks.assign_worker(working_number, task_id).await?)
    }

    pub async fn remove_worker_from_task(
        &self,
        working_number: i32,
        task_id: i64,
    ) -> DatabaseResult<bool> {
        Ok(self.tasks.remove_worker(working_number, task_id).await? > 0)
    }

    pub async fn assign_employees_to_task(
        &self,
        working_numbers: &[i32],
        task_id: i64,
    ) -> DatabaseResult<u64> {
        Ok(self.tasks.assign_workers(working_numbers, task_id).await?)
    }

    pub async fn unassign_employees_from_task(
        &self,
        working_numbers: &[i32],
        task_id: i64,
    ) -> DatabaseResult<u64> {
        Ok(self.tasks.unassign_workers(working_numbers, task_id).await?)
    }

    pub async fn add_tag_to_task(&self, task_id: i64, tag_id: i64) -> DatabaseResult<bool> {
        Ok(self.tasks.add_tag(task_id, tag_id).await?)
    }

    pub async fn remove_tag_from_task(&self, task_id: i64, tag_id: i64) -> DatabaseResult<bool> {
        Ok(self.tasks.remove_tag(task_id, tag_id).await? > 0)
    }

    // Tags

    pub async fn get_all_tags(&self) -> DatabaseResult<Vec<Tag>> {
        Ok(into_models(self.tags.find_all().await?))
    }

    pub async fn get_tag(&self, id: i64) -> DatabaseResult<Option<Tag>> {
        Ok(self.tags.find_by_id(id).await?.map(Tag::from))
    }

    pub async fn get_tags_of_task(&self, task_id: i64) -> DatabaseResult<Vec<Tag>> {
        Ok(into_models(self.tags.find_by_task(task_id).await?))
    }

    pub async fn save_tag(&self, tag: &NewTag) -> DatabaseResult<i64> {
        tag.validate()?;
        Ok(self.tags.create(tag).await?.id)
    }

    pub async fn update_tag(&self, tag: &Tag) -> DatabaseResult<bool> {
        tag.validate()?;
        Ok(self.tags.update(tag).await? > 0)
    }

    pub async fn delete_tag(&self, id: i64) -> DatabaseResult<bool> {
        Ok(self.tags.delete_by_id(id).await? > 0)
    }

    // Notifications

    /// Returns false if no employee has this working number.
    pub async fn add_forget_password_notification(
        &self,
        working_number: i32,
    ) -> DatabaseResult<bool> {
        let created = self
            .notifications
            .create_forgotten_password(working_number)
            .await?;
        if created {
            info!(working_number, "Password reset requested");
        }
        Ok(created)
    }

    /// Every pending password reset request, newest first.
    pub async fn get_forgotten_password_notifications(
        &self,
    ) -> DatabaseResult<Vec<ForgottenPasswordNotification>> {
        Ok(into_models(
            self.notifications.find_all_forgotten_password().await?,
        ))
    }

    pub async fn get_forgotten_password_notifications_of(
        &self,
        working_number: i32,
    ) -> DatabaseResult<Vec<ForgottenPasswordNotification>> {
        Ok(into_models(
            self.notifications
                .find_forgotten_password_by_employee(working_number)
                .await?,
        ))
    }

    /// Returns the notification ID.
    pub async fn add_assigned_to_task_notification(
        &self,
        working_number: i32,
        task_id: i64,
    ) -> DatabaseResult<i64> {
        Ok(self
            .notifications
            .create_assigned_to_task(working_number, task_id)
            .await?)
    }

    pub async fn add_multiple_assigned_to_task_notification(
        &self,
        working_numbers: &[i32],
        task_id: i64,
    ) -> DatabaseResult<u64> {
        Ok(self
            .notifications
            .create_assigned_to_task_many(working_numbers, task_id)
            .await?)
    }

    /// Returns the notification ID.
    pub async fn add_assigned_project_notification(
        &self,
        working_number: i32,
        project_id: i64,
    ) -> DatabaseResult<i64> {
        Ok(self
            .notifications
            .create_assigned_to_project(working_number, project_id)
            .await?)
    }

    pub async fn add_multiple_assigned_to_project_notification(
        &self,
        working_numbers: &[i32],
        project_id: i64,
    ) -> DatabaseResult<u64> {
        Ok(self
            .notifications
            .create_assigned_to_project_many(working_numbers, project_id)
            .await?)
    }

    pub async fn get_assigned_to_task_notifications(
        &self,
        working_number: i32,
    ) -> DatabaseResult<Vec<AssignedToTaskNotification>> {
        Ok(into_models(
            self.notifications
                .find_assigned_to_task_by_employee(working_number)
                .await?,
        ))
    }

    pub async fn get_assigned_to_project_notifications(
        &self,
        working_number: i32,
    ) -> DatabaseResult<Vec<AssignedToProjectNotification>> {
        Ok(into_models(
            self.notifications
                .find_assigned_to_project_by_employee(working_number)
                .await?,
        ))
    }

    // Maintenance

    pub async fn run_migrations(&self) -> DatabaseResult<()> {
        self.manager.migrate().await
    }

    pub async fn add_dummy_data(&self) -> DatabaseResult<SeedSummary> {
        self.manager.add_dummy_data().await
    }

    pub async fn clear_all_tables(&self) -> DatabaseResult<()> {
        self.manager.clear_all_tables().await
    }

    pub async fn reset_sequences(&self) -> DatabaseResult<()> {
        self.manager.reset_sequences().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;

    #[test]
    fn test_check_status_accepts_free_labels() {
        assert!(check_status("To do").is_ok());
        assert!(check_status("Waiting on review").is_ok());
    }

    #[test]
    fn test_check_status_rejects_blank_and_long() {
        assert!(matches!(
            check_status("   "),
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            check_status(&"x".repeat(51)),
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let config = DatabaseConfig::new("postgres://localhost/taskboard").with_schema("1nvalid");
        let result = Database::connect(&config).await;
        assert!(matches!(result, Err(DatabaseError::InvalidConfig(_))));
    }
}

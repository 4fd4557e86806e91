//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::EmployeeRole;
use sqlx::FromRow;

/// Database enum for employee_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "employee_role", rename_all = "snake_case")]
pub enum EmployeeRoleDb {
    MainManager,
    ProjectManager,
    Worker,
}

impl From<EmployeeRoleDb> for EmployeeRole {
    fn from(db_role: EmployeeRoleDb) -> Self {
        match db_role {
            EmployeeRoleDb::MainManager => EmployeeRole::MainManager,
            EmployeeRoleDb::ProjectManager => EmployeeRole::ProjectManager,
            EmployeeRoleDb::Worker => EmployeeRole::Worker,
        }
    }
}

impl From<EmployeeRole> for EmployeeRoleDb {
    fn from(role: EmployeeRole) -> Self {
        match role {
            EmployeeRole::MainManager => EmployeeRoleDb::MainManager,
            EmployeeRole::ProjectManager => EmployeeRoleDb::ProjectManager,
            EmployeeRole::Worker => EmployeeRoleDb::Worker,
        }
    }
}

/// Database row mapping for the employees table, without the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeEntity {
    pub working_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub role: EmployeeRoleDb,
    pub created_at: DateTime<Utc>,
}

impl From<EmployeeEntity> for domain::models::Employee {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            working_number: entity.working_number,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            role: entity.role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::Employee;

    #[test]
    fn test_role_conversion_both_ways() {
        for role in [
            EmployeeRole::MainManager,
            EmployeeRole::ProjectManager,
            EmployeeRole::Worker,
        ] {
            let db: EmployeeRoleDb = role.into();
            assert_eq!(EmployeeRole::from(db), role);
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = EmployeeEntity {
            working_number: 12,
            first_name: "Alex".to_string(),
            last_name: "Bolfa".to_string(),
            email: Some("alex@example.com".to_string()),
            role: EmployeeRoleDb::ProjectManager,
            created_at: Utc::now(),
        };
        let employee: Employee = entity.into();
        assert_eq!(employee.working_number, 12);
        assert_eq!(employee.full_name(), "Alex Bolfa");
        assert_eq!(employee.role, EmployeeRole::ProjectManager);
    }
}

//! Employee domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Role of an employee within the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    MainManager,
    ProjectManager,
    Worker,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::MainManager => "main_manager",
            EmployeeRole::ProjectManager => "project_manager",
            EmployeeRole::Worker => "worker",
        }
    }

    /// Returns true if workers can be paired with this employee.
    pub fn is_manager(&self) -> bool {
        matches!(self, EmployeeRole::MainManager | EmployeeRole::ProjectManager)
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "main_manager" => Ok(EmployeeRole::MainManager),
            "project_manager" => Ok(EmployeeRole::ProjectManager),
            "worker" => Ok(EmployeeRole::Worker),
            _ => Err(format!("Invalid employee role: {}", s)),
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An employee, identified by their working number.
///
/// Credentials are stored alongside the row but never loaded into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub working_number: i32,
    #[validate(
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: EmployeeRole,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for registering a new employee. The working number is assigned by
/// the database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[validate(
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub role: EmployeeRole,
}

impl NewEmployee {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, role: EmployeeRole) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            role,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builds the stored employee once a working number has been assigned.
    pub fn into_employee(self, working_number: i32) -> Employee {
        Employee {
            working_number,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Login credentials: a working number and a clear-text password.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub working_number: i32,
    pub password: String,
}

impl UserProfile {
    pub fn new(working_number: i32, password: impl Into<String>) -> Self {
        Self {
            working_number,
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("working_number", &self.working_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

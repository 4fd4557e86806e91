//! Task domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status given to tasks created without one.
pub const DEFAULT_TASK_STATUS: &str = "To do";

/// A task inside exactly one project.
///
/// `status` is a free-form label ("To do", "In progress", "Done", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "shared::validation::validate_task_status"))]
    pub status: String,
    pub deadline: Option<NaiveDate>,
    #[validate(range(min = 0, max = 10000, message = "Estimate must be between 0 and 10000 hours"))]
    pub estimated_hours: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub project_id: i64,

    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_task_status"))]
    pub status: String,

    pub deadline: Option<NaiveDate>,

    #[validate(range(min = 0, max = 10000, message = "Estimate must be between 0 and 10000 hours"))]
    pub estimated_hours: Option<i32>,
}

impl NewTask {
    pub fn new(project_id: i64, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            status: DEFAULT_TASK_STATUS.to_string(),
            deadline: None,
            estimated_hours: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_estimated_hours(mut self, hours: i32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults_status() {
        let task = NewTask::new(4, "Write migration");
        assert_eq!(task.status, DEFAULT_TASK_STATUS);
        assert_eq!(task.project_id, 4);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_new_task_rejects_blank_status() {
        let task = NewTask::new(4, "Write migration").with_status("  ");
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_new_task_rejects_negative_estimate() {
        let task = NewTask::new(4, "Write migration").with_estimated_hours(-1);
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_stored_task_validation() {
        let mut task = Task {
            id: 1,
            project_id: 1,
            title: "Review".to_string(),
            description: None,
            status: DEFAULT_TASK_STATUS.to_string(),
            deadline: None,
            estimated_hours: Some(3),
            created_at: Utc::now(),
        };
        assert!(task.validate().is_ok());

        task.estimated_hours = Some(10_001);
        assert!(task.validate().is_err());

        task.estimated_hours = None;
        task.title = "   ".to_string();
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_new_task_builder() {
        let task = NewTask::new(1, "Review")
            .with_description("Code review of the login flow")
            .with_status("In progress")
            .with_estimated_hours(3);
        assert_eq!(task.status, "In progress");
        assert_eq!(task.estimated_hours, Some(3));
        assert!(task.validate().is_ok());
    }
}

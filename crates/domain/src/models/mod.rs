//! Domain models for Taskboard.

pub mod employee;
pub mod notification;
pub mod project;
pub mod tag;
pub mod task;

pub use employee::{Employee, EmployeeRole, NewEmployee, UserProfile};
pub use notification::{
    AssignedToProjectNotification, AssignedToTaskNotification, ForgottenPasswordNotification,
};
pub use project::{NewProject, Project};
pub use tag::{NewTag, Tag};
pub use task::{NewTask, Task, DEFAULT_TASK_STATUS};

//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod employee;
pub mod notification;
pub mod project;
pub mod tag;
pub mod task;

pub use employee::{EmployeeEntity, EmployeeRoleDb};
pub use notification::{
    AssignedToProjectNotificationEntity, AssignedToTaskNotificationEntity,
    ForgottenPasswordNotificationEntity,
};
pub use project::ProjectEntity;
pub use tag::TagEntity;
pub use task::TaskEntity;

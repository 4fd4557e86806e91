//! Repository implementations for database operations.
//!
//! One repository per entity group; each owns a clone of the pool.

pub mod employee;
pub mod notification;
pub mod project;
pub mod tag;
pub mod task;

pub use employee::EmployeeRepository;
pub use notification::NotificationRepository;
pub use project::ProjectRepository;
pub use tag::TagRepository;
pub use task::TaskRepository;

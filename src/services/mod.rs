pub mod filters;
pub mod task_controller;

pub use filters::{TaskFilter, TaskStats};
pub use task_controller::{AlwaysConfirm, Confirm, TaskController};

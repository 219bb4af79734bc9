pub mod task;
pub mod user;

pub use task::{NewTaskRequest, Task, UpdateTaskRequest};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, User};

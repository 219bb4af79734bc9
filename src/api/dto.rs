use serde::Deserialize;

use crate::models::{Task, User};

/// Body shared by most endpoints: `{message}` on success, `{error}` on failure.
/// Token-guarded endpoints may also answer with `{msg}` when the credential is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl StatusReply {
    pub fn failure(&self) -> Option<&str> {
        self.error.as_deref().or(self.msg.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskListReply {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedReply {
    #[serde(default)]
    pub task_id: Option<i64>,
}

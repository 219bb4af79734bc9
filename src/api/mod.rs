pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, NewTaskRequest, RegisterRequest, Task, UpdateTaskRequest};

/// Remote task API. Everything except `register` and `login` needs a bearer token.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Returns the server's confirmation message.
    async fn register(&self, req: &RegisterRequest) -> Result<String, AppError>;
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AppError>;
    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>, AppError>;
    /// Returns the id assigned by the server, when it reports one.
    async fn create_task(&self, token: &str, req: &NewTaskRequest) -> Result<Option<i64>, AppError>;
    async fn update_task(&self, token: &str, id: i64, req: &UpdateTaskRequest) -> Result<(), AppError>;
    async fn delete_task(&self, token: &str, id: i64) -> Result<(), AppError>;
}

pub struct TaskHttpClient {
    client: Client,
    base_url: String,
}

impl TaskHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the body of a 2xx response.
    /// Anything else becomes `AppError::Api` carrying the server's own error text if it sent one.
    async fn send(&self, request: RequestBuilder) -> Result<String, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = failure_message(status, &body);
            warn!("task API error {}: {}", status, message);
            return Err(AppError::Api(message));
        }

        Ok(body)
    }
}

fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<dto::StatusReply>(body)
        .ok()
        .and_then(|reply| reply.failure().map(str::to_string))
        .unwrap_or_else(|| format!("Server returned {}", status))
}

#[async_trait]
impl TaskApi for TaskHttpClient {
    async fn register(&self, req: &RegisterRequest) -> Result<String, AppError> {
        let url = self.url("/auth/register");
        debug!("POST {}", url);

        let response = self.client.post(&url).json(req).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let reply: dto::StatusReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(AppError::Api(format!("Server returned {}", status)));
            }
            Err(e) => return Err(AppError::Decode(e)),
        };

        if let Some(error) = reply.failure() {
            return Err(AppError::Api(error.to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Api(format!("Server returned {}", status)));
        }

        Ok(reply.message.unwrap_or_else(|| "Registered".to_string()))
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        let url = self.url("/auth/login");
        debug!("POST {}", url);

        // Failed logins answer with a JSON `{error}` body and a 4xx status; read the body either way.
        let response = self.client.post(&url).json(req).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let reply: dto::LoginReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(AppError::Api(format!("Server returned {}", status)));
            }
            Err(e) => return Err(AppError::Decode(e)),
        };

        match reply.token {
            Some(token) if !token.is_empty() => Ok(LoginResponse {
                token,
                user: reply.user,
            }),
            _ => Err(AppError::Api(
                reply.error.unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>, AppError> {
        let url = self.url("/tasks/list");
        debug!("GET {}", url);

        let body = self.send(self.client.get(&url).bearer_auth(token)).await?;
        let reply: dto::TaskListReply = serde_json::from_str(&body)?;
        Ok(reply.tasks)
    }

    async fn create_task(&self, token: &str, req: &NewTaskRequest) -> Result<Option<i64>, AppError> {
        let url = self.url("/tasks/create");
        debug!("POST {}", url);

        let body = self
            .send(self.client.post(&url).bearer_auth(token).json(req))
            .await?;
        let task_id = serde_json::from_str::<dto::CreatedReply>(&body)
            .ok()
            .and_then(|reply| reply.task_id);
        Ok(task_id)
    }

    async fn update_task(&self, token: &str, id: i64, req: &UpdateTaskRequest) -> Result<(), AppError> {
        let url = self.url(&format!("/tasks/update/{}", id));
        debug!("PUT {}", url);

        self.send(self.client.put(&url).bearer_auth(token).json(req))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, token: &str, id: i64) -> Result<(), AppError> {
        let url = self.url(&format!("/tasks/delete/{}", id));
        debug!("DELETE {}", url);

        self.send(self.client.delete(&url).bearer_auth(token)).await?;
        Ok(())
    }
}

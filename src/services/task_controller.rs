use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tracing::{info, warn};

use crate::api::TaskApi;
use crate::error::AppError;
use crate::models::{LoginRequest, NewTaskRequest, RegisterRequest, Task, UpdateTaskRequest};
use crate::notify::{Notifier, Severity};
use crate::render::{Listing, Screen};
use crate::services::filters::{self, TaskFilter, TaskStats};
use crate::state::{EditForm, EditModal, GUEST_NAME, Session, View};

/// Interactive yes/no prompt used before destructive actions.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Owns the session and the task cache and keeps the rendered list in step with the server.
///
/// Every mutation is followed by a full `reload()`; nothing is applied to the cache locally.
/// Each failure is pushed to the notifier before the error is returned, so callers may drop it.
pub struct TaskController {
    api: Arc<dyn TaskApi>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    session: Option<Session>,
    tasks: Vec<Task>,
    stats: TaskStats,
    listing: Listing,
    view: View,
    edit: Option<EditModal>,
}

impl TaskController {
    pub fn new(api: Arc<dyn TaskApi>, notifier: Arc<dyn Notifier>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            notifier,
            confirm,
            session: None,
            tasks: Vec::new(),
            stats: TaskStats::default(),
            listing: Listing::cleared(),
            view: View::Login,
            edit: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user_name(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.display_name.as_str())
            .unwrap_or(GUEST_NAME)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Statistics as of the last successful reload.
    pub fn stats(&self) -> TaskStats {
        self.stats
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn edit_modal(&self) -> Option<&EditModal> {
        self.edit.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditForm> {
        self.edit.as_mut().map(|modal| &mut modal.form)
    }

    pub fn screen(&self) -> Screen<'_> {
        Screen {
            view: self.view,
            user_name: self.user_name(),
            stats: self.stats,
            listing: &self.listing,
            edit: self.edit.as_ref(),
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    fn fail(&self, err: AppError) -> AppError {
        self.notify(&err.user_message(), Severity::Error);
        err
    }

    fn token(&self) -> Result<String, AppError> {
        match &self.session {
            Some(session) => Ok(session.token.clone()),
            None => Err(self.fail(AppError::Unauthenticated)),
        }
    }

    // ---- navigation ----

    pub fn show_login(&mut self) {
        self.edit = None;
        self.view = View::Login;
    }

    pub fn show_register(&mut self) {
        self.edit = None;
        self.view = View::Register;
    }

    pub async fn show_tasks(&mut self) -> Result<(), AppError> {
        self.token()?;
        self.edit = None;
        self.view = View::Tasks;
        self.reload().await
    }

    // ---- session ----

    pub async fn register(&mut self, name: &str, email: &str, phone: &str, password: &str) -> Result<(), AppError> {
        let (name, email, phone, password) = (name.trim(), email.trim(), phone.trim(), password.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(self.fail(AppError::Validation(
                "Name, email, password are required".to_string(),
            )));
        }

        let req = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
        };

        match self.api.register(&req).await {
            Ok(message) => {
                info!("registered {}", req.email);
                self.notify(&message, Severity::Success);
                Ok(())
            }
            Err(e) => {
                warn!("registration failed: {}", e);
                Err(self.fail(e))
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        let (email, password) = (email.trim(), password.trim());
        if email.is_empty() || password.is_empty() {
            return Err(self.fail(AppError::Validation("Enter email & password".to_string())));
        }

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.login(&req).await {
            Ok(response) => response,
            Err(e) => {
                warn!("login failed: {}", e);
                return Err(self.fail(e));
            }
        };

        let user_name = response.user.as_ref().and_then(|u| u.name.as_deref());
        let session = Session::new(response.token, user_name, email);
        info!("logged in as {}", session.display_name);
        self.session = Some(session);

        self.notify("Logged in successfully!", Severity::Success);
        self.show_tasks().await
    }

    /// Local only; the server keeps no session to end.
    pub fn logout(&mut self) {
        self.session = None;
        self.tasks.clear();
        self.stats = TaskStats::default();
        self.listing = Listing::cleared();
        self.edit = None;
        self.view = View::Login;
        info!("logged out");
        self.notify("Logged out", Severity::Info);
    }

    // ---- cache ----

    /// Replaces the cache with the server's list and re-renders everything.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        let token = self.token()?;

        match self.api.list_tasks(&token).await {
            Ok(tasks) => {
                self.stats = TaskStats::compute(&tasks, Local::now());
                self.listing = Listing::for_cache(&tasks);
                self.tasks = tasks;
                info!("loaded {} tasks", self.tasks.len());
                Ok(())
            }
            Err(e) => {
                warn!("failed to load tasks: {}", e);
                Err(self.fail(e))
            }
        }
    }

    async fn finish_mutation(&mut self, result: Result<(), AppError>, success: &str) -> Result<(), AppError> {
        let outcome = match result {
            Ok(()) => {
                self.notify(success, Severity::Success);
                Ok(())
            }
            Err(e) => {
                warn!("task request failed: {}", e);
                Err(self.fail(e))
            }
        };
        let reloaded = self.reload().await;
        outcome.and(reloaded)
    }

    pub async fn create(&mut self, title: &str, description: &str, due: &str, reminder: &str) -> Result<(), AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(self.fail(AppError::Validation("Task title required!".to_string())));
        }
        let token = self.token()?;

        let req = NewTaskRequest {
            title: title.to_string(),
            description: description.trim().to_string(),
            due_datetime: due.to_string(),
            reminder_datetime: reminder.to_string(),
        };

        let result = self.api.create_task(&token, &req).await.map(|task_id| {
            info!("created task {:?}", task_id);
        });
        self.finish_mutation(result, "Task created successfully!").await
    }

    pub async fn update(&mut self, id: i64, req: UpdateTaskRequest) -> Result<(), AppError> {
        self.send_update(id, req, "Task updated!").await
    }

    pub async fn toggle_status(&mut self, id: i64, is_completed: bool) -> Result<(), AppError> {
        let success = if is_completed {
            "Task marked complete!"
        } else {
            "Task marked pending"
        };
        self.send_update(id, UpdateTaskRequest::completion(is_completed), success)
            .await
    }

    async fn send_update(&mut self, id: i64, req: UpdateTaskRequest, success: &str) -> Result<(), AppError> {
        if req.is_empty() {
            return Err(self.fail(AppError::Validation("Nothing to update".to_string())));
        }
        let token = self.token()?;

        let result = self.api.update_task(&token, id, &req).await;
        self.finish_mutation(result, success).await
    }

    /// Needs a session, then asks for confirmation; a declined prompt sends nothing.
    pub async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        let token = self.token()?;
        if !self.confirm.confirm("Delete this task?").await {
            return Err(AppError::Cancelled);
        }

        let result = self.api.delete_task(&token, id).await;
        self.finish_mutation(result, "Task deleted!").await
    }

    // ---- derived views ----

    pub fn filter_all(&self) -> Vec<Task> {
        filters::filter_all(&self.tasks)
    }

    pub fn filter_pending(&self) -> Vec<Task> {
        filters::filter_pending(&self.tasks)
    }

    pub fn filter_completed(&self) -> Vec<Task> {
        filters::filter_completed(&self.tasks)
    }

    pub fn filter_upcoming(&self) -> Vec<Task> {
        filters::filter_upcoming(&self.tasks, Local::now())
    }

    pub fn compute_stats(&self) -> TaskStats {
        TaskStats::compute(&self.tasks, Local::now())
    }

    /// Re-renders the list with one filter applied. The stats panel is left as is.
    pub fn show_filtered(&mut self, filter: TaskFilter) -> &Listing {
        let tasks = filter.apply(&self.tasks, Local::now());
        self.listing = Listing::for_filter(&tasks);
        &self.listing
    }

    // ---- edit modal ----

    pub fn open_edit(&mut self, task: &Task) {
        self.edit = Some(EditModal {
            task_id: task.id,
            form: EditForm::from_task(task),
        });
    }

    pub fn close_edit(&mut self) {
        self.edit = None;
    }

    /// Sends the form as a full update, closes the modal, then reloads.
    pub async fn save_edit(&mut self) -> Result<(), AppError> {
        let Some(modal) = self.edit.take() else {
            return Err(self.fail(AppError::Validation("No task is being edited".to_string())));
        };
        self.update(modal.task_id, modal.form.to_update()).await
    }
}

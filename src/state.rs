use crate::models::{Task, UpdateTaskRequest};

pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub display_name: String,
}

impl Session {
    /// Prefers the name the server returned, else the local part of the email.
    pub fn new(token: String, user_name: Option<&str>, email: &str) -> Self {
        let display_name = user_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Self { token, display_name }
    }
}

/// Screens are mutually exclusive; the edit modal overlays `Tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Tasks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub due: String,
    pub reminder: String,
}

impl EditForm {
    /// Date-times come back as `YYYY-MM-DD HH:MM:SS`; the form uses a `T` separator.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due: task.due_datetime.replacen(' ', "T", 1),
            reminder: task.reminder_datetime.replacen(' ', "T", 1),
        }
    }

    pub fn to_update(&self) -> UpdateTaskRequest {
        UpdateTaskRequest {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            due_datetime: Some(self.due.clone()),
            reminder_datetime: Some(self.reminder.clone()),
            is_completed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModal {
    pub task_id: i64,
    pub form: EditForm,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task {
            id: 3,
            title: "Write report".to_string(),
            description: None,
            due_datetime: "2026-03-01 09:30:00".to_string(),
            reminder_datetime: "2026-02-28 18:00:00".to_string(),
            is_completed: false,
        }
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let session = Session::new("t".to_string(), None, "jane.doe@example.com");
        assert_eq!(session.display_name, "jane.doe");

        let session = Session::new("t".to_string(), Some("Jane"), "jane.doe@example.com");
        assert_eq!(session.display_name, "Jane");
    }

    #[test]
    fn edit_form_uses_t_separator() {
        let form = EditForm::from_task(&task());
        assert_eq!(form.due, "2026-03-01T09:30:00");
        assert_eq!(form.reminder, "2026-02-28T18:00:00");
        assert_eq!(form.description, "");
    }

    #[test]
    fn edit_form_trims_text_fields() {
        let mut form = EditForm::from_task(&task());
        form.title = "  Send report ".to_string();
        let update = form.to_update();
        assert_eq!(update.title.as_deref(), Some("Send report"));
        assert_eq!(update.is_completed, None);
    }
}

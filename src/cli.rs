use std::io;

use async_trait::async_trait;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::notify::{Notifier, Severity};
use crate::services::{Confirm, TaskController, TaskFilter};
use crate::state::View;

/// One line typed at the shell prompt.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Log in and open the task list.
    Login { email: String, password: String },
    /// Create an account. Pass `-` as the phone to leave it empty.
    Register {
        name: String,
        email: String,
        phone: String,
        password: String,
    },
    /// Switch screens.
    Show {
        #[arg(value_enum)]
        view: Screen,
    },
    /// Fetch the task list again.
    Reload,
    /// List every task.
    All,
    /// List tasks not yet completed.
    Pending,
    /// List completed tasks.
    Completed,
    /// List tasks due in the future.
    Upcoming,
    /// Create a task; prompts for each field.
    Add,
    /// Edit a task; blank keeps a field, `-` clears it.
    Edit { id: i64 },
    /// Flip a task between pending and completed.
    Toggle { id: i64 },
    /// Delete a task after confirmation.
    Delete { id: i64 },
    /// End the session.
    Logout,
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Screen {
    Login,
    Register,
    Tasks,
}

impl From<Screen> for View {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Login => View::Login,
            Screen::Register => View::Register,
            Screen::Tasks => View::Tasks,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Blank,
    Run(Command),
    /// Rendered help text requested with `help` or `--help`.
    Help(String),
}

pub fn parse_line(line: &str) -> Result<Input, AppError> {
    let words = shlex::split(line)
        .ok_or_else(|| AppError::Validation("Unterminated quote".to_string()))?;
    if words.is_empty() {
        return Ok(Input::Blank);
    }

    match ShellLine::try_parse_from(words) {
        Ok(parsed) => Ok(Input::Run(parsed.command)),
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            Ok(Input::Help(e.to_string()))
        }
        Err(e) => Err(AppError::Validation(e.to_string().trim_end().to_string())),
    }
}

/// Source of answers to interactive questions.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// `None` once input is exhausted.
    async fn ask(&self, label: &str) -> io::Result<Option<String>>;
}

/// Prompts on stdout and reads answers from stdin.
pub struct Terminal {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

#[async_trait]
impl Prompt for Terminal {
    async fn ask(&self, label: &str) -> io::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;

        let mut lines = self.lines.lock().await;
        let line = lines.next_line().await?;
        Ok(line.map(|l| l.trim_end_matches('\r').to_string()))
    }
}

#[async_trait]
impl Confirm for Terminal {
    async fn confirm(&self, question: &str) -> bool {
        match self.ask(&format!("{} [y/N] ", question)).await {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Runs one shell command against the controller.
/// `Quit` is the caller's to handle and does nothing here.
pub async fn dispatch(
    controller: &mut TaskController,
    notifier: &dyn Notifier,
    prompt: &dyn Prompt,
    command: Command,
) -> Result<(), AppError> {
    match command {
        Command::Login { email, password } => controller.login(&email, &password).await,
        Command::Register { name, email, phone, password } => {
            let phone = if phone == "-" { "" } else { phone.as_str() };
            controller.register(&name, &email, phone, &password).await
        }
        Command::Show { view } => match View::from(view) {
            View::Login => {
                controller.show_login();
                Ok(())
            }
            View::Register => {
                controller.show_register();
                Ok(())
            }
            View::Tasks => controller.show_tasks().await,
        },
        Command::Reload => controller.reload().await,
        Command::All => show(controller, TaskFilter::All),
        Command::Pending => show(controller, TaskFilter::Pending),
        Command::Completed => show(controller, TaskFilter::Completed),
        Command::Upcoming => show(controller, TaskFilter::Upcoming),
        Command::Add => {
            let Some(title) = prompt.ask("title: ").await? else {
                return Ok(());
            };
            let description = prompt.ask("description: ").await?.unwrap_or_default();
            let due = prompt.ask("due (YYYY-MM-DDTHH:MM): ").await?.unwrap_or_default();
            let reminder = prompt
                .ask("reminder (YYYY-MM-DDTHH:MM): ")
                .await?
                .unwrap_or_default();
            controller.create(&title, &description, &due, &reminder).await
        }
        Command::Edit { id } => {
            let Some(task) = controller.task(id).cloned() else {
                notifier.notify("Task not found", Severity::Error);
                return Ok(());
            };
            controller.open_edit(&task);

            let mut cancelled = false;
            if let Some(form) = controller.edit_form_mut() {
                for (label, field) in [
                    ("title", &mut form.title),
                    ("description", &mut form.description),
                    ("due", &mut form.due),
                    ("reminder", &mut form.reminder),
                ] {
                    match prompt.ask(&format!("{} [{}]: ", label, field)).await? {
                        Some(answer) => match answer.trim() {
                            "" => {}
                            "-" => field.clear(),
                            value => *field = value.to_string(),
                        },
                        None => {
                            cancelled = true;
                            break;
                        }
                    }
                }
            }
            if cancelled {
                controller.close_edit();
                return Ok(());
            }
            controller.save_edit().await
        }
        Command::Toggle { id } => match controller.task(id).map(|t| t.is_completed) {
            Some(is_completed) => controller.toggle_status(id, !is_completed).await,
            None => {
                notifier.notify("Task not found", Severity::Error);
                Ok(())
            }
        },
        Command::Delete { id } => controller.delete(id).await,
        Command::Logout => {
            controller.logout();
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

fn show(controller: &mut TaskController, filter: TaskFilter) -> Result<(), AppError> {
    controller.show_filtered(filter);
    Ok(())
}

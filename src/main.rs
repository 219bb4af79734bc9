use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck::api::TaskHttpClient;
use taskdeck::cli::{self, Command, Input, Prompt, Terminal};
use taskdeck::config::ClientConfig;
use taskdeck::notify::{Notifier, Severity, ToastNotifier};
use taskdeck::services::TaskController;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "taskdeck=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::new_from_env()?;
    info!("using task API at {}", config.api_url);

    let api = Arc::new(TaskHttpClient::new(&config)?);
    let toasts = Arc::new(ToastNotifier::new(config.toast_delay));
    let terminal = Arc::new(Terminal::new());
    let mut controller = TaskController::new(api, toasts.clone(), terminal.clone());

    println!("{}", controller.screen());
    while let Some(line) = terminal.ask("> ").await? {
        let command = match cli::parse_line(&line) {
            Ok(Input::Run(Command::Quit)) => break,
            Ok(Input::Run(command)) => command,
            Ok(Input::Help(text)) => {
                println!("{}", text);
                continue;
            }
            Ok(Input::Blank) => continue,
            Err(e) => {
                toasts.notify(&e.user_message(), Severity::Error);
                print_toast(&toasts);
                continue;
            }
        };

        if let Err(e) = cli::dispatch(&mut controller, toasts.as_ref(), terminal.as_ref(), command).await {
            debug!("command ended with error: {}", e);
        }

        println!("{}", controller.screen());
        print_toast(&toasts);
    }

    Ok(())
}

fn print_toast(toasts: &ToastNotifier) {
    if let Some(toast) = toasts.take() {
        println!("[{}] {}", toast.severity, toast.message);
    }
}

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TOAST_MS: u64 = 2500;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub toast_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            toast_delay: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }
}

impl ClientConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_url = env::var("TASKDECK_API_URL").ok();
        let toast_ms = env::var("TASKDECK_TOAST_MS").ok();
        Self::from_values(api_url.as_deref(), toast_ms.as_deref())
    }

    fn from_values(api_url: Option<&str>, toast_ms: Option<&str>) -> Result<Self, AppError> {
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let toast_ms = match toast_ms {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("TASKDECK_TOAST_MS is not a number: {}", raw))
            })?,
            None => DEFAULT_TOAST_MS,
        };

        Ok(Self {
            api_url,
            toast_delay: Duration::from_millis(toast_ms),
        })
    }
}

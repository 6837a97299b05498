use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use super::render::{render_admin_email, render_client_email, EmailMessage};
use crate::assessment::AssessmentRecord;
use crate::config::{Config, EmailSettings};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Non-success HTTP status returned by the email API
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct ApiStatusError {
    status: reqwest::StatusCode,
    message: String,
}

impl ApiStatusError {
    fn new(status: reqwest::StatusCode) -> Self {
        Self {
            status,
            message: describe_status(status),
        }
    }
}

/// Rate limits, server errors and transport failures are worth another try.
/// Other client errors (bad key, rejected address) will fail the same way again.
fn is_transient(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<ApiStatusError>() {
        Some(e) => e.status == reqwest::StatusCode::TOO_MANY_REQUESTS || e.status.is_server_error(),
        None => true,
    }
}

fn describe_status(status: reqwest::StatusCode) -> String {
    match status.as_u16() {
        401 | 403 => "Authentication failed. Check LATAM_READINESS_RESEND_KEY.".to_string(),
        422 => "Email rejected by the provider (check sender and recipient addresses).".to_string(),
        429 => "Email API rate limit exceeded. Wait a few minutes and try again.".to_string(),
        _ => format!("Email API error: HTTP {}", status),
    }
}

/// Send one message through the Resend HTTP API.
///
/// Makes at most 3 attempts with exponential backoff between them. Only
/// transient failures are retried. Returns the provider's message id.
pub async fn dispatch(
    client: &reqwest::Client,
    settings: &EmailSettings,
    from: &str,
    api_key: &str,
    message: &EmailMessage,
) -> Result<String> {
    // Retry strategy: exponential backoff, 2 retries after the first attempt
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(2);

    let body = SendRequest {
        from,
        to: [message.to.as_str()],
        subject: &message.subject,
        html: &message.html,
    };

    let sent: SendResponse = RetryIf::start(
        retry_strategy,
        || async {
            let response = client
                .post(&settings.api_url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| anyhow!("Failed to reach email API: {}", e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiStatusError::new(status).into());
            }

            response
                .json::<SendResponse>()
                .await
                .context("Failed to parse email API response")
        },
        is_transient,
    )
    .await?;

    tracing::info!(to = %message.to, id = %sent.id, "Email sent");
    Ok(sent.id)
}

/// Send the admin and client emails for a record. Best-effort: failures are
/// logged and never propagate. Returns how many messages were accepted.
pub async fn send_assessment_emails(
    record: &AssessmentRecord,
    config: &Config,
    api_key: Option<&str>,
) -> usize {
    if !config.email.enabled {
        tracing::debug!("Email dispatch disabled");
        return 0;
    }
    let Some(api_key) = api_key else {
        tracing::warn!("Email enabled but LATAM_READINESS_RESEND_KEY is not set, skipping dispatch");
        return 0;
    };

    let client = reqwest::Client::new();
    let messages = [
        render_admin_email(record, config),
        render_client_email(record, config),
    ];

    let mut sent = 0;
    for message in &messages {
        match dispatch(&client, &config.email, &config.from_email, api_key, message).await {
            Ok(_) => sent += 1,
            Err(e) => {
                tracing::warn!(to = %message.to, error = %e, "Failed to send email");
            }
        }
    }
    sent
}

/// Write `admin.html` and `client.html` into `dir`, returning the client path
pub fn write_email_files(record: &AssessmentRecord, config: &Config, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let admin_path = dir.join("admin.html");
    std::fs::write(&admin_path, render_admin_email(record, config).html)
        .with_context(|| format!("Failed to write {}", admin_path.display()))?;

    let client_path = dir.join("client.html");
    std::fs::write(&client_path, render_client_email(record, config).html)
        .with_context(|| format!("Failed to write {}", client_path.display()))?;

    Ok(client_path)
}

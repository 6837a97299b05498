use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_FROM_EMAIL: &str = "LATAM Readiness <onboarding@resend.dev>";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Base for results links (`<site_url>/results/<id>`)
    pub site_url: String,
    /// Recipient of new-lead notifications
    pub admin_email: String,
    pub from_email: String,
    /// Assessment store directory; defaults to ~/.config/latam-readiness/assessments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub email: EmailSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            data_dir: None,
            email: EmailSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct EmailSettings {
    pub enabled: bool,
    pub api_url: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: DEFAULT_EMAIL_API_URL.to_string(),
        }
    }
}

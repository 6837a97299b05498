pub mod dispatch;
pub mod render;

pub use dispatch::{dispatch, send_assessment_emails, write_email_files};
pub use render::{html_escape, render_admin_email, render_client_email, EmailMessage};

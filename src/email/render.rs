use std::fmt::Write as _;

use crate::assessment::AssessmentRecord;
use crate::config::Config;
use crate::markets::market_name;

/// Number of recommendations included in the client email
const CLIENT_RECOMMENDATIONS: usize = 3;

/// A rendered email ready to write to disk or dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Escape text for interpolation into HTML element content or attributes
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n\
         <body style=\"font-family: Arial, sans-serif; color: #1A2B3C; max-width: 640px; margin: 0 auto;\">\n\
         {}\n</body>\n</html>\n",
        body
    )
}

fn readiness_banner(record: &AssessmentRecord) -> String {
    let level = record.readiness();
    format!(
        "<div style=\"background: {color}; color: #FFFFFF; padding: 24px; text-align: center; border-radius: 8px;\">\
         <div style=\"font-size: 48px; font-weight: bold;\">{total}/100</div>\
         <div style=\"font-size: 18px;\">{icon} {label}</div></div>",
        color = level.color(),
        total = record.total_score,
        icon = level.icon(),
        label = html_escape(level.label()),
    )
}

fn dimension_table(record: &AssessmentRecord) -> String {
    let mut rows = String::new();
    for (dimension, score) in record.scores.iter() {
        let _ = write!(
            rows,
            "<tr><td style=\"padding: 6px 12px;\">{}</td>\
             <td style=\"padding: 6px 12px; text-align: right; font-weight: bold;\">{}/100</td></tr>",
            html_escape(dimension.label()),
            score
        );
    }
    format!(
        "<h3>Score by dimension</h3><table style=\"width: 100%; border-collapse: collapse;\">{}</table>",
        rows
    )
}

fn contact_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding: 4px 12px; color: #6B7C8D;\">{}</td><td style=\"padding: 4px 12px;\">{}</td></tr>",
        html_escape(label),
        html_escape(value)
    )
}

fn results_link(record: &AssessmentRecord, config: &Config, text: &str) -> String {
    let url = record.results_url(&config.site_url);
    format!(
        "<p style=\"text-align: center; margin: 32px 0;\">\
         <a href=\"{}\" style=\"background: #00D4AA; color: #FFFFFF; padding: 12px 24px; border-radius: 6px; text-decoration: none;\">{}</a></p>",
        html_escape(&url),
        html_escape(text)
    )
}

/// Lead notification for the site administrator
pub fn render_admin_email(record: &AssessmentRecord, config: &Config) -> EmailMessage {
    let contact = &record.contact;

    let mut rows = String::new();
    rows.push_str(&contact_row("Company", &contact.company_name));
    rows.push_str(&contact_row("Email", &contact.company_email));
    if let Some(website) = contact.company_website.as_deref().filter(|w| !w.is_empty()) {
        rows.push_str(&contact_row("Website", website));
    }
    rows.push_str(&contact_row("Contact", &contact.contact_name));
    rows.push_str(&contact_row("Position", &contact.contact_position));
    rows.push_str(&contact_row("Phone", &contact.contact_phone));

    let markets = if record.selected_markets.is_empty() {
        "None selected".to_string()
    } else {
        record
            .selected_markets
            .iter()
            .map(|key| market_name(key))
            .collect::<Vec<_>>()
            .join(", ")
    };
    rows.push_str(&contact_row("Priority markets", &markets));

    let body = format!(
        "<h2>New LATAM readiness assessment</h2>{banner}\
         <h3>Contact</h3><table style=\"width: 100%; border-collapse: collapse;\">{rows}</table>\
         {dimensions}{link}",
        banner = readiness_banner(record),
        rows = rows,
        dimensions = dimension_table(record),
        link = results_link(record, config, "View full results"),
    );

    EmailMessage {
        to: config.admin_email.clone(),
        subject: format!(
            "New lead: {} - score {}/100",
            contact.company_name, record.total_score
        ),
        html: page(&body),
    }
}

/// Results summary for the company that submitted the assessment
pub fn render_client_email(record: &AssessmentRecord, config: &Config) -> EmailMessage {
    let contact = &record.contact;

    let mut recommendations = String::new();
    for rec in record.recommendations.iter().take(CLIENT_RECOMMENDATIONS) {
        let _ = write!(
            recommendations,
            "<div style=\"border-left: 4px solid #00D4AA; padding: 8px 16px; margin: 12px 0;\">\
             <strong>{} {}</strong><p style=\"margin: 4px 0;\">{}</p></div>",
            html_escape(&rec.icon),
            html_escape(&rec.title),
            html_escape(&rec.description)
        );
    }

    let body = format!(
        "<h2>Hello {name},</h2>\
         <p>Thank you for completing the LATAM market readiness assessment for {company}.</p>\
         {banner}{dimensions}\
         <h3>Key recommendations</h3>{recommendations}{link}",
        name = html_escape(&contact.contact_name),
        company = html_escape(&contact.company_name),
        banner = readiness_banner(record),
        dimensions = dimension_table(record),
        recommendations = recommendations,
        link = results_link(record, config, "See your full report"),
    );

    EmailMessage {
        to: contact.company_email.clone(),
        subject: format!("Your LATAM market assessment - {}", contact.company_name),
        html: page(&body),
    }
}

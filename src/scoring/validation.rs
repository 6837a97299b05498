use once_cell::sync::Lazy;
use regex::Regex;

use crate::markets::find_market;
use crate::questionnaire::{ContactInfo, QuestionnaireResponse};

/// Most target markets a submission may prioritize
pub const MAX_SELECTED_MARKETS: usize = 3;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate a submission before it reaches the scoring engine.
/// Returns all validation errors at once (not just the first).
pub fn validate_submission(
    contact: &ContactInfo,
    responses: &QuestionnaireResponse,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let required = [
        ("companyName", &contact.company_name),
        ("contactName", &contact.contact_name),
        ("companyEmail", &contact.company_email),
        ("contactPhone", &contact.contact_phone),
        ("contactPosition", &contact.contact_position),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("{}: required", field));
        }
    }

    let email = contact.company_email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(format!("companyEmail: invalid address '{}'", email));
    }

    if responses.selected_markets.len() > MAX_SELECTED_MARKETS {
        errors.push(format!(
            "selectedMarkets: at most {} markets, got {}",
            MAX_SELECTED_MARKETS,
            responses.selected_markets.len()
        ));
    }

    for (i, key) in responses.selected_markets.iter().enumerate() {
        if find_market(key).is_none() {
            errors.push(format!("selectedMarkets[{}]: unknown market '{}'", i, key));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

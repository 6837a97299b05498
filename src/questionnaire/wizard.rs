use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::answers::*;
use super::selection::{Selection, NONE_SENTINEL};
use super::types::{ContactInfo, QuestionnaireResponse};
use crate::markets::MARKETS;
use crate::scoring::{is_valid_email, MAX_SELECTED_MARKETS};

/// Line-oriented prompts over any reader/writer pair
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush stdout")?;
        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the questionnaire was finished");
        }
        Ok(input.trim().to_string())
    }

    /// Prompt until a non-blank answer is given.
    fn prompt_required(&mut self, message: &str) -> Result<String> {
        loop {
            let input = self.prompt(&format!("{}: ", message))?;
            if !input.is_empty() {
                return Ok(input);
            }
            self.say(&format!("  {} is required.", message))?;
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    fn list_options(&mut self, tags: &[&str]) -> Result<()> {
        for (i, tag) in tags.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, tag).context("Failed to write output")?;
        }
        Ok(())
    }

    /// One answer from `tags`, by number or tag. Empty input skips the question.
    fn prompt_choice<T: From<String>>(&mut self, question: &str, tags: &[&str]) -> Result<Option<T>> {
        self.say(question)?;
        self.list_options(tags)?;
        loop {
            let input = self.prompt("Choice (blank to skip): ")?;
            if input.is_empty() {
                return Ok(None);
            }
            match resolve_tag(&input, tags) {
                Some(tag) => return Ok(Some(T::from(tag.to_string()))),
                None => self.say("  Invalid: pick a listed number or option. Try again.")?,
            }
        }
    }

    /// Comma-separated answers from `tags`. With `allow_none`, "none" is accepted.
    fn prompt_tags(&mut self, question: &str, tags: &[&str], allow_none: bool) -> Result<Vec<String>> {
        self.say(question)?;
        self.list_options(tags)?;
        let hint = if allow_none {
            "Comma-separated choices, 'none', or blank to skip: "
        } else {
            "Comma-separated choices, or blank to skip: "
        };
        'retry: loop {
            let input = self.prompt(hint)?;
            let mut picked: Vec<String> = Vec::new();
            for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                if allow_none && part.eq_ignore_ascii_case(NONE_SENTINEL) {
                    return Ok(vec![NONE_SENTINEL.to_string()]);
                }
                match resolve_tag(part, tags) {
                    Some(tag) => {
                        if !picked.iter().any(|p| p == tag) {
                            picked.push(tag.to_string());
                        }
                    }
                    None => {
                        self.say(&format!("  Invalid option '{}'. Try again.", part))?;
                        continue 'retry;
                    }
                }
            }
            return Ok(picked);
        }
    }

    fn prompt_number(&mut self, question: &str) -> Result<Option<i64>> {
        loop {
            let input = self.prompt(&format!("{} (blank to skip): ", question))?;
            if input.is_empty() {
                return Ok(None);
            }
            match input.parse::<i64>() {
                Ok(v) if v >= 0 => return Ok(Some(v)),
                _ => self.say("  Invalid: must be a non-negative whole number. Try again.")?,
            }
        }
    }
}

/// Match by 1-based index or by tag, case-insensitively
fn resolve_tag<'a>(input: &str, tags: &[&'a str]) -> Option<&'a str> {
    if let Ok(index) = input.parse::<usize>() {
        if index >= 1 && index <= tags.len() {
            return Some(tags[index - 1]);
        }
    }
    tags.iter().copied().find(|tag| tag.eq_ignore_ascii_case(input))
}

fn ask_contact<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<ContactInfo> {
    p.say("")?;
    p.say("Contact")?;
    p.say("-------")?;
    let company_name = p.prompt_required("Company name")?;
    let company_email = loop {
        let email = p.prompt_required("Company email")?;
        if is_valid_email(&email) {
            break email;
        }
        p.say("  Invalid email address. Try again.")?;
    };
    let website = p.prompt("Company website (blank to skip): ")?;
    let contact_name = p.prompt_required("Contact name")?;
    let contact_phone = p.prompt_required("Contact phone")?;
    let contact_position = p.prompt_required("Contact position")?;

    Ok(ContactInfo {
        company_name,
        company_email,
        company_website: (!website.is_empty()).then_some(website),
        contact_name,
        contact_phone,
        contact_position,
    })
}

fn ask_responses<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<QuestionnaireResponse> {
    let mut r = QuestionnaireResponse::default();

    p.say("")?;
    p.say("Company profile")?;
    p.say("---------------")?;
    r.company_size = p.prompt_choice("Company size", CompanySize::TAGS)?;
    r.experience = p.prompt_number("Years in the healthcare sector")?;
    r.headquarters = p.prompt_choice("Headquarters region", Headquarters::TAGS)?;
    r.latam_exp = p.prompt_choice("Prior LATAM experience", LatamExperience::TAGS)?;

    p.say("")?;
    p.say("Product")?;
    p.say("-------")?;
    r.product_types = p
        .prompt_tags("Product types", ProductType::TAGS, false)?
        .into_iter()
        .map(ProductType::from)
        .collect();
    if r.has_product_type(&ProductType::Devices) {
        r.device_class = p.prompt_choice("Device risk class", DeviceClass::TAGS)?;
    }
    r.health_data = p.prompt_choice("Health data handled", HealthData::TAGS)?;

    p.say("")?;
    p.say("Regulatory")?;
    p.say("----------")?;
    r.certifications =
        Selection::from_tags(p.prompt_tags("Certifications held", Certification::TAGS, true)?);
    r.clv = p.prompt_choice("Certificate of free sale", FreeSaleCertificate::TAGS)?;
    r.spanish = p.prompt_choice("Spanish documentation", SpanishDocumentation::TAGS)?;
    r.vigilance = p.prompt_choice("Post-market vigilance", Vigilance::TAGS)?;

    p.say("")?;
    p.say("Technical")?;
    p.say("---------")?;
    r.standards =
        Selection::from_tags(p.prompt_tags("Interoperability standards", InteropStandard::TAGS, true)?);
    r.data_residency = p.prompt_choice("Data residency", DataResidency::TAGS)?;
    r.support = p.prompt_choice("Support coverage", SupportCoverage::TAGS)?;

    p.say("")?;
    p.say("Commercial")?;
    p.say("----------")?;
    r.budget = p.prompt_choice("Expansion budget", Budget::TAGS)?;
    r.entity = p.prompt_choice("Local entity", LocalEntity::TAGS)?;
    r.segments = p
        .prompt_tags("Target segments", Segment::TAGS, false)?
        .into_iter()
        .map(Segment::from)
        .collect();
    r.procurement = p.prompt_choice("Public procurement experience", Procurement::TAGS)?;

    p.say("")?;
    p.say("Target markets")?;
    p.say("--------------")?;
    let keys: Vec<&str> = MARKETS.iter().map(|m| m.key).collect();
    r.selected_markets = loop {
        let picked = p.prompt_tags(
            &format!("Priority markets (up to {})", MAX_SELECTED_MARKETS),
            &keys,
            false,
        )?;
        if picked.len() <= MAX_SELECTED_MARKETS {
            break picked;
        }
        p.say(&format!("  Pick at most {} markets. Try again.", MAX_SELECTED_MARKETS))?;
    };
    r.timeline = p.prompt_choice("Entry timeline", Timeline::TAGS)?;
    r.multi_country = p
        .prompt_number("Countries to enter at once")?
        .map(|n| n.clamp(0, u8::MAX as i64) as u8);

    Ok(r)
}

/// Merge contact fields and answers into one questionnaire document
fn to_document(contact: &ContactInfo, responses: &QuestionnaireResponse) -> Result<Value> {
    let mut document = serde_json::to_value(responses).context("Failed to serialize answers")?;
    let contact = serde_json::to_value(contact).context("Failed to serialize contact")?;
    if let (Some(fields), Value::Object(contact_fields)) = (document.as_object_mut(), contact) {
        fields.extend(contact_fields);
    }
    Ok(document)
}

fn run_with<R: BufRead, W: Write>(p: &mut Prompter<R, W>, output: &Path) -> Result<Option<PathBuf>> {
    p.say("")?;
    p.say("LATAM Market Readiness Questionnaire")?;
    p.say("====================================")?;

    let contact = ask_contact(p)?;
    let responses = ask_responses(p)?;

    p.say("")?;
    let input = p.prompt(&format!(
        "Where should the questionnaire be saved? [{}]: ",
        output.display()
    ))?;
    let path = if input.is_empty() {
        output.to_path_buf()
    } else {
        PathBuf::from(input)
    };

    if path.exists() {
        let overwrite = p.prompt_yes_no(
            &format!("File already exists at {}. Overwrite?", path.display()),
            false,
        )?;
        if !overwrite {
            p.say("Aborted.")?;
            return Ok(None);
        }
    }

    let document = to_document(&contact, &responses)?;
    let yaml = serde_saphyr::to_string(&document)
        .map_err(|e| anyhow::anyhow!("Failed to serialize questionnaire: {}", e))?;

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&path, &yaml)
        .with_context(|| format!("Failed to write questionnaire to {}", path.display()))?;

    p.say("")?;
    p.say(&format!("Questionnaire written to {}", path.display()))?;
    p.say(&format!("Run `latam-readiness assess {}` to score it.", path.display()))?;

    Ok(Some(path))
}

/// Run the interactive questionnaire on stdin/stdout and write it as YAML.
///
/// Returns the written path, or None if the user declined to overwrite.
pub fn run_questionnaire_wizard(output: &Path) -> Result<Option<PathBuf>> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter {
        input: stdin.lock(),
        output: std::io::stdout(),
    };
    run_with(&mut prompter, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{load_document, parse_contact, parse_questionnaire};
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter {
            input: Cursor::new(script.as_bytes().to_vec()),
            output: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_tag_by_index_and_name() {
        assert_eq!(resolve_tag("2", CompanySize::TAGS), Some("small"));
        assert_eq!(resolve_tag("LARGE", CompanySize::TAGS), Some("large"));
        assert_eq!(resolve_tag("0", CompanySize::TAGS), None);
        assert_eq!(resolve_tag("5", CompanySize::TAGS), None);
        assert_eq!(resolve_tag("huge", CompanySize::TAGS), None);
    }

    #[test]
    fn test_prompt_choice_retries_then_accepts() {
        let mut p = prompter("huge\n3\n");
        let size: Option<CompanySize> = p.prompt_choice("Company size", CompanySize::TAGS).unwrap();
        assert_eq!(size, Some(CompanySize::Medium));
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("Invalid"));
    }

    #[test]
    fn test_prompt_tags_none_wins() {
        let mut p = prompter("fda, none\n");
        let tags = p.prompt_tags("Certifications", Certification::TAGS, true).unwrap();
        assert_eq!(tags, vec!["none".to_string()]);
    }

    #[test]
    fn test_prompt_tags_dedups() {
        let mut p = prompter("1,software,2\n");
        let tags = p.prompt_tags("Products", ProductType::TAGS, false).unwrap();
        assert_eq!(tags, vec!["software".to_string(), "telemedicine".to_string()]);
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut p = prompter("");
        assert!(p.prompt_required("Company name").is_err());
    }

    #[test]
    fn test_full_wizard_writes_parseable_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("answers.yaml");
        let script = [
            "Acme Health",        // company name
            "not-an-email",       // rejected
            "ops@acme.health",    // company email
            "",                   // website
            "Ana",                // contact name
            "+52 55 0000 0000",   // phone
            "CEO",                // position
            "large",              // company size
            "12",                 // experience
            "usa",                // headquarters
            "some",               // latam experience
            "software,devices",   // product types
            "2",                  // device class
            "identified",         // health data
            "fda,iso13485",       // certifications
            "yes",                // free sale
            "full",               // spanish
            "full",               // vigilance
            "hl7fhir",            // standards
            "latam",              // residency
            "24-7",               // support
            "high",               // budget
            "willing",            // entity
            "public,insurers",    // segments
            "some",               // procurement
            "mexico,colombia",    // markets
            "short",              // timeline
            "2",                  // multi-country
            "",                   // output path default
        ]
        .join("\n")
            + "\n";
        let mut p = prompter(&script);

        let written = run_with(&mut p, &output).unwrap();
        assert_eq!(written.as_deref(), Some(output.as_path()));

        let document = load_document(&output).unwrap();
        let contact = parse_contact(&document).unwrap();
        assert_eq!(contact.company_email, "ops@acme.health");
        assert!(contact.company_website.is_none());

        let responses = parse_questionnaire(&document).unwrap();
        assert_eq!(responses.company_size, Some(CompanySize::Large));
        assert_eq!(responses.experience, Some(12));
        assert_eq!(responses.device_class, Some(DeviceClass::ClassII));
        assert_eq!(
            responses.certifications,
            Selection::Chosen(vec![Certification::Fda, Certification::Iso13485])
        );
        assert_eq!(responses.selected_markets, vec!["mexico", "colombia"]);
        assert_eq!(responses.multi_country, Some(2));
    }

    #[test]
    fn test_declined_overwrite_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("answers.yaml");
        std::fs::write(&output, "keep: me\n").unwrap();

        let mut script = String::from("Acme\nops@acme.health\n\nAna\n123\nCEO\n");
        // skip all 20 questions, keep the default path, then decline
        script.push_str(&"\n".repeat(21));
        script.push_str("n\n");
        let mut p = prompter(&script);

        let written = run_with(&mut p, &output).unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep: me\n");
    }
}

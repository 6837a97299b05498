use serde::{Deserialize, Deserializer, Serialize};

use super::answers::*;
use super::selection::Selection;

/// Questionnaire answers for one submission.
///
/// Every field may be absent. Wire names are camelCase so a document
/// exported by the web form deserializes unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireResponse {
    // Company profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySize>,
    #[serde(
        deserialize_with = "deserialize_years",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<Headquarters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latam_exp: Option<LatamExperience>,

    // Product
    pub product_types: Vec<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_data: Option<HealthData>,

    // Regulatory
    pub certifications: Selection<Certification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clv: Option<FreeSaleCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spanish: Option<SpanishDocumentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vigilance: Option<Vigilance>,

    // Technical
    pub standards: Selection<InteropStandard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_residency: Option<DataResidency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportCoverage>,

    // Commercial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<LocalEntity>,
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procurement: Option<Procurement>,

    // Target markets
    pub selected_markets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_country: Option<u8>,
}

impl QuestionnaireResponse {
    pub fn has_product_type(&self, product_type: &ProductType) -> bool {
        self.product_types.contains(product_type)
    }

    /// Number of distinct market segments targeted
    pub fn segment_count(&self) -> usize {
        let mut distinct: Vec<&Segment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            if !distinct.contains(&segment) {
                distinct.push(segment);
            }
        }
        distinct.len()
    }
}

/// Who submitted the questionnaire. Validated by the caller, never scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(alias = "companyName")]
    pub company_name: String,
    #[serde(alias = "companyEmail")]
    pub company_email: String,
    #[serde(alias = "companyWebsite", skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(alias = "contactName")]
    pub contact_name: String,
    #[serde(alias = "contactPhone")]
    pub contact_phone: String,
    #[serde(alias = "contactPosition")]
    pub contact_position: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYears {
    Number(f64),
    Text(String),
}

/// Accepts a number or a numeric string ("20+" reads as 20).
/// Anything unparseable is treated as unanswered.
fn deserialize_years<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let raw = Option::<RawYears>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawYears::Number(n)) if n.is_finite() => Some(n.trunc() as i64),
        Some(RawYears::Number(_)) => None,
        Some(RawYears::Text(text)) => leading_integer(&text),
        None => None,
    })
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

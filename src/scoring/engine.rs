use serde::{Deserialize, Serialize};
use std::fmt;

use super::factors;
use super::weights::COMPOSITE_WEIGHTS;
use crate::questionnaire::{ProductType, QuestionnaireResponse, Selection};

/// One of the five independent readiness axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Company,
    Product,
    Regulatory,
    Technical,
    Commercial,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Company,
        Dimension::Product,
        Dimension::Regulatory,
        Dimension::Technical,
        Dimension::Commercial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Company => "Company profile",
            Dimension::Product => "Product type",
            Dimension::Regulatory => "Regulatory readiness",
            Dimension::Technical => "Technical capability",
            Dimension::Commercial => "Commercial capability",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-dimension readiness, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub company: u8,
    pub product: u8,
    pub regulatory: u8,
    pub technical: u8,
    pub commercial: u8,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Company => self.company,
            Dimension::Product => self.product,
            Dimension::Regulatory => self.regulatory,
            Dimension::Technical => self.technical,
            Dimension::Commercial => self.commercial,
        }
    }

    /// Scores paired with their dimension, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Company size", "Certifications"
    pub description: String, // e.g. "large (100 x 0.2)", "fda, ce (capped at 40)"
    pub before: f64,         // Points before this factor
    pub after: f64,          // Points after this factor
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub dimension: Dimension,
    pub score: u8,
    pub factors: Vec<FactorContribution>,
}

/// Running point total for one dimension, recording each step.
struct Tally {
    points: f64,
    factors: Vec<FactorContribution>,
}

impl Tally {
    fn new() -> Self {
        Self {
            points: 0.0,
            factors: Vec::new(),
        }
    }

    fn add(&mut self, label: &str, description: String, delta: f64) {
        let before = self.points;
        self.points += delta;
        self.factors.push(FactorContribution {
            label: label.to_string(),
            description,
            before,
            after: self.points,
        });
    }

    /// Add a normalized 0-100 answer value scaled by its weight
    fn weighted(&mut self, label: &str, answer: Option<&str>, value: f64, weight: f64) {
        let description = format!("{} ({} x {})", answer.unwrap_or("unanswered"), value, weight);
        self.add(label, description, value * weight);
    }

    fn cap(&mut self, label: &str, max: f64) {
        if self.points > max {
            self.add(label, format!("capped at {}", max), max - self.points);
        }
    }

    fn finish(self, dimension: Dimension) -> ScoreBreakdown {
        ScoreBreakdown {
            dimension,
            score: to_score(self.points),
            factors: self.factors,
        }
    }
}

/// Round half-up and clamp into the 0-100 score range
fn to_score(points: f64) -> u8 {
    if points.is_nan() {
        return 0;
    }
    points.round().clamp(0.0, 100.0) as u8
}

fn tags<T: AsRef<str>>(items: &[T]) -> String {
    items.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(", ")
}

pub fn explain_company(r: &QuestionnaireResponse) -> ScoreBreakdown {
    let mut tally = Tally::new();
    let size = r.company_size.as_ref();
    tally.weighted("Company size", size.map(|a| a.as_str()), factors::company_size(size), 0.2);

    let years = factors::experience(r.experience);
    tally.add(
        "Experience",
        format!("{} years ({} x 0.3)", r.experience.unwrap_or(0).max(0), years),
        years * 0.3,
    );

    let hq = r.headquarters.as_ref();
    tally.weighted("Headquarters", hq.map(|a| a.as_str()), factors::headquarters(hq), 0.2);

    let latam = r.latam_exp.as_ref();
    tally.weighted("LATAM experience", latam.map(|a| a.as_str()), factors::latam_experience(latam), 0.3);

    tally.finish(Dimension::Company)
}

pub fn explain_product(r: &QuestionnaireResponse) -> ScoreBreakdown {
    let mut tally = Tally::new();

    if r.has_product_type(&ProductType::Software) || r.has_product_type(&ProductType::Telemedicine) {
        tally.add("Digital product", "software or telemedicine".to_string(), 30.0);
    }

    // Devices carry the class-based term; everything else gets the flat bonus
    if r.has_product_type(&ProductType::Devices) {
        let class = r.device_class.as_ref();
        tally.weighted("Device class", class.map(|a| a.as_str()), factors::device_class(class), 0.3);
    } else {
        tally.add("No medical device", "flat bonus".to_string(), 25.0);
    }

    let data = r.health_data.as_ref();
    tally.weighted("Health data", data.map(|a| a.as_str()), factors::health_data(data), 0.4);

    tally.finish(Dimension::Product)
}

pub fn explain_regulatory(r: &QuestionnaireResponse) -> ScoreBreakdown {
    let mut tally = Tally::new();

    match &r.certifications {
        Selection::Unanswered | Selection::NoneApplicable => {
            tally.add("Certifications", "none".to_string(), 10.0);
        }
        Selection::Chosen(certs) => {
            let points: f64 = certs.iter().map(factors::certification).sum();
            tally.add("Certifications", tags(certs), points);
        }
    }
    tally.cap("Certifications", 40.0);

    let clv = r.clv.as_ref();
    tally.weighted("Free sale certificate", clv.map(|a| a.as_str()), factors::free_sale_certificate(clv), 0.2);

    let spanish = r.spanish.as_ref();
    tally.weighted(
        "Spanish documentation",
        spanish.map(|a| a.as_str()),
        factors::spanish_documentation(spanish),
        0.2,
    );

    let vigilance = r.vigilance.as_ref();
    tally.weighted("Vigilance", vigilance.map(|a| a.as_str()), factors::vigilance(vigilance), 0.2);

    tally.finish(Dimension::Regulatory)
}

pub fn explain_technical(r: &QuestionnaireResponse) -> ScoreBreakdown {
    let mut tally = Tally::new();

    match &r.standards {
        Selection::Unanswered | Selection::NoneApplicable => {
            tally.add("Standards", "none".to_string(), 20.0);
        }
        Selection::Chosen(standards) => {
            let points: f64 = standards.iter().map(factors::interop_standard).sum();
            tally.add("Standards", tags(standards), points);
        }
    }
    tally.cap("Standards", 40.0);

    let residency = r.data_residency.as_ref();
    tally.weighted("Data residency", residency.map(|a| a.as_str()), factors::data_residency(residency), 0.3);

    let support = r.support.as_ref();
    tally.weighted("Support", support.map(|a| a.as_str()), factors::support(support), 0.3);

    tally.finish(Dimension::Technical)
}

pub fn explain_commercial(r: &QuestionnaireResponse) -> ScoreBreakdown {
    let mut tally = Tally::new();

    let budget = r.budget.as_ref();
    tally.weighted("Budget", budget.map(|a| a.as_str()), factors::budget(budget), 0.3);

    let entity = r.entity.as_ref();
    tally.weighted("Local entity", entity.map(|a| a.as_str()), factors::local_entity(entity), 0.25);

    let count = r.segment_count();
    tally.add("Segments", format!("{} targeted", count), factors::segments(count));

    let procurement = r.procurement.as_ref();
    tally.weighted("Procurement", procurement.map(|a| a.as_str()), factors::procurement(procurement), 0.2);

    tally.finish(Dimension::Commercial)
}

/// Full factor-by-factor breakdown for one dimension
pub fn explain_dimension(r: &QuestionnaireResponse, dimension: Dimension) -> ScoreBreakdown {
    match dimension {
        Dimension::Company => explain_company(r),
        Dimension::Product => explain_product(r),
        Dimension::Regulatory => explain_regulatory(r),
        Dimension::Technical => explain_technical(r),
        Dimension::Commercial => explain_commercial(r),
    }
}

pub fn calculate_company_score(r: &QuestionnaireResponse) -> u8 {
    explain_company(r).score
}

pub fn calculate_product_score(r: &QuestionnaireResponse) -> u8 {
    explain_product(r).score
}

pub fn calculate_regulatory_score(r: &QuestionnaireResponse) -> u8 {
    explain_regulatory(r).score
}

pub fn calculate_technical_score(r: &QuestionnaireResponse) -> u8 {
    explain_technical(r).score
}

pub fn calculate_commercial_score(r: &QuestionnaireResponse) -> u8 {
    explain_commercial(r).score
}

pub fn compute_dimension_scores(r: &QuestionnaireResponse) -> DimensionScores {
    let scores = DimensionScores {
        company: calculate_company_score(r),
        product: calculate_product_score(r),
        regulatory: calculate_regulatory_score(r),
        technical: calculate_technical_score(r),
        commercial: calculate_commercial_score(r),
    };
    tracing::debug!(?scores, "Computed dimension scores");
    scores
}

/// Composite readiness score from the weighted dimensions
pub fn compute_total_score(scores: &DimensionScores) -> u8 {
    to_score(COMPOSITE_WEIGHTS.apply(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::*;

    fn top_of_range() -> QuestionnaireResponse {
        QuestionnaireResponse {
            company_size: Some(CompanySize::Large),
            experience: Some(20),
            headquarters: Some(Headquarters::Latam),
            latam_exp: Some(LatamExperience::Extensive),
            product_types: vec![ProductType::Software],
            health_data: Some(HealthData::No),
            certifications: Selection::from_tags(["fda", "ce"]),
            clv: Some(FreeSaleCertificate::Yes),
            spanish: Some(SpanishDocumentation::Full),
            vigilance: Some(Vigilance::Full),
            standards: Selection::from_tags(["hl7fhir", "api"]),
            data_residency: Some(DataResidency::Latam),
            support: Some(SupportCoverage::AroundTheClock),
            budget: Some(Budget::Enterprise),
            entity: Some(LocalEntity::Yes),
            segments: vec![Segment::Public, Segment::Insurers],
            procurement: Some(Procurement::Extensive),
            ..Default::default()
        }
    }

    #[test]
    fn test_top_of_range_scenario() {
        let scores = compute_dimension_scores(&top_of_range());
        assert_eq!(scores.company, 94); // 20 size + 24 for 20 years + 20 + 30
        assert_eq!(scores.product, 95); // 30 base + 25 no device + 40 health data
        assert_eq!(scores.regulatory, 100);
        assert_eq!(scores.technical, 95); // 35 standards + 30 + 30
        assert_eq!(scores.commercial, 95); // 30 + 25 + 20 segments + 20
        // 14.1 + 19 + 25 + 19 + 19 = 96.1
        assert_eq!(compute_total_score(&scores), 96);
    }

    #[test]
    fn test_empty_responses_scenario() {
        let scores = compute_dimension_scores(&QuestionnaireResponse::default());
        assert_eq!(
            scores,
            DimensionScores {
                company: 0,
                product: 25,
                regulatory: 10,
                technical: 20,
                commercial: 0,
            }
        );
        // 0 + 5 + 2.5 + 4 + 0 = 11.5, rounds half-up
        assert_eq!(compute_total_score(&scores), 12);
    }

    #[test]
    fn test_company_rounding() {
        let r = QuestionnaireResponse {
            company_size: Some(CompanySize::Startup),
            experience: Some(3),
            headquarters: Some(Headquarters::Asia),
            latam_exp: Some(LatamExperience::None),
            ..Default::default()
        };
        // 8 + 3.6 + 10 + 9 = 30.6
        assert_eq!(calculate_company_score(&r), 31);
    }

    #[test]
    fn test_devices_replace_flat_bonus() {
        let r = QuestionnaireResponse {
            product_types: vec![ProductType::Devices],
            device_class: Some(DeviceClass::ClassI),
            health_data: Some(HealthData::Identified),
            ..Default::default()
        };
        // 80 x 0.3 + 40 x 0.4 = 24 + 16
        assert_eq!(calculate_product_score(&r), 40);
    }

    #[test]
    fn test_software_and_devices_stack() {
        let r = QuestionnaireResponse {
            product_types: vec![ProductType::Software, ProductType::Devices],
            device_class: Some(DeviceClass::ClassII),
            health_data: Some(HealthData::No),
            ..Default::default()
        };
        // 30 + 18 + 40
        assert_eq!(calculate_product_score(&r), 88);
    }

    #[test]
    fn test_device_class_without_devices_is_inert() {
        let r = QuestionnaireResponse {
            product_types: vec![ProductType::Ai],
            device_class: Some(DeviceClass::ClassI),
            ..Default::default()
        };
        assert_eq!(calculate_product_score(&r), 25);
    }

    #[test]
    fn test_certifications_capped_before_other_factors() {
        let r = QuestionnaireResponse {
            certifications: Selection::from_tags(["fda", "ce", "iso13485", "gmp"]),
            clv: Some(FreeSaleCertificate::No),
            ..Default::default()
        };
        // min(65, 40) + 4
        assert_eq!(calculate_regulatory_score(&r), 44);
    }

    #[test]
    fn test_none_certification_scores_flat_ten() {
        let r = QuestionnaireResponse {
            certifications: Selection::NoneApplicable,
            ..Default::default()
        };
        assert_eq!(calculate_regulatory_score(&r), 10);
    }

    #[test]
    fn test_unrecognized_certifications_only_score_zero() {
        let r = QuestionnaireResponse {
            certifications: Selection::from_tags(["iso9001"]),
            ..Default::default()
        };
        assert_eq!(calculate_regulatory_score(&r), 0);
    }

    #[test]
    fn test_technical_standards() {
        let r = QuestionnaireResponse {
            standards: Selection::from_tags(["hl7v2", "loinc"]),
            data_residency: Some(DataResidency::Flexible),
            support: Some(SupportCoverage::Limited),
            ..Default::default()
        };
        // 15 + 27 + 12
        assert_eq!(calculate_technical_score(&r), 54);
    }

    #[test]
    fn test_commercial_segments_saturate() {
        let r = QuestionnaireResponse {
            budget: Some(Budget::Low),
            entity: Some(LocalEntity::Distributor),
            segments: vec![
                Segment::Public,
                Segment::PrivateHospitals,
                Segment::Insurers,
                Segment::B2c,
            ],
            procurement: Some(Procurement::No),
            ..Default::default()
        };
        // 9 + 12.5 + 25 + 6 = 52.5
        assert_eq!(calculate_commercial_score(&r), 53);
    }

    #[test]
    fn test_breakdown_tracks_running_total() {
        let breakdown = explain_regulatory(&QuestionnaireResponse {
            certifications: Selection::from_tags(["fda", "ce", "hipaa"]),
            ..Default::default()
        });
        let labels: Vec<&str> = breakdown.factors.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels[0], "Certifications");
        assert_eq!(breakdown.factors[1].description, "capped at 40");
        assert_eq!(breakdown.factors[1].after, 40.0);
        for pair in breakdown.factors.windows(2) {
            assert_eq!(pair[0].after, pair[1].before);
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let r = top_of_range();
        assert_eq!(compute_dimension_scores(&r), compute_dimension_scores(&r));
    }

    #[test]
    fn test_dimension_scores_iter_order() {
        let scores = compute_dimension_scores(&QuestionnaireResponse::default());
        let dims: Vec<Dimension> = scores.iter().map(|(d, _)| d).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
    }
}

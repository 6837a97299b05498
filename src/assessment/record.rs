use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::level::ReadinessLevel;
use crate::markets::CATALOG_VERSION;
use crate::questionnaire::{ContactInfo, QuestionnaireResponse};
use crate::scoring::{
    compute_dimension_scores, compute_market_fit, compute_recommendations, compute_total_score,
    DimensionScores, MarketFitResult, Recommendation,
};

/// One scored submission. Built once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub responses: QuestionnaireResponse,
    pub scores: DimensionScores,
    pub total_score: u8,
    pub market_fit: Vec<MarketFitResult>,
    pub recommendations: Vec<Recommendation>,
    pub selected_markets: Vec<String>,
    pub catalog_version: u32,
}

impl AssessmentRecord {
    /// Score the responses and stamp a fresh identity and timestamp
    pub fn new(contact: ContactInfo, responses: QuestionnaireResponse) -> Self {
        Self::with_identity(Uuid::new_v4(), Utc::now(), contact, responses)
    }

    pub fn with_identity(
        id: Uuid,
        created_at: DateTime<Utc>,
        contact: ContactInfo,
        responses: QuestionnaireResponse,
    ) -> Self {
        let scores = compute_dimension_scores(&responses);
        let total_score = compute_total_score(&scores);
        let selected_markets = responses.selected_markets.clone();
        let market_fit = compute_market_fit(&scores, total_score, &selected_markets);
        let recommendations = compute_recommendations(&scores);

        Self {
            id,
            created_at,
            contact,
            responses,
            scores,
            total_score,
            market_fit,
            recommendations,
            selected_markets,
            catalog_version: CATALOG_VERSION,
        }
    }

    pub fn readiness(&self) -> ReadinessLevel {
        ReadinessLevel::from_score(self.total_score)
    }

    /// Ranked results for the markets the respondent prioritized
    pub fn selected_fits(&self) -> impl Iterator<Item = &MarketFitResult> {
        self.market_fit.iter().filter(|m| m.selected)
    }

    /// Link to the hosted report for this assessment
    pub fn results_url(&self, site_url: &str) -> String {
        format!("{}/results/{}", site_url.trim_end_matches('/'), self.id)
    }

    pub fn summary(&self) -> AssessmentSummary {
        AssessmentSummary {
            id: self.id,
            company_name: self.contact.company_name.clone(),
            contact_name: self.contact.contact_name.clone(),
            total_score: self.total_score,
            created_at: self.created_at,
        }
    }
}

/// Listing row for recent assessments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: Uuid,
    pub company_name: String,
    pub contact_name: String,
    pub total_score: u8,
    pub created_at: DateTime<Utc>,
}

use super::engine::DimensionScores;

/// Share of each dimension in the composite readiness score.
///
/// The five weights must sum to 1.0 so the composite stays on the 0-100
/// scale of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeights {
    pub company: f64,
    pub product: f64,
    pub regulatory: f64,
    pub technical: f64,
    pub commercial: f64,
}

pub const COMPOSITE_WEIGHTS: DimensionWeights = DimensionWeights {
    company: 0.15,
    product: 0.20,
    regulatory: 0.25,
    technical: 0.20,
    commercial: 0.20,
};

impl DimensionWeights {
    pub fn sum(&self) -> f64 {
        self.company + self.product + self.regulatory + self.technical + self.commercial
    }

    /// Weighted sum of the dimension scores, unrounded
    pub fn apply(&self, scores: &DimensionScores) -> f64 {
        f64::from(scores.company) * self.company
            + f64::from(scores.product) * self.product
            + f64::from(scores.regulatory) * self.regulatory
            + f64::from(scores.technical) * self.technical
            + f64::from(scores.commercial) * self.commercial
    }
}

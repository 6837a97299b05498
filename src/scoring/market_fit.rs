use serde::{Deserialize, Serialize};

use super::engine::DimensionScores;
use crate::markets::{MarketProfile, MARKETS};

/// Regulatory score below which high-complexity markets are penalized
const REGULATORY_THRESHOLD: u8 = 50;
const COMPLEXITY_PENALTY: i32 = -15;

/// Technical score at which digitally mature markets earn a bonus
const TECHNICAL_THRESHOLD: u8 = 60;
const DIGITAL_BONUS: i32 = 10;

/// Commercial score at which small markets earn a bonus
const COMMERCIAL_THRESHOLD: u8 = 60;
const SMALL_MARKET_BONUS: i32 = 5;

/// Compatibility of one catalog market with an assessed company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketFitResult {
    pub key: String,
    pub name: String,
    pub flag: String,
    pub size: u8,
    pub complexity: u8,
    pub digital: u8,
    pub highlights: String,
    pub score: u8,
    pub selected: bool,
}

/// Total score plus every market-specific adjustment that applies
fn adjusted_score(market: &MarketProfile, scores: &DimensionScores, total_score: u8) -> u8 {
    let mut compatibility = i32::from(total_score);

    if scores.regulatory < REGULATORY_THRESHOLD && market.complexity > 3 {
        compatibility += COMPLEXITY_PENALTY;
    }
    if scores.technical >= TECHNICAL_THRESHOLD && market.digital >= 4 {
        compatibility += DIGITAL_BONUS;
    }
    if scores.commercial >= COMMERCIAL_THRESHOLD && market.size <= 2 {
        compatibility += SMALL_MARKET_BONUS;
    }

    compatibility.clamp(0, 100) as u8
}

/// Rank every catalog market by adjusted compatibility.
///
/// Always returns the full catalog, sorted by score descending. Ties keep
/// catalog order. `selected` reflects only membership in `selected_markets`.
pub fn compute_market_fit(
    scores: &DimensionScores,
    total_score: u8,
    selected_markets: &[String],
) -> Vec<MarketFitResult> {
    let mut results: Vec<MarketFitResult> = MARKETS
        .iter()
        .map(|market| MarketFitResult {
            key: market.key.to_string(),
            name: market.name.to_string(),
            flag: market.flag.to_string(),
            size: market.size,
            complexity: market.complexity,
            digital: market.digital,
            highlights: market.highlights.to_string(),
            score: adjusted_score(market, scores, total_score),
            selected: selected_markets.iter().any(|k| k == market.key),
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

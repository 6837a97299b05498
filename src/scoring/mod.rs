pub mod engine;
pub mod factors;
pub mod market_fit;
pub mod recommendations;
pub mod validation;
pub mod weights;

pub use engine::{
    compute_dimension_scores, compute_total_score, explain_dimension, Dimension, DimensionScores,
    FactorContribution, ScoreBreakdown,
};
pub use market_fit::{compute_market_fit, MarketFitResult};
pub use recommendations::{compute_recommendations, Priority, Recommendation};
pub use validation::{is_valid_email, validate_submission, MAX_SELECTED_MARKETS};
pub use weights::{DimensionWeights, COMPOSITE_WEIGHTS};

pub mod level;
pub mod record;
pub mod storage;

pub use level::{LeadTier, ReadinessLevel};
pub use record::{AssessmentRecord, AssessmentSummary};
pub use storage::{
    get_assessments_dir, list_assessments, load_assessment, load_assessments, save_assessment,
    AssessmentNotFound, DEFAULT_LIST_LIMIT,
};

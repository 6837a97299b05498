pub mod answers;
pub mod parse;
pub mod selection;
pub mod types;
pub mod wizard;

pub use answers::*;
pub use parse::{load_document, parse_contact, parse_questionnaire};
pub use selection::{Selection, NONE_SENTINEL};
pub use types::{ContactInfo, QuestionnaireResponse};
pub use wizard::run_questionnaire_wizard;

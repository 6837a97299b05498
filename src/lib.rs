pub mod assessment;
pub mod browser;
pub mod config;
pub mod email;
pub mod error;
pub mod markets;
pub mod output;
pub mod questionnaire;
pub mod scoring;

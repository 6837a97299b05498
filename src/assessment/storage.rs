use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::level::LeadTier;
use super::record::{AssessmentRecord, AssessmentSummary};

const STORE_VERSION: u32 = 1;

/// Default number of rows returned by `list_assessments`
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// On-disk envelope around a record
#[derive(Debug, Serialize, Deserialize)]
struct StoredAssessment {
    version: u32,
    assessment: AssessmentRecord,
}

/// Raised when an assessment id has no file in the store
#[derive(Debug, thiserror::Error)]
#[error("Assessment {0} not found")]
pub struct AssessmentNotFound(pub Uuid);

/// Get the default assessment store directory (~/.config/latam-readiness/assessments/)
pub fn get_assessments_dir() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("assessments"))
}

fn record_path(dir: &Path, id: &Uuid) -> PathBuf {
    dir.join(format!("{}.json", id))
}

/// Save an assessment to `<dir>/<id>.json` atomically
///
/// Uses atomic-write-file so a crash never leaves a half-written record.
/// Creates the store directory if it doesn't exist.
pub fn save_assessment(dir: &Path, record: &AssessmentRecord) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create assessment store at {}", dir.display()))?;

    let path = record_path(dir, &record.id);
    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    let stored = StoredAssessment {
        version: STORE_VERSION,
        assessment: record.clone(),
    };
    serde_json::to_writer_pretty(&mut file, &stored).context("Failed to serialize assessment")?;

    file.commit().context("Failed to save assessment")?;

    tracing::info!(id = %record.id, path = %path.display(), "Saved assessment");
    Ok(path)
}

fn read_record(path: &Path) -> Result<AssessmentRecord> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open assessment file at {}", path.display()))?;

    let stored: StoredAssessment = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load assessment from {}", path.display()))?;

    if stored.version != STORE_VERSION {
        anyhow::bail!("Unsupported assessment store version: {}", stored.version);
    }

    Ok(stored.assessment)
}

/// Load one assessment by id
///
/// A missing file yields an `AssessmentNotFound` error.
pub fn load_assessment(dir: &Path, id: &Uuid) -> Result<AssessmentRecord> {
    let path = record_path(dir, id);
    if !path.exists() {
        return Err(AssessmentNotFound(*id).into());
    }
    read_record(&path)
}

/// Stored assessments, newest first.
///
/// `since` keeps only records created at or after that instant and `tier`
/// keeps only records whose total score falls in that lead tier. Unreadable
/// files are skipped with a warning so one bad record never hides the rest.
pub fn load_assessments(
    dir: &Path,
    since: Option<DateTime<Utc>>,
    tier: Option<LeadTier>,
) -> Result<Vec<AssessmentRecord>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read assessment store at {}", dir.display()))?;

    let mut records = Vec::new();
    for entry in entries {
        let path = entry.context("Failed to read assessment store entry")?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        match read_record(&path) {
            Ok(record) => {
                if since.is_some_and(|cutoff| record.created_at < cutoff) {
                    continue;
                }
                if tier.is_some_and(|t| !t.contains(record.total_score)) {
                    continue;
                }
                records.push(record);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable assessment");
            }
        }
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(records)
}

/// Summaries of at most `limit` stored assessments, newest first
pub fn list_assessments(
    dir: &Path,
    limit: usize,
    since: Option<DateTime<Utc>>,
    tier: Option<LeadTier>,
) -> Result<Vec<AssessmentSummary>> {
    Ok(load_assessments(dir, since, tier)?
        .iter()
        .take(limit)
        .map(AssessmentRecord::summary)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{ContactInfo, QuestionnaireResponse};
    use chrono::Duration;

    fn record_scoring(company: &str, total_score: u8) -> AssessmentRecord {
        AssessmentRecord {
            total_score,
            ..record_at(company, Utc::now())
        }
    }

    fn record_at(company: &str, created_at: DateTime<Utc>) -> AssessmentRecord {
        AssessmentRecord::with_identity(
            Uuid::new_v4(),
            created_at,
            ContactInfo {
                company_name: company.to_string(),
                contact_name: "Ana".to_string(),
                ..Default::default()
            },
            QuestionnaireResponse::default(),
        )
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let record = record_at("Acme", Utc::now());

        let path = save_assessment(dir.path(), &record).unwrap();
        assert!(path.ends_with(format!("{}.json", record.id)));

        let loaded = load_assessment(dir.path(), &record.id).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_assessment(dir.path(), &Uuid::new_v4()).unwrap_err();
        assert!(err.downcast_ref::<AssessmentNotFound>().is_some());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let record = record_at("Acme", Utc::now());
        let stored = serde_json::json!({
            "version": 2,
            "assessment": serde_json::to_value(&record).unwrap(),
        });
        fs::write(record_path(dir.path(), &record.id), stored.to_string()).unwrap();

        let err = load_assessment(dir.path(), &record.id).unwrap_err();
        assert!(err.to_string().contains("Unsupported assessment store version"));
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        for (i, name) in ["Oldest", "Middle", "Newest"].iter().enumerate() {
            let record = record_at(name, now - Duration::hours(3 - i as i64));
            save_assessment(dir.path(), &record).unwrap();
        }

        let summaries = list_assessments(dir.path(), 2, None, None).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.company_name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle"]);
    }

    #[test]
    fn test_list_since_filters_old_records() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        save_assessment(dir.path(), &record_at("Old", now - Duration::days(30))).unwrap();
        save_assessment(dir.path(), &record_at("Recent", now - Duration::hours(1))).unwrap();

        let summaries =
            list_assessments(dir.path(), DEFAULT_LIST_LIMIT, Some(now - Duration::days(7)), None).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].company_name, "Recent");
    }

    #[test]
    fn test_list_skips_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        save_assessment(dir.path(), &record_at("Good", Utc::now())).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let summaries = list_assessments(dir.path(), DEFAULT_LIST_LIMIT, None, None).unwrap();
        assert_eq!(summaries.len(), 1);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(list_assessments(&missing, DEFAULT_LIST_LIMIT, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_list_filters_by_tier_at_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        for (company, score) in [("Low", 59), ("MediumLow", 60), ("MediumHigh", 79), ("High", 80)] {
            save_assessment(dir.path(), &record_scoring(company, score)).unwrap();
        }

        let names = |tier| {
            let mut names: Vec<String> = list_assessments(dir.path(), DEFAULT_LIST_LIMIT, None, Some(tier))
                .unwrap()
                .into_iter()
                .map(|s| s.company_name)
                .collect();
            names.sort();
            names
        };
        assert_eq!(names(LeadTier::High), vec!["High"]);
        assert_eq!(names(LeadTier::Medium), vec!["MediumHigh", "MediumLow"]);
        assert_eq!(names(LeadTier::Low), vec!["Low"]);
    }

    #[test]
    fn test_load_assessments_returns_full_records() {
        let dir = tempfile::tempdir().unwrap();
        let record = record_scoring("Acme", 85);
        save_assessment(dir.path(), &record).unwrap();
        save_assessment(dir.path(), &record_scoring("Other", 20)).unwrap();

        let records = load_assessments(dir.path(), None, Some(LeadTier::High)).unwrap();
        assert_eq!(records, vec![record]);
    }
}

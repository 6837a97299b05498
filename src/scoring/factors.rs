//! Point tables for every scored answer.
//!
//! Each lookup returns the 0-100 normalized value of an answer (or raw points
//! for certifications and standards). Unanswered and unrecognized answers are
//! worth 0.

use crate::questionnaire::*;

pub fn company_size(answer: Option<&CompanySize>) -> f64 {
    match answer {
        Some(CompanySize::Startup) => 40.0,
        Some(CompanySize::Small) => 60.0,
        Some(CompanySize::Medium) => 80.0,
        Some(CompanySize::Large) => 100.0,
        Some(CompanySize::Unrecognized(_)) | None => 0.0,
    }
}

/// Four points per year, saturating at 100. Negative years count as none.
pub fn experience(years: Option<i64>) -> f64 {
    let years = years.unwrap_or(0).max(0);
    (years.saturating_mul(4)).min(100) as f64
}

pub fn headquarters(answer: Option<&Headquarters>) -> f64 {
    match answer {
        Some(Headquarters::Latam) => 100.0,
        Some(Headquarters::Usa) => 80.0,
        Some(Headquarters::Europe) => 70.0,
        Some(Headquarters::Asia) => 50.0,
        Some(Headquarters::Other) => 40.0,
        Some(Headquarters::Unrecognized(_)) | None => 0.0,
    }
}

pub fn latam_experience(answer: Option<&LatamExperience>) -> f64 {
    match answer {
        Some(LatamExperience::None) => 30.0,
        Some(LatamExperience::Some) => 70.0,
        Some(LatamExperience::Extensive) => 100.0,
        Some(LatamExperience::Unrecognized(_)) | None => 0.0,
    }
}

pub fn device_class(answer: Option<&DeviceClass>) -> f64 {
    match answer {
        Some(DeviceClass::ClassI) => 80.0,
        Some(DeviceClass::ClassII) => 60.0,
        Some(DeviceClass::ClassIII) => 40.0,
        Some(DeviceClass::ClassIV) => 20.0,
        Some(DeviceClass::Unrecognized(_)) | None => 0.0,
    }
}

pub fn health_data(answer: Option<&HealthData>) -> f64 {
    match answer {
        Some(HealthData::No) => 100.0,
        Some(HealthData::Anonymized) => 70.0,
        Some(HealthData::Identified) => 40.0,
        Some(HealthData::Unrecognized(_)) | None => 0.0,
    }
}

/// Raw points per certification, before the regulatory cap
pub fn certification(cert: &Certification) -> f64 {
    match cert {
        Certification::Fda | Certification::Ce => 20.0,
        Certification::Iso13485 | Certification::Iso27001 => 15.0,
        Certification::Hipaa | Certification::Gdpr | Certification::Gmp => 10.0,
        Certification::Unrecognized(_) => 0.0,
    }
}

pub fn free_sale_certificate(answer: Option<&FreeSaleCertificate>) -> f64 {
    match answer {
        Some(FreeSaleCertificate::Yes) => 100.0,
        Some(FreeSaleCertificate::InProcess) => 60.0,
        Some(FreeSaleCertificate::No) => 20.0,
        Some(FreeSaleCertificate::NotApplicable) => 50.0,
        Some(FreeSaleCertificate::Unrecognized(_)) | None => 0.0,
    }
}

pub fn spanish_documentation(answer: Option<&SpanishDocumentation>) -> f64 {
    match answer {
        Some(SpanishDocumentation::Full) => 100.0,
        Some(SpanishDocumentation::Partial) => 60.0,
        Some(SpanishDocumentation::No) => 20.0,
        Some(SpanishDocumentation::Unrecognized(_)) | None => 0.0,
    }
}

pub fn vigilance(answer: Option<&Vigilance>) -> f64 {
    match answer {
        Some(Vigilance::Full) => 100.0,
        Some(Vigilance::Basic) => 60.0,
        Some(Vigilance::No) => 20.0,
        Some(Vigilance::NotApplicable) => 50.0,
        Some(Vigilance::Unrecognized(_)) | None => 0.0,
    }
}

/// Raw points per interoperability standard, before the technical cap
pub fn interop_standard(standard: &InteropStandard) -> f64 {
    match standard {
        InteropStandard::Hl7Fhir => 25.0,
        InteropStandard::Hl7V2
        | InteropStandard::Dicom
        | InteropStandard::Icd10
        | InteropStandard::Snomed
        | InteropStandard::Api => 10.0,
        InteropStandard::Loinc => 5.0,
        InteropStandard::Unrecognized(_) => 0.0,
    }
}

pub fn data_residency(answer: Option<&DataResidency>) -> f64 {
    match answer {
        Some(DataResidency::Latam) => 100.0,
        Some(DataResidency::Flexible) => 90.0,
        Some(DataResidency::Usa) | Some(DataResidency::Europe) => 50.0,
        Some(DataResidency::Unrecognized(_)) | None => 0.0,
    }
}

pub fn support(answer: Option<&SupportCoverage>) -> f64 {
    match answer {
        Some(SupportCoverage::AroundTheClock) => 100.0,
        Some(SupportCoverage::BusinessHours) => 70.0,
        Some(SupportCoverage::Limited) => 40.0,
        Some(SupportCoverage::No) => 10.0,
        Some(SupportCoverage::Unrecognized(_)) | None => 0.0,
    }
}

pub fn budget(answer: Option<&Budget>) -> f64 {
    match answer {
        Some(Budget::Low) => 30.0,
        Some(Budget::Medium) => 60.0,
        Some(Budget::High) => 85.0,
        Some(Budget::Enterprise) => 100.0,
        Some(Budget::Unrecognized(_)) | None => 0.0,
    }
}

pub fn local_entity(answer: Option<&LocalEntity>) -> f64 {
    match answer {
        Some(LocalEntity::Yes) => 100.0,
        Some(LocalEntity::Willing) => 70.0,
        Some(LocalEntity::Distributor) => 50.0,
        Some(LocalEntity::No) => 20.0,
        Some(LocalEntity::Unrecognized(_)) | None => 0.0,
    }
}

/// Ten flat points per targeted segment, at most 25
pub fn segments(count: usize) -> f64 {
    (count.saturating_mul(10)).min(25) as f64
}

pub fn procurement(answer: Option<&Procurement>) -> f64 {
    match answer {
        Some(Procurement::Extensive) => 100.0,
        Some(Procurement::Some) => 60.0,
        Some(Procurement::No) => 30.0,
        Some(Procurement::Unrecognized(_)) | None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanswered_is_zero() {
        assert_eq!(company_size(None), 0.0);
        assert_eq!(budget(None), 0.0);
        assert_eq!(experience(None), 0.0);
    }

    #[test]
    fn test_unrecognized_is_zero() {
        assert_eq!(headquarters(Some(&Headquarters::from("mars"))), 0.0);
        assert_eq!(certification(&Certification::from("iso9001")), 0.0);
        assert_eq!(support(Some(&SupportCoverage::from("24/7"))), 0.0);
    }

    #[test]
    fn test_experience_saturates() {
        assert_eq!(experience(Some(5)), 20.0);
        assert_eq!(experience(Some(25)), 100.0);
        assert_eq!(experience(Some(-4)), 0.0);
        assert_eq!(experience(Some(i64::MAX)), 100.0);
    }

    #[test]
    fn test_segments_cap_at_25() {
        assert_eq!(segments(0), 0.0);
        assert_eq!(segments(2), 20.0);
        assert_eq!(segments(3), 25.0);
    }

    #[test]
    fn test_na_answers_score_midrange() {
        assert_eq!(free_sale_certificate(Some(&FreeSaleCertificate::NotApplicable)), 50.0);
        assert_eq!(vigilance(Some(&Vigilance::NotApplicable)), 50.0);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares the option set for one questionnaire question.
///
/// Every option maps to its wire tag. A tag outside the set is kept verbatim
/// in `Unrecognized` so the raw answer survives a save/load cycle; it scores 0.
macro_rules! answer_options {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            /// Wire tags of the recognized options, in questionnaire order
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $tag,)+
                    $name::Unrecognized(raw) => raw,
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($tag => $name::$variant,)+
                    _ => $name::Unrecognized(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(answer: $name) -> String {
                match answer {
                    $name::Unrecognized(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_options! {
    /// Headcount band
    CompanySize {
        Startup => "startup",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

answer_options! {
    Headquarters {
        Latam => "latam",
        Usa => "usa",
        Europe => "europe",
        Asia => "asia",
        Other => "other",
    }
}

answer_options! {
    /// Prior operating experience in Latin America
    LatamExperience {
        None => "none",
        Some => "some",
        Extensive => "extensive",
    }
}

answer_options! {
    ProductType {
        Software => "software",
        Telemedicine => "telemedicine",
        Ehr => "ehr",
        Ai => "ai",
        Devices => "devices",
        Pharma => "pharma",
        Wearables => "wearables",
        Consulting => "consulting",
    }
}

answer_options! {
    /// Medical device risk class (I lowest, IV highest)
    DeviceClass {
        ClassI => "1",
        ClassII => "2",
        ClassIII => "3",
        ClassIV => "4",
    }
}

answer_options! {
    /// Whether the product handles patient health data
    HealthData {
        No => "no",
        Anonymized => "anonymized",
        Identified => "identified",
    }
}

answer_options! {
    Certification {
        Fda => "fda",
        Ce => "ce",
        Iso13485 => "iso13485",
        Iso27001 => "iso27001",
        Hipaa => "hipaa",
        Gdpr => "gdpr",
        Gmp => "gmp",
    }
}

answer_options! {
    /// Certificate of Free Sale from the country of origin
    FreeSaleCertificate {
        Yes => "yes",
        InProcess => "process",
        No => "no",
        NotApplicable => "na",
    }
}

answer_options! {
    /// Availability of technical documentation in Spanish
    SpanishDocumentation {
        Full => "full",
        Partial => "partial",
        No => "no",
    }
}

answer_options! {
    /// Post-market vigilance system
    Vigilance {
        Full => "full",
        Basic => "basic",
        No => "no",
        NotApplicable => "na",
    }
}

answer_options! {
    InteropStandard {
        Hl7Fhir => "hl7fhir",
        Hl7V2 => "hl7v2",
        Dicom => "dicom",
        Icd10 => "icd10",
        Snomed => "snomed",
        Loinc => "loinc",
        Api => "api",
    }
}

answer_options! {
    DataResidency {
        Latam => "latam",
        Flexible => "flexible",
        Usa => "usa",
        Europe => "europe",
    }
}

answer_options! {
    SupportCoverage {
        AroundTheClock => "24-7",
        BusinessHours => "business",
        Limited => "limited",
        No => "no",
    }
}

answer_options! {
    /// Budget set aside for market entry
    Budget {
        Low => "low",
        Medium => "medium",
        High => "high",
        Enterprise => "enterprise",
    }
}

answer_options! {
    /// Willingness to operate a local legal entity
    LocalEntity {
        Yes => "yes",
        Willing => "willing",
        Distributor => "distributor",
        No => "no",
    }
}

answer_options! {
    Segment {
        Public => "public",
        PrivateHospitals => "private_hospitals",
        Insurers => "insurers",
        B2c => "b2c",
    }
}

answer_options! {
    /// Experience with public procurement
    Procurement {
        Extensive => "extensive",
        Some => "some",
        No => "no",
    }
}

answer_options! {
    /// Intended entry timeline (informational, not scored)
    Timeline {
        Immediate => "immediate",
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
}

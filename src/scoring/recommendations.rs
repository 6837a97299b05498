use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::DimensionScores;

/// Scores below this flag a dimension as a gap
const GAP_THRESHOLD: u8 = 50;
/// Scores at or above this flag a dimension as a strength
const STRENGTH_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An actionable next step produced from the dimension scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
}

struct Template {
    priority: Priority,
    icon: &'static str,
    title: &'static str,
    description: &'static str,
    action_items: &'static [&'static str],
}

impl Template {
    fn build(&self) -> Recommendation {
        Recommendation {
            priority: self.priority,
            icon: self.icon.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            action_items: self.action_items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const STRENGTHEN_REGULATORY: Template = Template {
    priority: Priority::High,
    icon: "📋",
    title: "Strengthen regulatory readiness",
    description: "Prioritize international certifications (FDA, CE, ISO 13485) and translate your \
                  technical documentation into Spanish. Consider engaging a local regulatory consultancy.",
    action_items: &[
        "Obtain a Certificate of Free Sale from the country of origin",
        "Translate technical documentation into Spanish (certified translation)",
        "Implement a pharmacovigilance/technovigilance system",
        "Contact a regulatory consultancy in the target market",
    ],
};

const IMPROVE_TECHNICAL: Template = Template {
    priority: Priority::High,
    icon: "⚙️",
    title: "Improve technical capabilities",
    description: "Implement interoperability standards such as HL7 FHIR. Evaluate hosting data \
                  infrastructure in the region.",
    action_items: &[
        "Implement an HL7 FHIR R4 API",
        "Evaluate AWS São Paulo or Azure Mexico for data residency",
        "Provide technical support in Spanish",
        "Adopt ICD-10, SNOMED CT and LOINC coding",
    ],
};

const DEVELOP_COMMERCIAL: Template = Template {
    priority: Priority::Medium,
    icon: "💼",
    title: "Develop a commercial strategy",
    description: "Consider partnering with established local distributors. Register on public \
                  procurement portals.",
    action_items: &[
        "Identify local distributors or representatives",
        "Register on CompraNet (MX), SECOP (CO), SICOP (CR)",
        "Set up a local legal entity or a representation agreement",
        "Develop a pricing model for the local market",
    ],
};

const STRENGTHEN_PRESENCE: Template = Template {
    priority: Priority::Medium,
    icon: "🏢",
    title: "Strengthen regional presence",
    description: "Consider a regional office or local hires. Prior LATAM experience is highly valued.",
    action_items: &[
        "Hire local commercial and technical staff",
        "Open a regional office (Panama as a hub)",
        "Build success stories in the region",
        "Attend industry events (FIME, Expo Med)",
    ],
};

const REGULATORY_ADVANTAGE: Template = Template {
    priority: Priority::Low,
    icon: "✅",
    title: "Regulatory advantage",
    description: "Your regulatory preparation is solid. Use FDA/CE equivalence to access simplified \
                  registration pathways.",
    action_items: &[
        "Request simplified registration where available",
        "Document equivalences to speed up approvals",
        "Consider a simultaneous multi-country launch",
    ],
};

const TECHNICAL_STRENGTH: Template = Template {
    priority: Priority::Low,
    icon: "✅",
    title: "Technical strength",
    description: "Your technical infrastructure is well positioned. The interoperability standards \
                  you support are an increasing requirement across the region.",
    action_items: &[
        "Highlight HL7 FHIR compliance in proposals",
        "Offer integration with existing systems as a differentiator",
        "Position for government interoperability initiatives",
    ],
};

/// Generate recommendations from dimension scores.
///
/// Each rule fires independently; output follows rule order, not priority.
/// Scores from 50 to 69 produce nothing for their dimension.
pub fn compute_recommendations(scores: &DimensionScores) -> Vec<Recommendation> {
    let rules: [(bool, &Template); 6] = [
        (scores.regulatory < GAP_THRESHOLD, &STRENGTHEN_REGULATORY),
        (scores.technical < GAP_THRESHOLD, &IMPROVE_TECHNICAL),
        (scores.commercial < GAP_THRESHOLD, &DEVELOP_COMMERCIAL),
        (scores.company < GAP_THRESHOLD, &STRENGTHEN_PRESENCE),
        (scores.regulatory >= STRENGTH_THRESHOLD, &REGULATORY_ADVANTAGE),
        (scores.technical >= STRENGTH_THRESHOLD, &TECHNICAL_STRENGTH),
    ];

    rules
        .iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, template)| template.build())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: u8) -> DimensionScores {
        DimensionScores {
            company: score,
            product: score,
            regulatory: score,
            technical: score,
            commercial: score,
        }
    }

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_all_gaps_fire_in_rule_order() {
        let recs = compute_recommendations(&uniform(20));
        assert_eq!(
            titles(&recs),
            vec![
                "Strengthen regulatory readiness",
                "Improve technical capabilities",
                "Develop a commercial strategy",
                "Strengthen regional presence",
            ]
        );
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[2].priority, Priority::Medium);
        assert!(recs.iter().all(|r| r.action_items.len() == 4));
    }

    #[test]
    fn test_strengths_only_at_top() {
        let recs = compute_recommendations(&uniform(95));
        assert_eq!(titles(&recs), vec!["Regulatory advantage", "Technical strength"]);
        assert!(recs.iter().all(|r| r.priority == Priority::Low));
        assert!(recs.iter().all(|r| r.action_items.len() == 3));
    }

    #[test]
    fn test_dead_zone_produces_nothing() {
        assert!(compute_recommendations(&uniform(50)).is_empty());
        assert!(compute_recommendations(&uniform(69)).is_empty());
    }

    #[test]
    fn test_thresholds_are_exact() {
        let mut scores = uniform(60);
        scores.regulatory = 70;
        assert_eq!(titles(&compute_recommendations(&scores)), vec!["Regulatory advantage"]);

        scores.regulatory = 49;
        assert_eq!(
            titles(&compute_recommendations(&scores)),
            vec!["Strengthen regulatory readiness"]
        );
    }

    #[test]
    fn test_dropping_below_gap_only_adds() {
        let mut scores = uniform(51);
        scores.technical = 80;
        let before = compute_recommendations(&scores);

        scores.commercial = 49;
        let after = compute_recommendations(&scores);

        assert_eq!(after.len(), before.len() + 1);
        for rec in &before {
            assert!(after.contains(rec));
        }
        assert!(titles(&after).contains(&"Develop a commercial strategy"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let recs = compute_recommendations(&uniform(20));
        let json = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(json["priority"], "high");
        assert!(json["actionItems"].is_array());
    }
}

use latam_readiness::markets::MARKETS;
use latam_readiness::questionnaire::*;
use latam_readiness::scoring::{
    compute_dimension_scores, compute_market_fit, compute_recommendations, compute_total_score,
    COMPOSITE_WEIGHTS,
};
use proptest::prelude::*;
use std::fmt::Debug;

/// A recognized tag, an unknown one, or no answer
fn arb_choice<T>(tags: &'static [&'static str]) -> impl Strategy<Value = Option<T>>
where
    T: From<String> + Debug + Clone + 'static,
{
    proptest::option::of(prop_oneof![
        4 => proptest::sample::select(tags).prop_map(str::to_string),
        1 => "[a-z]{1,6}",
    ])
    .prop_map(|raw| raw.map(T::from))
}

fn arb_tags(tags: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            8 => proptest::sample::select(tags).prop_map(str::to_string),
            1 => Just("none".to_string()),
            1 => "[a-z]{1,6}",
        ],
        0..6,
    )
}

fn arb_markets() -> impl Strategy<Value = Vec<String>> {
    let keys: Vec<&'static str> = MARKETS.iter().map(|m| m.key).collect();
    proptest::sample::subsequence(keys, 0..=3)
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

fn arb_response() -> impl Strategy<Value = QuestionnaireResponse> {
    let company = (
        arb_choice::<CompanySize>(CompanySize::TAGS),
        proptest::option::of(-5i64..60),
        arb_choice::<Headquarters>(Headquarters::TAGS),
        arb_choice::<LatamExperience>(LatamExperience::TAGS),
    );
    let product = (
        arb_tags(ProductType::TAGS),
        arb_choice::<DeviceClass>(DeviceClass::TAGS),
        arb_choice::<HealthData>(HealthData::TAGS),
    );
    let regulatory = (
        arb_tags(Certification::TAGS),
        arb_choice::<FreeSaleCertificate>(FreeSaleCertificate::TAGS),
        arb_choice::<SpanishDocumentation>(SpanishDocumentation::TAGS),
        arb_choice::<Vigilance>(Vigilance::TAGS),
    );
    let technical = (
        arb_tags(InteropStandard::TAGS),
        arb_choice::<DataResidency>(DataResidency::TAGS),
        arb_choice::<SupportCoverage>(SupportCoverage::TAGS),
    );
    let commercial = (
        arb_choice::<Budget>(Budget::TAGS),
        arb_choice::<LocalEntity>(LocalEntity::TAGS),
        arb_tags(Segment::TAGS),
        arb_choice::<Procurement>(Procurement::TAGS),
        arb_markets(),
    );

    (company, product, regulatory, technical, commercial).prop_map(
        |(
            (company_size, experience, headquarters, latam_exp),
            (products, device_class, health_data),
            (certs, clv, spanish, vigilance),
            (standards, data_residency, support),
            (budget, entity, segments, procurement, selected_markets),
        )| QuestionnaireResponse {
            company_size,
            experience,
            headquarters,
            latam_exp,
            product_types: products
                .into_iter()
                .filter(|t| t != NONE_SENTINEL)
                .map(ProductType::from)
                .collect(),
            device_class,
            health_data,
            certifications: Selection::from_tags(certs),
            clv,
            spanish,
            vigilance,
            standards: Selection::from_tags(standards),
            data_residency,
            support,
            budget,
            entity,
            segments: segments
                .into_iter()
                .filter(|t| t != NONE_SENTINEL)
                .map(Segment::from)
                .collect(),
            procurement,
            selected_markets,
            ..Default::default()
        },
    )
}

#[test]
fn composite_weights_sum_to_one() {
    assert!((COMPOSITE_WEIGHTS.sum() - 1.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn scores_stay_in_range(response in arb_response()) {
        let scores = compute_dimension_scores(&response);
        for (_, score) in scores.iter() {
            prop_assert!(score <= 100);
        }
        prop_assert!(compute_total_score(&scores) <= 100);
    }

    #[test]
    fn scoring_is_deterministic(response in arb_response()) {
        let first = compute_dimension_scores(&response);
        let second = compute_dimension_scores(&response.clone());
        prop_assert_eq!(first, second);
        prop_assert_eq!(compute_total_score(&first), compute_total_score(&second));
    }

    #[test]
    fn total_lies_between_dimension_extremes(response in arb_response()) {
        let scores = compute_dimension_scores(&response);
        let total = compute_total_score(&scores);
        let min = scores.iter().map(|(_, s)| s).min().unwrap_or(0);
        let max = scores.iter().map(|(_, s)| s).max().unwrap_or(0);
        prop_assert!(total >= min && total <= max);
    }

    #[test]
    fn market_fit_ranks_whole_catalog(response in arb_response()) {
        let scores = compute_dimension_scores(&response);
        let total = compute_total_score(&scores);
        let fits = compute_market_fit(&scores, total, &response.selected_markets);

        prop_assert_eq!(fits.len(), MARKETS.len());
        for pair in fits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for fit in &fits {
            prop_assert_eq!(fit.selected, response.selected_markets.contains(&fit.key));
            prop_assert!(fit.score <= 100);
            prop_assert!((i32::from(fit.score) - i32::from(total)).abs() <= 15);
        }
    }

    #[test]
    fn recommendations_are_bounded_and_distinct(response in arb_response()) {
        let scores = compute_dimension_scores(&response);
        let recs = compute_recommendations(&scores);
        prop_assert!(recs.len() <= 6);
        for (i, rec) in recs.iter().enumerate() {
            prop_assert!(!recs[i + 1..].iter().any(|other| other.title == rec.title));
        }
    }

    #[test]
    fn adding_a_certification_never_lowers_regulatory(
        response in arb_response(),
        extra in proptest::sample::select(Certification::TAGS),
    ) {
        // an empty selection earns a flat baseline instead of per-certificate points
        prop_assume!(!response.certifications.chosen().is_empty());
        let before = compute_dimension_scores(&response).regulatory;

        let mut tags: Vec<String> = response
            .certifications
            .chosen()
            .iter()
            .map(|c| c.to_string())
            .collect();
        tags.push(extra.to_string());
        let improved = QuestionnaireResponse {
            certifications: Selection::from_tags(tags),
            ..response
        };

        prop_assert!(compute_dimension_scores(&improved).regulatory >= before);
    }
}

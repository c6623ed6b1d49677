use emission_forecast::narrative::{group_thousands, percentage_change};
use emission_forecast::{ImpactTier, NarrativeClassifier, TimePoint};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(-42.0, ImpactTier::Decline)]
#[case(-3.0, ImpactTier::Decline)]
#[case(0.0, ImpactTier::Decline)]
#[case(0.01, ImpactTier::SlightIncrease)]
#[case(5.0, ImpactTier::SlightIncrease)]
#[case(9.99, ImpactTier::SlightIncrease)]
#[case(10.0, ImpactTier::NoticeableIncrease)]
#[case(24.99, ImpactTier::NoticeableIncrease)]
#[case(25.0, ImpactTier::SharpIncrease)]
#[case(380.0, ImpactTier::SharpIncrease)]
#[case(f64::INFINITY, ImpactTier::SharpIncrease)]
fn test_tier_boundaries(#[case] pct: f64, #[case] expected: ImpactTier) {
    assert_eq!(NarrativeClassifier::new().classify(pct), expected);
}

#[test]
fn test_percentage_change() {
    assert_eq!(percentage_change(100.0, 110.0), 10.0);
    assert_eq!(percentage_change(100.0, 95.0), -5.0);
    assert_eq!(percentage_change(0.0, 0.0), 0.0);
    assert_eq!(percentage_change(0.0, 12.0), f64::INFINITY);
}

#[test]
fn test_noticeable_increase_narrative() {
    let narrative = NarrativeClassifier::new().describe(2050, 1_234_567.6, TimePoint::new(2019, 1_000_000.0));

    assert_eq!(narrative.tier, ImpactTier::NoticeableIncrease);
    assert!(narrative
        .impact
        .starts_with("Noticeable increase (~23.5%) \u{2014} significant climate risk."));
    assert_eq!(narrative.actions.len(), 4);
    assert!(narrative.summary.starts_with(
        "Forecast in 2050: 1,234,568 kt CO\u{2082} (baseline 2019: 1,000,000 kt CO\u{2082}, change: +23.5%)."
    ));
    assert!(narrative.summary.contains("Likely impacts:\nNoticeable increase"));
    assert!(narrative
        .summary
        .contains("Practical actions:\n- Implement strong national carbon pricing or emission caps.\n"));
    assert!(narrative.summary.ends_with("(usually for the better)."));
}

#[test]
fn test_decline_narrative_has_no_plus_sign() {
    let narrative = NarrativeClassifier::new().describe(2030, 95.0, TimePoint::new(2019, 100.0));

    assert_eq!(narrative.tier, ImpactTier::Decline);
    assert!(narrative.summary.contains("change: -5.0%"));
    assert!(narrative.impact.starts_with("Emissions projected to decline"));
}

#[test]
fn test_sharp_increase_lists_five_actions() {
    let narrative = NarrativeClassifier::new().describe(2100, 200.0, TimePoint::new(2019, 100.0));

    assert_eq!(narrative.tier, ImpactTier::SharpIncrease);
    assert_eq!(narrative.actions.len(), 5);
    assert!(narrative.impact.contains("~100.0%"));
}

#[test]
fn test_zero_baseline_narrative() {
    let classifier = NarrativeClassifier::new();

    let flat = classifier.describe(2030, 0.0, TimePoint::new(2019, 0.0));
    assert_eq!(flat.tier, ImpactTier::Decline);

    assert!(flat.summary.contains("change: 0.0%"));

    let rising = classifier.describe(2030, 5.0, TimePoint::new(2019, 0.0));
    assert_eq!(rising.tier, ImpactTier::SharpIncrease);
    assert!(rising.summary.contains("change: n/a)"));
    assert!(!rising.impact.contains("inf"));
    assert!(rising.impact.starts_with("Sharp increase (from a zero baseline) \u{2014} very high climate risk."));
}

#[test]
fn test_canned_text_keeps_product_wording() {
    let classifier = NarrativeClassifier::new();

    let decline = classifier.describe(2030, 90.0, TimePoint::new(2019, 100.0));
    assert!(decline
        .impact
        .starts_with("Emissions projected to decline \u{2014} positive climate progress."));

    let slight = classifier.describe(2030, 105.0, TimePoint::new(2019, 100.0));
    assert!(slight.impact.starts_with("Slight increase (~5.0%) \u{2014} moderate warming pressure."));

    let sharp = classifier.describe(2030, 150.0, TimePoint::new(2019, 100.0));
    assert_eq!(
        sharp.actions[0],
        "Urgent transition to 80\u{2013}100% renewable power by mid-century."
    );
}

#[rstest]
#[case(0.0, "0")]
#[case(999.4, "999")]
#[case(1000.0, "1,000")]
#[case(33_871_180.0, "33,871,180")]
#[case(1_234_567.5, "1,234,568")]
#[case(-2_500.0, "-2,500")]
fn test_group_thousands(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(group_thousands(value), expected);
}

//! Impact tiers and canned narrative for a forecast change

use crate::data::TimePoint;
use serde::Serialize;

/// Qualitative size of the projected change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactTier {
    /// Change of zero or less
    Decline,
    /// Above 0% and below 10%
    SlightIncrease,
    /// From 10% up to 25%
    NoticeableIncrease,
    /// 25% and above
    SharpIncrease,
}

/// One row of the tier table
struct TierRule {
    tier: ImpactTier,
    applies: fn(f64) -> bool,
    /// `(~{pct}%)` is replaced by the change with one decimal
    impact: &'static str,
    actions: &'static [&'static str],
}

/// Evaluated top to bottom; the first matching rule wins
static TIER_TABLE: [TierRule; 4] = [
    TierRule {
        tier: ImpactTier::Decline,
        applies: |pct| pct <= 0.0,
        impact: "Emissions projected to decline — positive climate progress. \
                 Improved air quality and reduced pressure on climate systems. \
                 Long-term warming rate may slow if decline continues.",
        actions: &[
            "Maintain and reinforce existing clean-energy policies.",
            "Expand EV adoption, clean mobility and public transportation.",
            "Increase investments in renewable storage and grid efficiency.",
            "Monitor for rebound effects to ensure decline remains stable.",
        ],
    },
    TierRule {
        tier: ImpactTier::SlightIncrease,
        applies: |pct| pct > 0.0 && pct < 10.0,
        impact: "Slight increase (~{pct}%) — moderate warming pressure. \
                 Possible rise in regional heatwaves and occasional climate extremes. \
                 Energy and transport sectors remain the main contributors.",
        actions: &[
            "Intensify renewable deployment (solar, wind, hydro).",
            "Strengthen building-efficiency codes and clean-industrial policies.",
            "Promote low-emission transport (EVs, mass transit).",
            "Increase incentives for carbon-efficient technologies.",
        ],
    },
    TierRule {
        tier: ImpactTier::NoticeableIncrease,
        applies: |pct| (10.0..25.0).contains(&pct),
        impact: "Noticeable increase (~{pct}%) — significant climate risk. \
                 Higher probability of droughts, floods, and crop stresses. \
                 Urban heat island effects and sea-level threats accelerate.",
        actions: &[
            "Implement strong national carbon pricing or emission caps.",
            "Accelerate coal phase-out and scale green hydrogen production.",
            "Expand climate-resilient agriculture and water-management systems.",
            "Upgrade coastal defenses and extreme-weather preparedness.",
        ],
    },
    TierRule {
        tier: ImpactTier::SharpIncrease,
        applies: |pct| pct >= 25.0,
        impact: "Sharp increase (~{pct}%) — very high climate risk. \
                 Severe outcomes likely: sea-level rise, ecosystem collapse, extreme events. \
                 Vulnerable populations face heightened long-term climate threats.",
        actions: &[
            "Urgent transition to 80–100% renewable power by mid-century.",
            "Immediate halt to new coal/oil projects; rapid fossil phase-down.",
            "Large-scale carbon removal (DAC, reforestation, BECCS).",
            "Global-level climate cooperation and emergency mitigation.",
            "National adaptation mega-projects (flood barriers, heat-proofing, water security).",
        ],
    },
];

const CLOSING_NOTE: &str = "Note: forecasts assume current policies continue. \
    Aggressive mitigation or breakthrough tech can materially change outcomes (usually for the better).";

fn rule_for(percentage_change: f64) -> &'static TierRule {
    TIER_TABLE
        .iter()
        .find(|rule| (rule.applies)(percentage_change))
        // only NaN gets here
        .unwrap_or(&TIER_TABLE[TIER_TABLE.len() - 1])
}

/// Relative change in percent.
///
/// A zero baseline gives `0.0` when the prediction is also zero and positive
/// infinity otherwise.
pub fn percentage_change(baseline: f64, prediction: f64) -> f64 {
    if baseline == 0.0 {
        return if prediction == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (prediction - baseline) / baseline * 100.0
}

/// Prose attached to a forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    /// Impact tier the change falls in
    pub tier: ImpactTier,
    /// Impact description with the change interpolated
    pub impact: String,
    /// Recommended actions, most urgent first
    pub actions: Vec<String>,
    /// Full human readable summary
    pub summary: String,
}

/// Maps a relative change onto the fixed tier table
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeClassifier;

impl NarrativeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Tier for a percentage change
    pub fn classify(&self, percentage_change: f64) -> ImpactTier {
        rule_for(percentage_change).tier
    }

    /// Build the narrative for a forecast of `prediction` in `target_year`
    pub fn describe(&self, target_year: i32, prediction: f64, baseline: TimePoint) -> Narrative {
        let pct = percentage_change(baseline.value, prediction);
        let rule = rule_for(pct);

        let impact = if pct.is_finite() {
            rule.impact.replace("{pct}", &format!("{:.1}", pct))
        } else {
            rule.impact.replace("(~{pct}%)", "(from a zero baseline)")
        };
        let actions: Vec<String> = rule.actions.iter().map(|a| a.to_string()).collect();

        let action_lines = actions
            .iter()
            .map(|a| format!("- {}", a))
            .collect::<Vec<_>>()
            .join("\n");

        let summary = format!(
            "Forecast in {}: {} kt CO\u{2082} (baseline {}: {} kt CO\u{2082}, change: {}).\n\n\
             Likely impacts:\n{}\n\n\
             Practical actions:\n{}\n\n\
             {}",
            target_year,
            group_thousands(prediction),
            baseline.year,
            group_thousands(baseline.value),
            format_change(pct),
            impact,
            action_lines,
            CLOSING_NOTE,
        );

        Narrative {
            tier: rule.tier,
            impact,
            actions,
            summary,
        }
    }
}

/// Signed percentage with one decimal; `n/a` when there is no finite change
fn format_change(pct: f64) -> String {
    if !pct.is_finite() {
        "n/a".to_string()
    } else if pct > 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Round to a whole number and insert thousands separators
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

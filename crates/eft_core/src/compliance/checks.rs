//! # Manifest Compliance Checks
//!
//! Compares one match's statistics against the MANIFEST behavioral targets.
//!
//! | Metric | Source statistic | pass | warn | fail |
//! |--------|------------------|------|------|------|
//! | C-002 Short Possession | avg span | ≤3s | ≤5s | >5s |
//! | C-002 Max Possession | max span | ≤20s | >20s | - |
//! | P-020 Interaction Freq | tackles/min | ≥5 | ≥2 | <2 |
//! | C-001 Continuous Contest | avg interaction gap | ≤6s | ≤10s | >10s |
//! | C-001 Longest Gap | max interaction gap | - | >15s | - |
//! | C-003 Role Fluidity | top carrier share | <30% | <50% | ≥50% |
//!
//! Scoring rate and possession changes are informational only.

use serde::Serialize;

use crate::analysis::MatchStats;
use crate::config::ComplianceThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    Info,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Info => "INFO",
        }
    }
}

/// Which manifest target a check measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    ShortPossession,
    MaxPossession,
    InteractionFrequency,
    ContinuousContest,
    LongestGap,
    RoleFluidity,
    ScoringRate,
    PossessionChanges,
}

impl MetricId {
    /// Manifest code, if the metric has one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            MetricId::ShortPossession => Some("C-002"),
            MetricId::InteractionFrequency => Some("P-020"),
            MetricId::ContinuousContest => Some("C-001"),
            MetricId::RoleFluidity => Some("C-003"),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricId::ShortPossession => "Short Possession",
            MetricId::MaxPossession => "Max possession",
            MetricId::InteractionFrequency => "Interaction Freq",
            MetricId::ContinuousContest => "Continuous Contest",
            MetricId::LongestGap => "Longest gap without action",
            MetricId::RoleFluidity => "Role Fluidity",
            MetricId::ScoringRate => "Scoring rate",
            MetricId::PossessionChanges => "Possession changes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceCheck {
    pub metric: MetricId,
    pub status: CheckStatus,
    pub message: String,
}

impl ComplianceCheck {
    pub fn new(metric: MetricId, status: CheckStatus, message: impl Into<String>) -> Self {
        Self { metric, status, message: message.into() }
    }
}

/// Average hold time band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionBand {
    NoData,
    Short,
    SlightlyHigh,
    TooHigh,
}

impl PossessionBand {
    pub fn status(&self) -> CheckStatus {
        match self {
            PossessionBand::Short => CheckStatus::Pass,
            PossessionBand::NoData | PossessionBand::SlightlyHigh => CheckStatus::Warn,
            PossessionBand::TooHigh => CheckStatus::Fail,
        }
    }
}

pub fn classify_possession(
    avg_s: f64,
    span_count: usize,
    th: &ComplianceThresholds,
) -> PossessionBand {
    if span_count == 0 {
        PossessionBand::NoData
    } else if avg_s <= th.possession_avg_pass_s {
        PossessionBand::Short
    } else if avg_s <= th.possession_avg_warn_s {
        PossessionBand::SlightlyHigh
    } else {
        PossessionBand::TooHigh
    }
}

/// Tackles-per-minute band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TackleRateBand {
    VeryHigh,
    Good,
    Moderate,
    Low,
}

impl TackleRateBand {
    pub fn status(&self) -> CheckStatus {
        match self {
            TackleRateBand::VeryHigh | TackleRateBand::Good => CheckStatus::Pass,
            TackleRateBand::Moderate => CheckStatus::Warn,
            TackleRateBand::Low => CheckStatus::Fail,
        }
    }
}

pub fn classify_tackle_rate(per_min: f64, th: &ComplianceThresholds) -> TackleRateBand {
    if per_min >= th.tackles_high_per_min {
        TackleRateBand::VeryHigh
    } else if per_min >= th.tackles_pass_per_min {
        TackleRateBand::Good
    } else if per_min >= th.tackles_warn_per_min {
        TackleRateBand::Moderate
    } else {
        TackleRateBand::Low
    }
}

/// Average interaction gap band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestBand {
    Excellent,
    Good,
    SomeDeadTime,
    TooSlow,
}

impl ContestBand {
    pub fn status(&self) -> CheckStatus {
        match self {
            ContestBand::Excellent | ContestBand::Good => CheckStatus::Pass,
            ContestBand::SomeDeadTime => CheckStatus::Warn,
            ContestBand::TooSlow => CheckStatus::Fail,
        }
    }
}

pub fn classify_contest(avg_gap_s: f64, th: &ComplianceThresholds) -> ContestBand {
    if avg_gap_s <= th.gap_excellent_s {
        ContestBand::Excellent
    } else if avg_gap_s <= th.gap_good_s {
        ContestBand::Good
    } else if avg_gap_s <= th.gap_warn_s {
        ContestBand::SomeDeadTime
    } else {
        ContestBand::TooSlow
    }
}

/// Top carrier share band. Both boundaries are exclusive on the pass side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidityBand {
    Spread,
    Concentrated,
    Dominant,
}

impl FluidityBand {
    pub fn status(&self) -> CheckStatus {
        match self {
            FluidityBand::Spread => CheckStatus::Pass,
            FluidityBand::Concentrated => CheckStatus::Warn,
            FluidityBand::Dominant => CheckStatus::Fail,
        }
    }
}

pub fn classify_fluidity(top_share: f64, th: &ComplianceThresholds) -> FluidityBand {
    if top_share < th.carrier_share_pass {
        FluidityBand::Spread
    } else if top_share < th.carrier_share_warn {
        FluidityBand::Concentrated
    } else {
        FluidityBand::Dominant
    }
}

/// Run every manifest check against one match.
pub fn manifest_checks(stats: &MatchStats, th: &ComplianceThresholds) -> Vec<ComplianceCheck> {
    let mut checks = Vec::new();

    // C-002: Short Possession
    let spans = &stats.possession.spans;
    let band = classify_possession(spans.avg_s, spans.count, th);
    let message = match band {
        PossessionBand::NoData => {
            "no data (no possession_gain -> loss pairs found)".to_string()
        }
        PossessionBand::Short => {
            format!("avg {:.2}s (target <= {}s)", spans.avg_s, th.possession_avg_pass_s)
        }
        PossessionBand::SlightlyHigh => format!("avg {:.2}s (slightly high)", spans.avg_s),
        PossessionBand::TooHigh => format!("avg {:.2}s (TOO HIGH)", spans.avg_s),
    };
    checks.push(ComplianceCheck::new(MetricId::ShortPossession, band.status(), message));

    if spans.count > 0 && spans.max_s > 0.0 {
        let status = if spans.max_s <= th.possession_max_s {
            CheckStatus::Pass
        } else {
            CheckStatus::Warn
        };
        checks.push(ComplianceCheck::new(
            MetricId::MaxPossession,
            status,
            format!("{:.2}s (target <= {}s)", spans.max_s, th.possession_max_s),
        ));
    }

    // P-020: Interaction Frequency
    let tpm = stats.tackles.per_minute;
    let band = classify_tackle_rate(tpm, th);
    let label = match band {
        TackleRateBand::VeryHigh => "very high, healthy chaos",
        TackleRateBand::Good => "good",
        TackleRateBand::Moderate => "moderate",
        TackleRateBand::Low => "LOW",
    };
    checks.push(ComplianceCheck::new(
        MetricId::InteractionFrequency,
        band.status(),
        format!("{:.1} tackles/min ({})", tpm, label),
    ));

    // C-001: Continuous Contest
    let gaps = &stats.interactions.gaps;
    let band = classify_contest(gaps.avg_gap_s, th);
    let label = match band {
        ContestBand::Excellent => "excellent",
        ContestBand::Good => "good",
        ContestBand::SomeDeadTime => "some dead time",
        ContestBand::TooSlow => "TOO SLOW",
    };
    checks.push(ComplianceCheck::new(
        MetricId::ContinuousContest,
        band.status(),
        format!("avg {:.2}s between events ({})", gaps.avg_gap_s, label),
    ));
    if gaps.max_gap_s > th.longest_gap_s {
        checks.push(ComplianceCheck::new(
            MetricId::LongestGap,
            CheckStatus::Warn,
            format!("{:.2}s", gaps.max_gap_s),
        ));
    }

    // C-003: Role Fluidity
    if let Some(share) = stats.carrier_distribution.top_share() {
        let band = classify_fluidity(share, th);
        let suffix = match band {
            FluidityBand::Spread => " (spread is good)",
            FluidityBand::Concentrated => "",
            FluidityBand::Dominant => " (DOMINANT)",
        };
        checks.push(ComplianceCheck::new(
            MetricId::RoleFluidity,
            band.status(),
            format!("top carrier has {:.0}% of pickups{}", share * 100.0, suffix),
        ));
    }

    checks.push(ComplianceCheck::new(
        MetricId::ScoringRate,
        CheckStatus::Info,
        format!(
            "{:.1} goals/min ({} total in {:.1} min)",
            stats.goals_per_min(),
            stats.goals.total,
            stats.active_minutes()
        ),
    ));
    checks.push(ComplianceCheck::new(
        MetricId::PossessionChanges,
        CheckStatus::Info,
        format!("{:.1}/min", stats.possession.gains_per_min),
    ));

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_match;
    use crate::config::AnalyzerConfig;
    use crate::replay::{EventKind, MatchEvent};

    fn find(checks: &[ComplianceCheck], metric: MetricId) -> Option<&ComplianceCheck> {
        checks.iter().find(|c| c.metric == metric)
    }

    #[test]
    fn test_tackle_rate_boundaries() {
        let th = ComplianceThresholds::default();
        assert_eq!(classify_tackle_rate(20.0, &th), TackleRateBand::VeryHigh);
        assert_eq!(classify_tackle_rate(19.999, &th), TackleRateBand::Good);
        assert_eq!(classify_tackle_rate(5.0, &th), TackleRateBand::Good);
        assert_eq!(classify_tackle_rate(4.999, &th), TackleRateBand::Moderate);
        assert_eq!(classify_tackle_rate(2.0, &th), TackleRateBand::Moderate);
        assert_eq!(classify_tackle_rate(1.999, &th), TackleRateBand::Low);
        assert_eq!(TackleRateBand::Good.status(), CheckStatus::Pass);
        assert_eq!(TackleRateBand::Moderate.status(), CheckStatus::Warn);
        assert_eq!(TackleRateBand::Low.status(), CheckStatus::Fail);
    }

    #[test]
    fn test_fluidity_boundaries_exclusive() {
        let th = ComplianceThresholds::default();
        assert_eq!(classify_fluidity(0.29, &th), FluidityBand::Spread);
        assert_eq!(classify_fluidity(3.0 / 10.0, &th), FluidityBand::Concentrated);
        assert_eq!(classify_fluidity(0.49, &th), FluidityBand::Concentrated);
        assert_eq!(classify_fluidity(5.0 / 10.0, &th), FluidityBand::Dominant);
    }

    #[test]
    fn test_possession_and_contest_bands() {
        let th = ComplianceThresholds::default();
        assert_eq!(classify_possession(9.0, 0, &th), PossessionBand::NoData);
        assert_eq!(classify_possession(3.0, 4, &th), PossessionBand::Short);
        assert_eq!(classify_possession(5.0, 4, &th), PossessionBand::SlightlyHigh);
        assert_eq!(classify_possession(5.01, 4, &th), PossessionBand::TooHigh);
        assert_eq!(PossessionBand::NoData.status(), CheckStatus::Warn);

        assert_eq!(classify_contest(3.0, &th), ContestBand::Excellent);
        assert_eq!(classify_contest(6.0, &th), ContestBand::Good);
        assert_eq!(classify_contest(10.0, &th), ContestBand::SomeDeadTime);
        assert_eq!(classify_contest(10.5, &th), ContestBand::TooSlow);
    }

    #[test]
    fn test_four_event_match_checks() {
        let config = AnalyzerConfig::default();
        let events = vec![
            MatchEvent::new(EventKind::PossessionGain, 30.0, &["A"]),
            MatchEvent::new(EventKind::TackleSuccess, 32.0, &["B", "A"]),
            MatchEvent::new(EventKind::PossessionGain, 33.0, &["B"]),
            MatchEvent::new(EventKind::Goal { team: 1 }, 35.0, &["B"]),
        ];
        let stats = analyze_match("m", &events, &config).unwrap();
        let checks = manifest_checks(&stats, &config.thresholds);

        let brevity = find(&checks, MetricId::ShortPossession).unwrap();
        assert_eq!(brevity.status, CheckStatus::Pass);
        assert_eq!(find(&checks, MetricId::MaxPossession).unwrap().status, CheckStatus::Pass);
        // Two carriers with one pickup each
        assert_eq!(find(&checks, MetricId::RoleFluidity).unwrap().status, CheckStatus::Fail);
        assert!(find(&checks, MetricId::LongestGap).is_none());
        assert_eq!(find(&checks, MetricId::ScoringRate).unwrap().status, CheckStatus::Info);
        assert_eq!(find(&checks, MetricId::PossessionChanges).unwrap().status, CheckStatus::Info);
    }

    #[test]
    fn test_no_carriers_skips_fluidity_and_max() {
        let config = AnalyzerConfig::default();
        let events = vec![
            MatchEvent::new(EventKind::Respawn, 0.0, &[]),
            MatchEvent::new(EventKind::TackleSuccess, 40.0, &["a"]),
            MatchEvent::new(EventKind::TackleSuccess, 70.0, &["a"]),
        ];
        let stats = analyze_match("m", &events, &config).unwrap();
        let checks = manifest_checks(&stats, &config.thresholds);

        assert_eq!(
            find(&checks, MetricId::ShortPossession).unwrap().status,
            CheckStatus::Warn
        );
        assert!(find(&checks, MetricId::MaxPossession).is_none());
        assert!(find(&checks, MetricId::RoleFluidity).is_none());
        // One 30s gap between the two post-warmup tackles
        assert_eq!(find(&checks, MetricId::ContinuousContest).unwrap().status, CheckStatus::Fail);
        assert_eq!(find(&checks, MetricId::LongestGap).unwrap().status, CheckStatus::Warn);
    }
}

//! Cross-match totals and the overall verdict.

use serde::Serialize;

use super::checks::{CheckStatus, ComplianceCheck, MetricId};
use crate::analysis::MatchStats;
use crate::config::AnalyzerConfig;

/// Running totals over per-match records.
#[derive(Debug, Clone, Default)]
pub struct SummaryAccumulator {
    matches: usize,
    tackles: usize,
    goals: usize,
    possessions: usize,
    active_s: f64,
    /// Per-match average span duration, matches with spans only
    avg_possessions_s: Vec<f64>,
}

impl SummaryAccumulator {
    pub fn absorb(&mut self, stats: &MatchStats) {
        self.matches += 1;
        self.tackles += stats.tackles.total;
        self.goals += stats.goals.total;
        self.possessions += stats.possession.gains;
        self.active_s += stats.active_play_s;
        if stats.possession.spans.count > 0 {
            self.avg_possessions_s.push(stats.possession.spans.avg_s);
        }
    }

    pub fn finish(self, config: &AnalyzerConfig) -> AggregateSummary {
        let total_minutes = self.active_s / 60.0;
        let rate_minutes = total_minutes.max(config.min_active_minutes);
        let tackles_per_min = self.tackles as f64 / rate_minutes;
        let possessions_per_min = self.possessions as f64 / rate_minutes;

        let mean_avg_possession_s = if self.avg_possessions_s.is_empty() {
            None
        } else {
            Some(self.avg_possessions_s.iter().sum::<f64>() / self.avg_possessions_s.len() as f64)
        };

        AggregateSummary {
            matches: self.matches,
            total_tackles: self.tackles,
            total_goals: self.goals,
            total_possessions: self.possessions,
            total_active_s: self.active_s,
            total_minutes,
            tackles_per_min,
            possessions_per_min,
            goals_per_min: self.goals as f64 / rate_minutes,
            mean_avg_possession_s,
            verdict: verdict(tackles_per_min, possessions_per_min, config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub matches: usize,
    pub total_tackles: usize,
    pub total_goals: usize,
    pub total_possessions: usize,
    pub total_active_s: f64,
    pub total_minutes: f64,
    pub tackles_per_min: f64,
    pub possessions_per_min: f64,
    pub goals_per_min: f64,
    /// Mean of per-match average possession durations
    pub mean_avg_possession_s: Option<f64>,
    pub verdict: Vec<ComplianceCheck>,
}

/// Fold per-match records into a summary.
pub fn summarize<'a, I>(records: I, config: &AnalyzerConfig) -> AggregateSummary
where
    I: IntoIterator<Item = &'a MatchStats>,
{
    records
        .into_iter()
        .fold(SummaryAccumulator::default(), |mut acc, stats| {
            acc.absorb(stats);
            acc
        })
        .finish(config)
}

/// The aggregate tackle verdict has no warn band: below "good" is a failure.
fn verdict(tpm: f64, ppm: f64, config: &AnalyzerConfig) -> Vec<ComplianceCheck> {
    let th = &config.thresholds;

    let tackles = if tpm >= th.tackles_high_per_min {
        ComplianceCheck::new(
            MetricId::InteractionFrequency,
            CheckStatus::Pass,
            format!("High tackle density ({:.0}/min), continuous contest healthy", tpm),
        )
    } else if tpm >= th.tackles_pass_per_min {
        ComplianceCheck::new(
            MetricId::InteractionFrequency,
            CheckStatus::Pass,
            format!("Good tackle density ({:.0}/min)", tpm),
        )
    } else {
        ComplianceCheck::new(
            MetricId::InteractionFrequency,
            CheckStatus::Fail,
            format!("Low tackle density ({:.0}/min), need more contested interactions", tpm),
        )
    };

    let possession = if ppm >= th.possession_changes_pass_per_min {
        ComplianceCheck::new(
            MetricId::PossessionChanges,
            CheckStatus::Pass,
            format!("Ball changes hands frequently ({:.0}/min), short possession healthy", ppm),
        )
    } else if ppm >= th.possession_changes_warn_per_min {
        ComplianceCheck::new(
            MetricId::PossessionChanges,
            CheckStatus::Warn,
            format!("Moderate possession changes ({:.0}/min)", ppm),
        )
    } else {
        ComplianceCheck::new(
            MetricId::PossessionChanges,
            CheckStatus::Fail,
            format!("Ball stays with one player too long ({:.0}/min)", ppm),
        )
    };

    vec![tackles, possession]
}

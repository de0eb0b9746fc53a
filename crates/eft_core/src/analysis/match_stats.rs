//! Per-match statistics record.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::distribution::PlayerTally;
use super::timeline::{
    average_goal_gap, reconstruct_possessions, sorted_interactions, GapStats, SpanStats,
};
use crate::config::AnalyzerConfig;
use crate::replay::{EventKind, MatchEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerCounts {
    pub total: usize,
    pub humans: usize,
    pub bots: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PossessionStats {
    /// Raw `possession_gain` events
    pub gains: usize,
    pub spans: SpanStats,
    pub gains_per_min: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TackleStats {
    pub total: usize,
    /// All tackles over the floored active minutes
    pub per_minute: f64,
    /// Gaps between post-warmup tackles
    pub density: GapStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InteractionStats {
    /// Post-warmup interactions
    pub gaps: GapStats,
    pub per_minute: f64,
}

impl InteractionStats {
    pub fn total(&self) -> usize {
        self.gaps.events
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalStats {
    pub total: usize,
    pub avg_gap_s: f64,
    pub scorers: PlayerTally,
}

/// Everything derived from one replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStats {
    /// Source file name
    pub source: String,
    pub match_duration_s: f64,
    pub active_play_s: f64,
    /// Active minutes floored for use as a rate denominator
    pub rate_minutes: f64,
    pub total_events: usize,
    pub event_counts: BTreeMap<String, usize>,
    pub players: PlayerCounts,
    pub possession: PossessionStats,
    pub tackles: TackleStats,
    pub interactions: InteractionStats,
    pub goals: GoalStats,
    pub carrier_distribution: PlayerTally,
    pub tackle_distribution: PlayerTally,
}

impl MatchStats {
    pub fn active_minutes(&self) -> f64 {
        self.active_play_s / 60.0
    }

    pub fn goals_per_min(&self) -> f64 {
        self.goals.total as f64 / self.rate_minutes
    }
}

/// Active play after removing the warmup, or the whole match when the match
/// is no longer than the warmup.
pub fn active_play_s(match_duration_s: f64, warmup_s: f64) -> f64 {
    let active = match_duration_s - warmup_s;
    if active <= 0.0 {
        match_duration_s
    } else {
        active
    }
}

fn classify_players(events: &[MatchEvent], config: &AnalyzerConfig) -> PlayerCounts {
    let unique: BTreeSet<&str> =
        events.iter().flat_map(|e| e.pids.iter().map(|p| p.as_str())).collect();
    let bots = unique.iter().filter(|id| config.is_bot(id)).count();
    PlayerCounts { total: unique.len(), humans: unique.len() - bots, bots }
}

fn count_kind(events: &[MatchEvent], pred: impl Fn(&EventKind) -> bool) -> usize {
    events.iter().filter(|e| pred(&e.kind)).count()
}

/// Ascending times of interactions matching `pred` at or after `warmup_end`.
fn post_warmup_times(
    events: &[MatchEvent],
    warmup_end: f64,
    pred: impl Fn(&EventKind) -> bool,
) -> Vec<f64> {
    sorted_interactions(events)
        .into_iter()
        .filter(|e| pred(&e.kind) && e.time >= warmup_end)
        .map(|e| e.time)
        .collect()
}

/// Analyze one match. Returns `None` for a match without events.
pub fn analyze_match(
    source: &str,
    events: &[MatchEvent],
    config: &AnalyzerConfig,
) -> Option<MatchStats> {
    if events.is_empty() {
        return None;
    }

    let mut event_counts = BTreeMap::new();
    for e in events {
        *event_counts.entry(e.kind.label().to_string()).or_insert(0) += 1;
    }

    let (start, end) = events.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
        (lo.min(e.time), hi.max(e.time))
    });
    let match_duration_s = end - start;
    let active_play_s = active_play_s(match_duration_s, config.warmup_s);
    let rate_minutes = (active_play_s / 60.0).max(config.min_active_minutes);

    let is_gain = |k: &EventKind| *k == EventKind::PossessionGain;
    let is_tackle = |k: &EventKind| *k == EventKind::TackleSuccess;
    let is_goal = |k: &EventKind| k.is_goal();

    let spans = reconstruct_possessions(events, config);
    let gains = count_kind(events, is_gain);
    let tackles = count_kind(events, is_tackle);

    let warmup_end = start + config.warmup_s;
    let interaction_times = post_warmup_times(events, warmup_end, |_| true);
    let tackle_times = post_warmup_times(events, warmup_end, is_tackle);

    Some(MatchStats {
        source: source.to_string(),
        match_duration_s,
        active_play_s,
        rate_minutes,
        total_events: events.len(),
        event_counts,
        players: classify_players(events, config),
        possession: PossessionStats {
            gains,
            spans: SpanStats::from_spans(&spans),
            gains_per_min: gains as f64 / rate_minutes,
        },
        tackles: TackleStats {
            total: tackles,
            per_minute: tackles as f64 / rate_minutes,
            density: GapStats::from_sorted_times(&tackle_times),
        },
        interactions: InteractionStats {
            per_minute: interaction_times.len() as f64 / rate_minutes,
            gaps: GapStats::from_sorted_times(&interaction_times),
        },
        goals: GoalStats {
            total: count_kind(events, is_goal),
            avg_gap_s: average_goal_gap(events),
            scorers: PlayerTally::every_pid(events, is_goal),
        },
        carrier_distribution: PlayerTally::every_pid(events, is_gain),
        tackle_distribution: PlayerTally::every_pid(events, is_tackle),
    })
}

//! # Possession Timeline
//!
//! Rebuilds possession spans and interaction gaps from a match's event list.
//!
//! ## Algorithm
//! 1. Keep `possession_gain`, `tackle_success` and `goal` events
//! 2. Stable-sort by time (ties keep input order)
//! 3. A pickup closes any open possession and opens a new one
//! 4. A tackle or goal closes the open possession and leaves none open
//! 5. Closed spans outside the validity window are dropped
//!
//! Possession is tracked for the whole match, not per player: a span means
//! "someone held the ball".

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::replay::{EventKind, MatchEvent};

/// A reconstructed interval of ball control, `[start_s, end_s)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PossessionSpan {
    pub start_s: f64,
    pub end_s: f64,
}

impl PossessionSpan {
    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }
}

/// Interaction events of `events`, stable-sorted by time.
pub fn sorted_interactions(events: &[MatchEvent]) -> Vec<&MatchEvent> {
    let mut interactions: Vec<&MatchEvent> =
        events.iter().filter(|e| e.kind.is_interaction()).collect();
    interactions.sort_by(|a, b| a.time.total_cmp(&b.time));
    interactions
}

/// Internal cursor over the sorted interaction stream.
struct PossessionCursor<'a> {
    config: &'a AnalyzerConfig,
    open_since: Option<f64>,
    spans: Vec<PossessionSpan>,
}

impl<'a> PossessionCursor<'a> {
    fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config, open_since: None, spans: Vec::new() }
    }

    /// Close the open possession at `t`, keeping it only if plausible.
    fn close(&mut self, t: f64) {
        if let Some(start_s) = self.open_since.take() {
            let span = PossessionSpan { start_s, end_s: t };
            if self.config.span_in_window(span.duration_s()) {
                self.spans.push(span);
            }
        }
    }

    fn feed(&mut self, event: &MatchEvent) {
        match event.kind {
            EventKind::PossessionGain => {
                self.close(event.time);
                self.open_since = Some(event.time);
            }
            EventKind::TackleSuccess | EventKind::Goal { .. } => self.close(event.time),
            _ => {}
        }
    }
}

/// Reconstruct valid possession spans, in timeline order.
pub fn reconstruct_possessions(
    events: &[MatchEvent],
    config: &AnalyzerConfig,
) -> Vec<PossessionSpan> {
    let mut cursor = PossessionCursor::new(config);
    for event in sorted_interactions(events) {
        cursor.feed(event);
    }
    cursor.spans
}

/// Summary of valid possession span durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpanStats {
    pub count: usize,
    pub avg_s: f64,
    /// Element `count / 2` of the ascending sort (upper middle for even counts)
    pub median_s: f64,
    pub min_s: f64,
    pub max_s: f64,
}

impl SpanStats {
    pub fn from_spans(spans: &[PossessionSpan]) -> Self {
        let mut durations: Vec<f64> = spans.iter().map(PossessionSpan::duration_s).collect();
        if durations.is_empty() {
            return Self::default();
        }
        durations.sort_by(f64::total_cmp);

        let count = durations.len();
        Self {
            count,
            avg_s: durations.iter().sum::<f64>() / count as f64,
            median_s: durations[count / 2],
            min_s: durations[0],
            max_s: durations[count - 1],
        }
    }
}

/// Gaps between consecutive timestamps in an ascending list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GapStats {
    /// Number of timestamps considered
    pub events: usize,
    /// Number of strictly positive gaps
    pub gaps: usize,
    /// Mean gap; the divisor is floored at 1
    pub avg_gap_s: f64,
    pub max_gap_s: f64,
}

impl GapStats {
    /// Gap statistics over `times`, which must already be ascending.
    ///
    /// Simultaneous events produce no gap.
    pub fn from_sorted_times(times: &[f64]) -> Self {
        let gaps: Vec<f64> = times
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|&g| g > 0.0)
            .collect();

        Self {
            events: times.len(),
            gaps: gaps.len(),
            avg_gap_s: gaps.iter().sum::<f64>() / gaps.len().max(1) as f64,
            max_gap_s: gaps.iter().copied().fold(0.0, f64::max),
        }
    }
}

/// Mean gap between consecutive goals, including simultaneous ones.
///
/// Zero when fewer than two goals were scored.
pub fn average_goal_gap(events: &[MatchEvent]) -> f64 {
    let mut times: Vec<f64> =
        events.iter().filter(|e| e.kind.is_goal()).map(|e| e.time).collect();
    if times.len() < 2 {
        return 0.0;
    }
    times.sort_by(f64::total_cmp);
    let total: f64 = times.windows(2).map(|w| w[1] - w[0]).sum();
    total / (times.len() - 1) as f64
}

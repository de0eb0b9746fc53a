//! Batch audit: analyze every loaded replay and score it.

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{analyze_match, MatchStats};
use crate::compliance::{manifest_checks, summarize, AggregateSummary, ComplianceCheck};
use crate::config::AnalyzerConfig;
use crate::replay::LoadedReplay;

/// One analyzed match with its manifest checks.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub stats: MatchStats,
    pub checks: Vec<ComplianceCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Reports in replay order; matches without events are absent
    pub matches: Vec<MatchReport>,
    pub summary: AggregateSummary,
}

pub fn audit_replays(replays: &[LoadedReplay], config: &AnalyzerConfig) -> AuditReport {
    let matches: Vec<MatchReport> = replays
        .iter()
        .filter_map(|replay| {
            let stats = analyze_match(&replay.name, &replay.doc.events, config);
            if stats.is_none() {
                debug!("No events in {}, left out of the audit", replay.path.display());
            }
            stats
        })
        .map(|stats| {
            let checks = manifest_checks(&stats, &config.thresholds);
            MatchReport { stats, checks }
        })
        .collect();

    let summary = summarize(matches.iter().map(|m| &m.stats), config);
    info!(
        "Audited {} of {} replays ({:.1} active min)",
        matches.len(),
        replays.len(),
        summary.total_minutes
    );

    AuditReport { matches, summary }
}

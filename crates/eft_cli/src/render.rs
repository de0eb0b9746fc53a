//! Console rendering for audit and overview reports.

use std::io::{self, Write};

use eft_core::analysis::{MatchStats, RosterOverview, TEAM_BLUE, TEAM_RED};
use eft_core::{
    AggregateSummary, AnalyzerConfig, AuditReport, CheckStatus, ComplianceCheck, ReplayBatch,
};

const WIDTH: usize = 72;

fn icon(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "✅",
        CheckStatus::Warn => "⚠️ ",
        CheckStatus::Fail => "❌",
        CheckStatus::Info => "ℹ️ ",
    }
}

fn write_check<W: Write>(w: &mut W, check: &ComplianceCheck) -> io::Result<()> {
    let title = match check.metric.code() {
        Some(code) => format!("{} {}", code, check.metric.title()),
        None => check.metric.title().to_string(),
    };
    writeln!(w, "  {} {}: {}", icon(check.status), title, check.message)
}

/// Full audit: header, one section per match, aggregate when >1 match.
pub fn write_audit<W: Write>(
    w: &mut W,
    batch: &ReplayBatch,
    report: &AuditReport,
    config: &AnalyzerConfig,
) -> io::Result<()> {
    writeln!(w, "{}", "=".repeat(WIDTH))?;
    writeln!(w, "  EFT REPLAY ANALYSIS - MANIFEST BEHAVIORAL AUDIT")?;
    writeln!(w, "{}", "=".repeat(WIDTH))?;
    writeln!(w)?;
    writeln!(w, "  Found {} replay files.", batch.files_found())?;
    for skipped in &batch.skipped {
        writeln!(w, "  ⚠️  Skipped {}: {}", skipped.path.display(), skipped.reason)?;
    }

    for m in &report.matches {
        write_match(w, &m.stats, config)?;
        writeln!(w)?;
        writeln!(w, "  MANIFEST COMPLIANCE:")?;
        for check in &m.checks {
            write_check(w, check)?;
        }
    }

    if report.matches.len() > 1 {
        write_summary(w, &report.summary)?;
    }

    writeln!(w)?;
    writeln!(w, "{}", "═".repeat(WIDTH))?;
    writeln!(w, "  Analysis complete.")
}

fn write_match<W: Write>(w: &mut W, r: &MatchStats, config: &AnalyzerConfig) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "─".repeat(WIDTH))?;
    writeln!(w, "  MATCH: {}", r.source)?;
    writeln!(
        w,
        "  Duration: {:.1}s total | {:.1}s active",
        r.match_duration_s, r.active_play_s
    )?;
    writeln!(
        w,
        "  Players: {} human + {} bots = {}",
        r.players.humans, r.players.bots, r.players.total
    )?;
    writeln!(w, "  Total events: {}", r.total_events)?;

    writeln!(w)?;
    writeln!(w, "  Event Breakdown:")?;
    let mut counts: Vec<(&String, &usize)> = r.event_counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1));
    for (kind, &count) in counts {
        let bar = "█".repeat((count / 2).min(40));
        writeln!(w, "    {:20} {:5}  {}", kind, count, bar)?;
    }

    let spans = &r.possession.spans;
    writeln!(w)?;
    writeln!(w, "  Possession (C-002 Short Possession):")?;
    writeln!(w, "    Ball pickups: {}", r.possession.gains)?;
    if spans.count > 0 {
        writeln!(w, "    Avg hold time: {:.2}s (MANIFEST target: ~2s)", spans.avg_s)?;
        writeln!(w, "    Median:        {:.2}s", spans.median_s)?;
        writeln!(w, "    Range:         {:.2}s - {:.2}s", spans.min_s, spans.max_s)?;
    } else {
        writeln!(w, "    (No possession -> loss pairs detected)")?;
    }
    if let Some(gini) = r.carrier_distribution.gini() {
        writeln!(
            w,
            "    Carrier spread: {} carriers, gini {:.2}",
            r.carrier_distribution.len(),
            gini
        )?;
    }

    writeln!(w)?;
    writeln!(w, "  Tackles (P-020 Interaction Frequency):")?;
    writeln!(w, "    Total: {}", r.tackles.total)?;
    writeln!(w, "    Rate:  {:.1}/min", r.tackles.per_minute)?;
    writeln!(w, "    Avg gap between tackles: {:.2}s", r.tackles.density.avg_gap_s)?;

    writeln!(w)?;
    writeln!(w, "  Interaction Density (C-001 Continuous Contest):")?;
    writeln!(w, "    Events/min: {:.1}", r.interactions.per_minute)?;
    writeln!(
        w,
        "    Avg gap: {:.2}s | Max gap: {:.2}s",
        r.interactions.gaps.avg_gap_s, r.interactions.gaps.max_gap_s
    )?;

    writeln!(w)?;
    writeln!(w, "  Goals (P-100 Reversals & Hype):")?;
    writeln!(w, "    Total: {}", r.goals.total)?;
    if r.goals.avg_gap_s > 0.0 {
        writeln!(w, "    Avg time between goals: {:.1}s", r.goals.avg_gap_s)?;
    }
    for (pid, count) in r.goals.scorers.iter() {
        let label = if config.is_bot(pid.as_str()) { "BOT" } else { "HUMAN" };
        writeln!(w, "    {} ({}): {} goal(s)", label, pid.short(6), count)?;
    }
    Ok(())
}

fn write_summary<W: Write>(w: &mut W, s: &AggregateSummary) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "═".repeat(WIDTH))?;
    writeln!(w, "  AGGREGATE SUMMARY")?;
    writeln!(w, "{}", "═".repeat(WIDTH))?;
    writeln!(w)?;
    writeln!(
        w,
        "  Total active play: {:.0}s ({:.1} min)",
        s.total_active_s, s.total_minutes
    )?;
    writeln!(w, "  Total tackles:     {} ({:.1}/min)", s.total_tackles, s.tackles_per_min)?;
    writeln!(
        w,
        "  Total possessions: {} ({:.1}/min)",
        s.total_possessions, s.possessions_per_min
    )?;
    writeln!(w, "  Total goals:       {} ({:.1}/min)", s.total_goals, s.goals_per_min)?;
    if let Some(avg) = s.mean_avg_possession_s {
        writeln!(w, "  Avg possession:    {:.2}s", avg)?;
    }

    writeln!(w)?;
    writeln!(w, "  VERDICT:")?;
    for check in &s.verdict {
        writeln!(w, "  {} {}", icon(check.status), check.message)?;
    }
    Ok(())
}

/// Markdown leaderboard over every loaded replay.
pub fn write_overview<W: Write>(
    w: &mut W,
    overview: &RosterOverview,
    top_n: usize,
) -> io::Result<()> {
    writeln!(w, "# EFT Match Data Analysis")?;
    writeln!(w)?;
    writeln!(w, "**Total Matches Analyzed:** {}", overview.total_matches)?;
    if let Some(avg) = overview.avg_duration_s() {
        writeln!(w, "**Average Match Duration:** {:.2} minutes", avg / 60.0)?;
    }

    writeln!(w)?;
    writeln!(w, "## Goals")?;
    writeln!(w, "- **Total Goals:** {}", overview.total_goals)?;
    writeln!(w, "- **Red Team ({}):** {}", TEAM_RED, overview.team_goals(TEAM_RED))?;
    writeln!(w, "- **Blue Team ({}):** {}", TEAM_BLUE, overview.team_goals(TEAM_BLUE))?;

    writeln!(w)?;
    writeln!(w, "## Top Scorers")?;
    for (pid, count) in overview.top_scorers.leaders(top_n) {
        writeln!(w, "- **{}:** {} goals", overview.display_name(pid), count)?;
    }

    writeln!(w)?;
    writeln!(w, "## Top Tacklers")?;
    for (pid, count) in overview.top_tacklers.leaders(top_n) {
        writeln!(w, "- **{}:** {} tackles", overview.display_name(pid), count)?;
    }

    writeln!(w)?;
    writeln!(w, "## Gameplay Insights")?;
    if let (Some(tpm), Some(gpm)) = (overview.tackles_per_match(), overview.goals_per_match()) {
        writeln!(w, "- **Tackles per Match:** {:.1}", tpm)?;
        writeln!(w, "- **Goals per Match:** {:.1}", gpm)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eft_core::audit_replays;
    use eft_core::replay::{LoadedReplay, ReplayDoc};
    use std::path::PathBuf;

    fn replay(name: &str, json: &str) -> LoadedReplay {
        let doc: ReplayDoc = serde_json::from_str(json).unwrap();
        LoadedReplay { name: name.to_string(), path: PathBuf::from(name), doc }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_batch() -> ReplayBatch {
        ReplayBatch {
            replays: vec![
                replay(
                    "one.json",
                    r#"{"events": [
                        {"type": "possession_gain", "time": 30, "pids": ["A"]},
                        {"type": "tackle_success", "time": 32, "pids": ["B", "A"]},
                        {"type": "possession_gain", "time": 33, "pids": ["B"]},
                        {"type": "goal", "time": 35, "pids": ["90071996842377216"]}
                    ]}"#,
                ),
                replay(
                    "two.json",
                    r#"{"events": [{"type": "respawn", "time": 1}, {"type": "respawn", "time": 91}]}"#,
                ),
            ],
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_audit_output_sections() {
        let config = AnalyzerConfig::default();
        let batch = sample_batch();
        let report = audit_replays(&batch.replays, &config);

        let text = render(|w| write_audit(w, &batch, &report, &config));
        assert!(text.contains("Found 2 replay files."));
        assert!(text.contains("MATCH: one.json"));
        assert!(text.contains("MATCH: two.json"));
        assert!(text.contains("BOT (377216): 1 goal(s)"));
        assert!(text.contains("✅ C-002 Short Possession: avg 2.00s"));
        assert!(text.contains("AGGREGATE SUMMARY"));
        assert!(text.contains("VERDICT:"));
    }

    #[test]
    fn test_single_match_has_no_summary() {
        let config = AnalyzerConfig::default();
        let mut batch = sample_batch();
        batch.replays.truncate(1);
        let report = audit_replays(&batch.replays, &config);

        let text = render(|w| write_audit(w, &batch, &report, &config));
        assert!(!text.contains("AGGREGATE SUMMARY"));
        assert!(text.contains("Analysis complete."));
    }

    #[test]
    fn test_overview_markdown() {
        let batch = ReplayBatch {
            replays: vec![replay(
                "m.json",
                r#"{
                    "duration": 600,
                    "players": [{"id": 5, "name": "Keeper"}],
                    "events": [
                        {"type": "goal", "time": 3, "pids": [5], "data": {"team": 1}},
                        {"type": "tackle_success", "time": 4, "pids": [6, 5]}
                    ]
                }"#,
            )],
            skipped: Vec::new(),
        };
        let overview = RosterOverview::from_docs(batch.replays.iter().map(|r| &r.doc));

        let text = render(|w| write_overview(w, &overview, 5));
        assert!(text.contains("**Total Matches Analyzed:** 1"));
        assert!(text.contains("**Average Match Duration:** 10.00 minutes"));
        assert!(text.contains("- **Red Team (1):** 1"));
        assert!(text.contains("- **Blue Team (2):** 0"));
        assert!(text.contains("- **Keeper:** 1 goals"));
        assert!(text.contains("- **6:** 1 tackles"));
        assert!(text.contains("- **Goals per Match:** 1.0"));
    }
}

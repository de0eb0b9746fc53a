//! # Roster Overview
//!
//! Cross-match leaderboard: goals per team, top scorers and tacklers, and
//! per-match averages.
//!
//! Unlike the timeline analyzer, credit goes only to the acting player (the
//! first id in `pids`), so a tackle credits the knocker and not the victim.

use std::collections::BTreeMap;

use super::distribution::PlayerTally;
use crate::replay::{EventKind, PlayerId, ReplayDoc};

pub const TEAM_RED: u32 = 1;
pub const TEAM_BLUE: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct RosterOverview {
    pub total_matches: usize,
    /// `duration` of each match, missing values as 0
    pub match_durations_s: Vec<f64>,
    pub total_goals: u32,
    pub team_goals: BTreeMap<u32, u32>,
    pub total_tackles: u32,
    pub top_scorers: PlayerTally,
    pub top_tacklers: PlayerTally,
    /// Display names; later matches overwrite earlier ones
    pub player_names: BTreeMap<PlayerId, String>,
}

impl RosterOverview {
    pub fn from_docs<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a ReplayDoc>,
    {
        let mut overview = Self::default();
        for doc in docs {
            overview.absorb(doc);
        }
        overview
    }

    pub fn absorb(&mut self, doc: &ReplayDoc) {
        self.total_matches += 1;
        self.match_durations_s.push(doc.duration.unwrap_or(0.0));

        for (id, name) in doc.named_players() {
            self.player_names.insert(id.clone(), name.to_string());
        }

        for event in &doc.events {
            match event.kind {
                EventKind::Goal { team } => {
                    self.total_goals += 1;
                    *self.team_goals.entry(team).or_insert(0) += 1;
                }
                EventKind::TackleSuccess => self.total_tackles += 1,
                _ => {}
            }
        }
        self.top_scorers.merge(&PlayerTally::actors(&doc.events, EventKind::is_goal));
        self.top_tacklers
            .merge(&PlayerTally::actors(&doc.events, |k| *k == EventKind::TackleSuccess));
    }

    pub fn team_goals(&self, team: u32) -> u32 {
        self.team_goals.get(&team).copied().unwrap_or(0)
    }

    /// Mean `duration` across matches, or `None` when nothing was loaded.
    pub fn avg_duration_s(&self) -> Option<f64> {
        if self.total_matches == 0 {
            return None;
        }
        Some(self.match_durations_s.iter().sum::<f64>() / self.total_matches as f64)
    }

    pub fn tackles_per_match(&self) -> Option<f64> {
        (self.total_matches > 0).then(|| self.total_tackles as f64 / self.total_matches as f64)
    }

    pub fn goals_per_match(&self) -> Option<f64> {
        (self.total_matches > 0).then(|| self.total_goals as f64 / self.total_matches as f64)
    }

    /// Roster name for `id`, falling back to the id itself.
    pub fn display_name<'a>(&'a self, id: &'a PlayerId) -> &'a str {
        self.player_names.get(id).map(String::as_str).unwrap_or(id.as_str())
    }
}

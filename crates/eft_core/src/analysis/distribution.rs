//! # Player Distributions
//!
//! Per-player event counts (carriers, tacklers, scorers) and how unevenly
//! they are spread.
//!
//! Spread is reported as a Gini coefficient over the players who appear in
//! the tally (players with no events are not counted):
//! - 0.0 = every listed player has the same count
//! - toward 1.0 = counts concentrate on a few players
//!
//! A single dominant carrier shows up both as a high top-carrier share and
//! as a high Gini.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::replay::{EventKind, MatchEvent, PlayerId};

/// Occurrence count per player.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlayerTally(BTreeMap<PlayerId, u32>);

impl PlayerTally {
    pub fn record(&mut self, player: &PlayerId) {
        *self.0.entry(player.clone()).or_insert(0) += 1;
    }

    /// Count every id in `pids` of events matching `pred`.
    pub fn every_pid<F>(events: &[MatchEvent], pred: F) -> Self
    where
        F: Fn(&EventKind) -> bool,
    {
        let mut tally = Self::default();
        for event in events.iter().filter(|e| pred(&e.kind)) {
            for pid in &event.pids {
                tally.record(pid);
            }
        }
        tally
    }

    /// Count only the acting (first) id of events matching `pred`.
    pub fn actors<'a, I, F>(events: I, pred: F) -> Self
    where
        I: IntoIterator<Item = &'a MatchEvent>,
        F: Fn(&EventKind) -> bool,
    {
        let mut tally = Self::default();
        for event in events.into_iter().filter(|e| pred(&e.kind)) {
            if let Some(actor) = event.actor() {
                tally.record(actor);
            }
        }
        tally
    }

    pub fn merge(&mut self, other: &PlayerTally) {
        for (player, count) in &other.0 {
            *self.0.entry(player.clone()).or_insert(0) += count;
        }
    }

    pub fn get(&self, player: &PlayerId) -> u32 {
        self.0.get(player).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, u32)> {
        self.0.iter().map(|(p, &c)| (p, c))
    }

    /// Players by count descending, ties by id ascending.
    pub fn leaders(&self, n: usize) -> Vec<(&PlayerId, u32)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Share of the total held by the busiest player, or `None` if empty.
    pub fn top_share(&self) -> Option<f64> {
        let top = self.0.values().copied().max()?;
        Some(top as f64 / self.total().max(1) as f64)
    }

    /// Gini coefficient of the counts, or `None` if empty.
    ///
    /// Mean absolute difference between every pair of players divided by
    /// twice the mean count. Pairs are summed in one pass over the sorted
    /// counts: the k-th smallest count exceeds each of the k before it by
    /// `count * k - (sum of those k)`.
    ///
    /// ```
    /// use eft_core::analysis::PlayerTally;
    /// use eft_core::replay::PlayerId;
    ///
    /// let mut carriers = PlayerTally::default();
    /// carriers.record(&PlayerId::from("a"));
    /// carriers.record(&PlayerId::from("b"));
    /// assert_eq!(carriers.gini(), Some(0.0));
    /// ```
    pub fn gini(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let mut counts: Vec<u64> = self.0.values().map(|&c| u64::from(c)).collect();
        counts.sort_unstable();

        let mut below = 0u64;
        let mut pair_diffs = 0u64;
        for (k, &count) in counts.iter().enumerate() {
            pair_diffs += count * k as u64 - below;
            below += count;
        }

        let n = counts.len() as f64;
        Some(pair_diffs as f64 / (n * below as f64))
    }
}

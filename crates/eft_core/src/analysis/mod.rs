//! # Analysis Module
//!
//! Post-match analysis of replay event logs.
//!
//! ## Submodules
//!
//! - `timeline` - Possession span reconstruction and gap analysis
//! - `distribution` - Per-player counts and inequality
//! - `match_stats` - Per-match statistics record
//! - `overview` - Cross-match roster leaderboard

pub mod distribution;
pub mod match_stats;
pub mod overview;
pub mod timeline;

pub use distribution::PlayerTally;
pub use match_stats::{
    active_play_s, analyze_match, GoalStats, InteractionStats, MatchStats, PlayerCounts,
    PossessionStats, TackleStats,
};
pub use overview::{RosterOverview, TEAM_BLUE, TEAM_RED};
pub use timeline::{reconstruct_possessions, GapStats, PossessionSpan, SpanStats};

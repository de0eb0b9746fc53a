//! # eft_core - Replay Timeline Analysis
//!
//! Reads EFT match replay logs and checks captured play against the
//! MANIFEST behavioral targets.
//!
//! ## Features
//! - Tolerant replay decoding (missing fields default, bad files are skipped)
//! - Possession span reconstruction from pickup / tackle / goal events
//! - Interaction pacing, tackle density and goal timing
//! - Pass / warn / fail manifest checks and a cross-match verdict
//! - Roster leaderboard (scorers, tacklers, team goals)

pub mod analysis;
pub mod audit;
pub mod compliance;
pub mod config;
pub mod error;
pub mod replay;

pub use analysis::{analyze_match, MatchStats, RosterOverview};
pub use audit::{audit_replays, AuditReport, MatchReport};
pub use compliance::{AggregateSummary, CheckStatus, ComplianceCheck, MetricId};
pub use config::{AnalyzerConfig, ComplianceThresholds};
pub use error::{ReplayError, Result};
pub use replay::{load_replay_dir, load_replay_json, LoadedReplay, ReplayBatch, ReplayDoc};

//! Analyzer Configuration
//!
//! Every tunable constant of the timeline analyzer and the manifest checks.
//! Loaded from YAML; keys that are absent keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, Result};

/// Timeline analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory scanned for `*.json` replays (default: "eft_replays")
    pub replay_dir: PathBuf,

    // === Match Timing ===
    /// Warmup excluded from active play, seconds (default: 30.0)
    pub warmup_s: f64,
    /// Floor for active minutes used as a rate denominator (default: 0.1)
    pub min_active_minutes: f64,

    // === Possession Spans ===
    /// Spans must be strictly longer than this (default: 0.0)
    pub span_min_s: f64,
    /// Spans must be strictly shorter than this (default: 60.0)
    pub span_max_s: f64,

    // === Players ===
    /// Identifiers starting with this prefix belong to bots (default: "9007")
    pub bot_id_prefix: String,

    // === Reports ===
    /// Leaders listed per table in the roster overview (default: 5)
    pub overview_top_n: usize,

    pub thresholds: ComplianceThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            replay_dir: PathBuf::from("eft_replays"),
            warmup_s: 30.0,
            min_active_minutes: 0.1,
            span_min_s: 0.0,
            span_max_s: 60.0,
            bot_id_prefix: "9007".to_string(),
            overview_top_n: 5,
            thresholds: ComplianceThresholds::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|source| ReplayError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Whether `player_id` is bot-controlled.
    pub fn is_bot(&self, player_id: &str) -> bool {
        player_id.starts_with(&self.bot_id_prefix)
    }

    /// Whether a possession span of `duration_s` is plausible enough to count.
    pub fn span_in_window(&self, duration_s: f64) -> bool {
        duration_s > self.span_min_s && duration_s < self.span_max_s
    }
}

/// Manifest targets for pass/warn/fail classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComplianceThresholds {
    // === C-002 Short Possession ===
    /// Average hold time that still passes, seconds (default: 3.0)
    pub possession_avg_pass_s: f64,
    /// Average hold time that still warns, seconds (default: 5.0)
    pub possession_avg_warn_s: f64,
    /// Longest hold time before warning, seconds (default: 20.0)
    pub possession_max_s: f64,

    // === P-020 Interaction Frequency ===
    /// Tackles per minute rated "very high" (default: 20.0)
    pub tackles_high_per_min: f64,
    /// Tackles per minute rated "good" (default: 5.0)
    pub tackles_pass_per_min: f64,
    /// Tackles per minute rated "moderate" (default: 2.0)
    pub tackles_warn_per_min: f64,

    // === C-001 Continuous Contest ===
    /// Average interaction gap rated excellent, seconds (default: 3.0)
    pub gap_excellent_s: f64,
    /// Average interaction gap rated good, seconds (default: 6.0)
    pub gap_good_s: f64,
    /// Average interaction gap with some dead time, seconds (default: 10.0)
    pub gap_warn_s: f64,
    /// Longest single gap before warning, seconds (default: 15.0)
    pub longest_gap_s: f64,

    // === C-003 Role Fluidity ===
    /// Top carrier share that passes, exclusive (default: 0.30)
    pub carrier_share_pass: f64,
    /// Top carrier share that warns, exclusive (default: 0.50)
    pub carrier_share_warn: f64,

    // === Aggregate Verdict ===
    /// Possession changes per minute rated healthy (default: 8.0)
    pub possession_changes_pass_per_min: f64,
    /// Possession changes per minute rated moderate (default: 3.0)
    pub possession_changes_warn_per_min: f64,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            possession_avg_pass_s: 3.0,
            possession_avg_warn_s: 5.0,
            possession_max_s: 20.0,

            tackles_high_per_min: 20.0,
            tackles_pass_per_min: 5.0,
            tackles_warn_per_min: 2.0,

            gap_excellent_s: 3.0,
            gap_good_s: 6.0,
            gap_warn_s: 10.0,
            longest_gap_s: 15.0,

            carrier_share_pass: 0.30,
            carrier_share_warn: 0.50,

            possession_changes_pass_per_min: 8.0,
            possession_changes_warn_per_min: 3.0,
        }
    }
}

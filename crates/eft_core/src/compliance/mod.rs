//! # Compliance Module
//!
//! - `checks` - Per-match manifest checks (C-001, C-002, C-003, P-020)
//! - `aggregate` - Cross-match totals and the overall verdict

pub mod aggregate;
pub mod checks;

pub use aggregate::{summarize, AggregateSummary, SummaryAccumulator};
pub use checks::{
    classify_contest, classify_fluidity, classify_possession, classify_tackle_rate,
    manifest_checks, CheckStatus, ComplianceCheck, ContestBand, FluidityBand, MetricId,
    PossessionBand, TackleRateBand,
};

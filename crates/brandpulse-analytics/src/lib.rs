//! Mention analytics: spike detection and dashboard aggregation.
//!
//! Everything here is a pure function over an in-memory mention set;
//! fetching and storage belong to the callers.

pub mod dashboard;
pub mod spike;

pub use dashboard::{
    compute_dashboard, Dashboard, DashboardSummary, KeywordCount, SentimentTotals, TrendBucket,
    TrendDirection,
};
pub use spike::{detect_spike, SpikeResult, SPIKE_THRESHOLD_PCT};

//! Window-over-window spike classification.

use serde::{Deserialize, Serialize};

/// Minimum percentage increase between two windows that counts as a spike.
///
/// Shared by the total-mention and negative-mention comparisons; they are
/// the same computation over different inputs.
pub const SPIKE_THRESHOLD_PCT: f64 = 30.0;

/// Outcome of comparing a current count against a previous-window baseline.
///
/// Recomputed on every dashboard read; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeResult {
    pub is_spike: bool,
    pub increase: i64,
    pub percentage: f64,
}

impl SpikeResult {
    fn none() -> Self {
        Self {
            is_spike: false,
            increase: 0,
            percentage: 0.0,
        }
    }
}

/// Compare two counts and classify the change.
///
/// A zero baseline means a spike cannot be computed, so the result is a
/// non-spike with zero increase rather than an error. Decreases are legal
/// (negative increase and percentage) and never flagged; only increases at
/// or above [`SPIKE_THRESHOLD_PCT`] count.
#[must_use]
pub fn detect_spike(current: u64, previous: u64) -> SpikeResult {
    if previous == 0 {
        return SpikeResult::none();
    }

    #[allow(clippy::cast_possible_wrap)]
    let increase = current as i64 - previous as i64;
    #[allow(clippy::cast_precision_loss)]
    let percentage = round2(increase as f64 / previous as f64 * 100.0);

    SpikeResult {
        is_spike: percentage >= SPIKE_THRESHOLD_PCT,
        increase,
        percentage,
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

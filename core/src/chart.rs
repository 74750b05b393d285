//! Chart-ready aggregation of raw API payloads.
//!
//! Everything here is a pure function over the wire models: the views fetch,
//! pass the payload through this module, and render the result. Empty inputs
//! yield neutral defaults instead of panicking.

use crate::models::{Achievement, FoodLog, WeightRecord};

/// Minimum padding, in axis units, around a weight chart domain. Keeps the
/// chart readable when every data point (and the target) coincide.
const PAD_FLOOR: f64 = 2.0;

/// Headroom factor for the weekly bar-chart axis.
const AXIS_HEADROOM: f64 = 1.2;

/// Meal logs are displayed newest first. Stable, so same-timestamp entries
/// keep their fetch order.
pub fn sort_logs_newest_first(logs: &mut [FoodLog]) {
    logs.sort_by(|a, b| b.date_added.cmp(&a.date_added));
}

/// Weight records arrive in unspecified order and must be ascending before
/// charting. Stable, so same-date records keep their fetch order.
pub fn sort_weights_oldest_first(records: &mut [WeightRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Progress toward a daily norm as a rounded percentage. A missing or
/// non-positive target yields 0 rather than dividing by zero; values above
/// 100 are valid and the caller renders them distinctly.
#[must_use]
pub fn percent_of_target(actual: f64, target: f64) -> i64 {
    if target > 0.0 {
        (100.0 * actual / target).round() as i64
    } else {
        0
    }
}

/// The unfilled share of a progress gauge. Never negative.
#[must_use]
pub fn remaining_toward_target(actual: f64, target: f64) -> f64 {
    (target - actual).max(0.0)
}

/// Vertical axis range for a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub lower: f64,
    pub upper: f64,
}

impl AxisDomain {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Normalized position of `value` within the domain, clamped to [0, 1].
    #[must_use]
    pub fn position(&self, value: f64) -> f64 {
        ((value - self.lower) / self.span()).clamp(0.0, 1.0)
    }
}

/// Display domain for the weight chart: covers every record and the target
/// (even when the target sits outside the data range), padded by 20% of the
/// range with a floor of 2 units. `None` only when there is neither a value
/// nor a target to anchor the domain.
#[must_use]
pub fn padded_domain(values: &[f64], target: Option<f64>) -> Option<AxisDomain> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().chain(target.as_ref()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return None;
    }
    let pad = ((max - min) * 0.2).max(PAD_FLOOR);
    Some(AxisDomain {
        lower: min - pad,
        upper: max + pad,
    })
}

/// Axis maximum for the weekly bar chart: the largest value plus 20%
/// headroom, rounded to a whole unit.
#[must_use]
pub fn scaled_axis_max(data_max: f64) -> f64 {
    (data_max * AXIS_HEADROOM).round()
}

/// Splits achievements into (unlocked, locked), preserving the original
/// relative order within each half.
#[must_use]
pub fn partition_by_unlock(achievements: Vec<Achievement>) -> (Vec<Achievement>, Vec<Achievement>) {
    achievements.into_iter().partition(Achievement::is_unlocked)
}

/// Fraction of achievements unlocked, in [0, 1]. An empty list is 0, not NaN.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unlock_progress(achievements: &[Achievement]) -> f64 {
    if achievements.is_empty() {
        return 0.0;
    }
    let unlocked = achievements.iter().filter(|a| a.is_unlocked()).count();
    unlocked as f64 / achievements.len() as f64
}

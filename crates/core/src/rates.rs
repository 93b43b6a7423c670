// crates/core/src/rates.rs
//! Response-rate arithmetic and period-over-period comparison.
//!
//! Per-type and overall comparisons both go through [`compare_tallies`], fed
//! from raw sent/replied counts.

use crate::types::{PeriodComparison, TypeCounts};

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `replied / sent * 100`, unrounded. 0 when nothing was sent.
fn raw_rate(sent: i64, replied: i64) -> f64 {
    if sent > 0 {
        replied as f64 / sent as f64 * 100.0
    } else {
        0.0
    }
}

/// Response rate as a percentage rounded to 2 decimals; 0 when `sent == 0`.
pub fn response_rate(sent: i64, replied: i64) -> f64 {
    round2(raw_rate(sent, replied))
}

/// Sent/replied totals for a period (one type, or all types summed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub sent: i64,
    pub replied: i64,
}

impl Tally {
    pub fn new(sent: i64, replied: i64) -> Self {
        Self { sent, replied }
    }

    /// Sum of all per-type counts.
    pub fn total(counts: impl IntoIterator<Item = TypeCounts>) -> Self {
        counts.into_iter().fold(Self::default(), |acc, c| Self {
            sent: acc.sent + c.sent,
            replied: acc.replied + c.replied,
        })
    }

    pub fn rate(&self) -> f64 {
        response_rate(self.sent, self.replied)
    }
}

impl From<TypeCounts> for Tally {
    fn from(c: TypeCounts) -> Self {
        Self::new(c.sent, c.replied)
    }
}

/// Compare a current tally against its baseline.
///
/// Returns `None` when the baseline had no sends: there is nothing to compare
/// against, which is distinct from a 0% change.
pub fn compare_tallies(current: Tally, previous: Tally) -> Option<PeriodComparison> {
    if previous.sent == 0 {
        return None;
    }

    let current_rate = raw_rate(current.sent, current.replied);
    let previous_rate = raw_rate(previous.sent, previous.replied);

    // A 0% baseline with sends has no finite relative change.
    let (change_percentage, is_improvement) = if previous_rate == 0.0 {
        (None, current_rate > 0.0)
    } else {
        let change = (current_rate - previous_rate) / previous_rate * 100.0;
        (Some(round2(change)), change > 0.0)
    };

    Some(PeriodComparison {
        current_response_rate: round2(current_rate),
        previous_response_rate: round2(previous_rate),
        change_percentage,
        is_improvement,
    })
}

// crates/core/src/daily.rs
//! Per-day grouping and calendar gap-filling.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{DailyStats, DailyTypeCounts, MessageType, MessageTypeStats, TypeCounts};

/// Complete a set of per-type counts: exactly one entry per [`MessageType`],
/// in canonical order, zero-filled when absent.
pub fn complete_counts(rows: impl IntoIterator<Item = TypeCounts>) -> [TypeCounts; 3] {
    let mut out = MessageType::ALL.map(TypeCounts::zero);
    for row in rows {
        if let Some(slot) = out.iter_mut().find(|c| c.message_type == row.message_type) {
            slot.sent += row.sent;
            slot.replied += row.replied;
        }
    }
    out
}

/// Group daily rows by date (ascending). Only dates present in `rows` appear.
pub fn group_by_day(rows: impl IntoIterator<Item = DailyTypeCounts>) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<NaiveDate, Vec<TypeCounts>> = BTreeMap::new();
    for row in rows {
        by_date.entry(row.date).or_default().push(row.counts);
    }

    by_date
        .into_iter()
        .map(|(date, counts)| DailyStats {
            date,
            stats_by_type: complete_counts(counts)
                .into_iter()
                .map(MessageTypeStats::from_counts)
                .collect(),
        })
        .collect()
}

/// Expand daily stats to one entry per calendar day in `[start, end]`.
///
/// Days without activity get all-zero stats; entries outside the range are
/// dropped.
pub fn fill_calendar(start: NaiveDate, end: NaiveDate, days: Vec<DailyStats>) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<NaiveDate, DailyStats> =
        days.into_iter().map(|d| (d.date, d)).collect();

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| by_date.remove(&date).unwrap_or_else(|| DailyStats::empty(date)))
        .collect()
}

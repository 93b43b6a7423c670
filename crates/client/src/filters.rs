// crates/client/src/filters.rs
//! Dashboard filter selection, passed explicitly into every fetch.

use chrono::{Duration, NaiveDate};
use outreach_stats_core::StatsFilters;

/// Days covered by the default range.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Quick-select ranges offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Last7Days,
    Last30Days,
    Last90Days,
}

impl RangePreset {
    pub fn days(self) -> i64 {
        match self {
            RangePreset::Last7Days => 7,
            RangePreset::Last30Days => 30,
            RangePreset::Last90Days => 90,
        }
    }
}

/// A picked date range. An open range (`to == None`) covers `from` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// `days` days back from `today`, ending today.
    pub fn ending(today: NaiveDate, days: i64) -> Self {
        Self {
            from: today - Duration::days(days),
            to: Some(today),
        }
    }

    pub fn end(&self) -> NaiveDate {
        self.to.unwrap_or(self.from)
    }
}

/// The user, date range and project currently selected on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    user_id: String,
    date_range: DateRange,
    project_id: Option<String>,
}

impl FilterContext {
    /// Last 30 days up to `today`, all projects.
    pub fn new(user_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date_range: DateRange::ending(today, DEFAULT_RANGE_DAYS),
            project_id: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn set_date_range(&mut self, from: NaiveDate, to: Option<NaiveDate>) {
        self.date_range = DateRange { from, to };
    }

    pub fn apply_preset(&mut self, preset: RangePreset, today: NaiveDate) {
        self.date_range = DateRange::ending(today, preset.days());
    }

    /// Select a project; `None` or an empty id selects all projects.
    pub fn set_project(&mut self, project_id: Option<String>) {
        self.project_id = project_id.filter(|p| !p.is_empty());
    }

    pub fn filters(&self) -> StatsFilters {
        StatsFilters {
            user_id: self.user_id.clone(),
            start_date: self.date_range.from,
            end_date: self.date_range.end(),
            project_id: self.project_id.clone(),
        }
    }
}

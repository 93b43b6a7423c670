// crates/client/src/views.rs
//! Chart-ready shapes derived from stats responses.

use chrono::NaiveDate;
use outreach_stats_core::{fill_calendar, DailyStats, MessageType, MessageTypeStats, StatsResponse};
use serde::Serialize;

/// Label of the overall card.
pub const OVERALL_LABEL: &str = "Performance globale";

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn find_stat(stats: &[MessageTypeStats], message_type: MessageType) -> Option<&MessageTypeStats> {
    stats.iter().find(|s| s.message_type == message_type)
}

/// Stats for `message_type`, or zeros when the response omits it.
fn stat_for(stats: &[MessageTypeStats], message_type: MessageType) -> (i64, i64, f64) {
    find_stat(stats, message_type)
        .map(|s| (s.total_sent, s.total_replied, s.response_rate))
        .unwrap_or((0, 0, 0.0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub change_percentage: Option<f64>,
    pub is_improvement: bool,
}

/// One dashboard card. `message_type` is `None` for the overall card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub message_type: Option<MessageType>,
    pub response_rate: f64,
    pub total_sent: i64,
    pub total_replied: i64,
    pub trend: Option<Trend>,
}

/// Overall card followed by one card per message type in canonical order.
pub fn section_cards(stats: &StatsResponse) -> Vec<StatCard> {
    let total_replied: i64 = stats.stats_by_type.iter().map(|s| s.total_replied).sum();
    let overall = StatCard {
        label: OVERALL_LABEL,
        message_type: None,
        response_rate: stats.overall_response_rate,
        total_sent: stats.total_messages,
        total_replied,
        trend: stats.comparison.as_ref().map(|c| Trend {
            change_percentage: c.change_percentage,
            is_improvement: c.is_improvement,
        }),
    };

    let per_type = MessageType::ALL.into_iter().map(|message_type| {
        let card = StatCard {
            label: message_type.label(),
            message_type: Some(message_type),
            response_rate: 0.0,
            total_sent: 0,
            total_replied: 0,
            trend: None,
        };
        match find_stat(&stats.stats_by_type, message_type) {
            Some(stat) => StatCard {
                response_rate: stat.response_rate,
                total_sent: stat.total_sent,
                total_replied: stat.total_replied,
                trend: stat.comparison.as_ref().map(|c| Trend {
                    change_percentage: c.change_percentage,
                    is_improvement: c.is_improvement,
                }),
                ..card
            },
            None => card,
        }
    });

    std::iter::once(overall).chain(per_type).collect()
}

/// One pie slice of the message distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub message_type: MessageType,
    pub label: &'static str,
    pub total_sent: i64,
    /// Share of all sent messages, 1 decimal.
    pub percentage: f64,
}

/// Slices for the types that had sends.
pub fn message_distribution(stats: &StatsResponse) -> Vec<DistributionSlice> {
    if stats.total_messages == 0 {
        return Vec::new();
    }
    stats
        .stats_by_type
        .iter()
        .filter(|s| s.total_sent > 0)
        .map(|s| DistributionSlice {
            message_type: s.message_type,
            label: s.message_type.label(),
            total_sent: s.total_sent,
            percentage: round1(s.total_sent as f64 / stats.total_messages as f64 * 100.0),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarMetric {
    ResponseRate,
    VolumeSent,
    VolumeReplied,
}

impl RadarMetric {
    pub fn label(self) -> &'static str {
        match self {
            RadarMetric::ResponseRate => "Taux de réponse",
            RadarMetric::VolumeSent => "Volume envoyé",
            RadarMetric::VolumeReplied => "Volume répondu",
        }
    }
}

/// One radar axis with a 0..=100 value per message type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub metric: RadarMetric,
    pub emails: f64,
    pub linkedin: f64,
    pub inmails: f64,
}

impl RadarPoint {
    fn from_values(metric: RadarMetric, [emails, linkedin, inmails]: [f64; 3]) -> Self {
        Self {
            metric,
            emails,
            linkedin,
            inmails,
        }
    }
}

/// Scale to a percentage of `max`; 0 when `max` is 0.
fn normalize(values: [i64; 3]) -> [f64; 3] {
    let max = values.into_iter().max().unwrap_or(0);
    values.map(|v| if max > 0 { v as f64 / max as f64 * 100.0 } else { 0.0 })
}

/// Response rate, then sent and replied volume normalized to the busiest type.
pub fn performance_radar(stats: &StatsResponse) -> Vec<RadarPoint> {
    let per_type = MessageType::ALL.map(|t| stat_for(&stats.stats_by_type, t));

    vec![
        RadarPoint::from_values(RadarMetric::ResponseRate, per_type.map(|(_, _, rate)| rate)),
        RadarPoint::from_values(
            RadarMetric::VolumeSent,
            normalize(per_type.map(|(sent, _, _)| sent)),
        ),
        RadarPoint::from_values(
            RadarMetric::VolumeReplied,
            normalize(per_type.map(|(_, replied, _)| replied)),
        ),
    ]
}

/// One point of the daily area chart: each type's response rate that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub email_sent: f64,
    pub linkedin_message_sent: f64,
    pub linkedin_inmail_sent: f64,
}

/// One point per calendar day from `start` to `end`, idle days at 0.
pub fn daily_series(start: NaiveDate, end: NaiveDate, days: Vec<DailyStats>) -> Vec<DailyPoint> {
    fill_calendar(start, end, days)
        .into_iter()
        .map(|day| {
            let rate = |t| stat_for(&day.stats_by_type, t).2;
            DailyPoint {
                date: day.date,
                email_sent: rate(MessageType::EmailSent),
                linkedin_message_sent: rate(MessageType::LinkedinMessageSent),
                linkedin_inmail_sent: rate(MessageType::LinkedinInmailSent),
            }
        })
        .collect()
}

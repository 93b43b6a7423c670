// crates/core/src/types.rs
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::error::StatsError;

/// Outbound message types that count towards response-rate statistics.
///
/// The serialized tags match the values stored in `history_entry_types`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema,
)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    EmailSent,
    LinkedinMessageSent,
    LinkedinInmailSent,
}

impl MessageType {
    /// Canonical order used for every per-type array in responses.
    pub const ALL: [MessageType; 3] = [
        MessageType::EmailSent,
        MessageType::LinkedinMessageSent,
        MessageType::LinkedinInmailSent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::EmailSent => "EMAIL_SENT",
            MessageType::LinkedinMessageSent => "LINKEDIN_MESSAGE_SENT",
            MessageType::LinkedinInmailSent => "LINKEDIN_INMAIL_SENT",
        }
    }

    /// Dashboard label for the type.
    pub fn label(self) -> &'static str {
        match self {
            MessageType::EmailSent => "Emails",
            MessageType::LinkedinMessageSent => "Messages LinkedIn",
            MessageType::LinkedinInmailSent => "InMails LinkedIn",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StatsError::UnknownMessageType(s.to_string()))
    }
}

// ============================================================================
// Raw counts returned by a StatsSource
// ============================================================================

/// Sent/replied counts for one message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCounts {
    pub message_type: MessageType,
    pub sent: i64,
    pub replied: i64,
}

impl TypeCounts {
    pub fn zero(message_type: MessageType) -> Self {
        Self {
            message_type,
            sent: 0,
            replied: 0,
        }
    }
}

/// Sent/replied counts for one message type on one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTypeCounts {
    pub date: NaiveDate,
    pub counts: TypeCounts,
}

/// Number of live outbound entries sharing an external thread id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCount {
    pub external_thread_id: String,
    pub message_count: i64,
}

// ============================================================================
// Response shapes
// ============================================================================

/// Comparison of one message type against the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct TypeComparison {
    pub previous_response_rate: f64,
    /// `None` when the previous rate was 0 and no finite change exists.
    pub change_percentage: Option<f64>,
    pub is_improvement: bool,
}

/// Overall comparison of the requested period against the preceding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct PeriodComparison {
    pub current_response_rate: f64,
    pub previous_response_rate: f64,
    pub change_percentage: Option<f64>,
    pub is_improvement: bool,
}

impl From<PeriodComparison> for TypeComparison {
    fn from(c: PeriodComparison) -> Self {
        Self {
            previous_response_rate: c.previous_response_rate,
            change_percentage: c.change_percentage,
            is_improvement: c.is_improvement,
        }
    }
}

/// Statistics for one message type within one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct MessageTypeStats {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[ts(type = "number")]
    pub total_sent: i64,
    #[ts(type = "number")]
    pub total_replied: i64,
    pub response_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub comparison: Option<TypeComparison>,
}

impl MessageTypeStats {
    pub fn from_counts(counts: TypeCounts) -> Self {
        Self {
            message_type: counts.message_type,
            total_sent: counts.sent,
            total_replied: counts.replied,
            response_rate: crate::rates::response_rate(counts.sent, counts.replied),
            comparison: None,
        }
    }

    pub fn counts(&self) -> TypeCounts {
        TypeCounts {
            message_type: self.message_type,
            sent: self.total_sent,
            replied: self.total_replied,
        }
    }
}

/// Inclusive date boundaries echoed back in a stats response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct Period {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Full response of `GET /api/stats/response-rates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct StatsResponse {
    pub period: Period,
    pub stats_by_type: Vec<MessageTypeStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub comparison: Option<PeriodComparison>,
    #[ts(type = "number")]
    pub total_messages: i64,
    pub overall_response_rate: f64,
}

/// Per-type statistics for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct DailyStats {
    pub date: NaiveDate,
    pub stats_by_type: Vec<MessageTypeStats>,
}

impl DailyStats {
    /// A day with no activity: every type present with zero counts.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            stats_by_type: MessageType::ALL
                .into_iter()
                .map(|t| MessageTypeStats::from_counts(TypeCounts::zero(t)))
                .collect(),
        }
    }
}

/// A project, derived from an external thread id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "messageCount")]
    #[ts(type = "number")]
    pub message_count: i64,
}

/// Prefix of synthesized project display names.
pub const PROJECT_NAME_PREFIX: &str = "Projet ";

impl From<ProjectCount> for Project {
    fn from(p: ProjectCount) -> Self {
        let name = format!("{}{}", PROJECT_NAME_PREFIX, last_chars(&p.external_thread_id, 8));
        Self {
            id: p.external_thread_id,
            name,
            message_count: p.message_count,
        }
    }
}

fn last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    s.char_indices()
        .nth(count - n)
        .map(|(idx, _)| &s[idx..])
        .unwrap_or(s)
}

/// Filters shared by every statistics request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../bindings/"))]
pub struct StatsFilters {
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub project_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_round_trips_through_tag() {
        for t in MessageType::ALL {
            assert_eq!(t.as_str().parse::<MessageType>().unwrap(), t);
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert!("EMAIL_RECEIVED".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_project_name_uses_last_eight_chars() {
        let project = Project::from(ProjectCount {
            external_thread_id: "thread-0123456789abcdef".to_string(),
            message_count: 4,
        });
        assert_eq!(project.name, "Projet 89abcdef");
        assert_eq!(project.id, "thread-0123456789abcdef");

        let short = Project::from(ProjectCount {
            external_thread_id: "abc".to_string(),
            message_count: 1,
        });
        assert_eq!(short.name, "Projet abc");
    }

    #[test]
    fn test_project_serializes_message_count_camel_case() {
        let project = Project {
            id: "t1".to_string(),
            name: "Projet t1".to_string(),
            message_count: 3,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["messageCount"], 3);
        assert!(json.get("message_count").is_none());
    }

    #[test]
    fn test_stats_omit_absent_comparison() {
        let stats = MessageTypeStats::from_counts(TypeCounts {
            message_type: MessageType::EmailSent,
            sent: 4,
            replied: 1,
        });
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["type"], "EMAIL_SENT");
        assert_eq!(json["response_rate"], 25.0);
        assert!(json.get("comparison").is_none());
    }

    #[test]
    fn test_empty_day_has_all_types() {
        let day = DailyStats::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let types: Vec<_> = day.stats_by_type.iter().map(|s| s.message_type).collect();
        assert_eq!(types, MessageType::ALL.to_vec());
        assert!(day.stats_by_type.iter().all(|s| s.total_sent == 0));
    }
}

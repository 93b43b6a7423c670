//! StatsService behaviour against an in-memory source.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use outreach_stats_core::{
    DailyTypeCounts, MessageType, PeriodQuery, ProjectCount, StatsError, StatsFilters, StatsResult,
    StatsService, StatsSource, TypeCounts,
};
use pretty_assertions::assert_eq;

/// Source double: returns canned counts keyed by window start (ms) and
/// records every query it receives.
#[derive(Default)]
struct FakeSource {
    counts: HashMap<i64, Vec<TypeCounts>>,
    daily: Vec<DailyTypeCounts>,
    projects: Vec<ProjectCount>,
    fail: bool,
    seen: Mutex<Vec<PeriodQuery>>,
    project_limits: Mutex<Vec<u32>>,
}

impl FakeSource {
    fn with_period(mut self, query: &PeriodQuery, rows: Vec<TypeCounts>) -> Self {
        self.counts.insert(query.window.start_millis(), rows);
        self
    }

    fn seen(&self) -> Vec<PeriodQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsSource for FakeSource {
    async fn type_counts(&self, query: &PeriodQuery) -> StatsResult<Vec<TypeCounts>> {
        self.seen.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(StatsError::data_access(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "database unavailable",
            )));
        }
        Ok(self
            .counts
            .get(&query.window.start_millis())
            .cloned()
            .unwrap_or_default())
    }

    async fn daily_type_counts(&self, query: &PeriodQuery) -> StatsResult<Vec<DailyTypeCounts>> {
        self.seen.lock().unwrap().push(query.clone());
        Ok(self.daily.clone())
    }

    async fn project_counts(&self, _user_id: &str, limit: u32) -> StatsResult<Vec<ProjectCount>> {
        self.project_limits.lock().unwrap().push(limit);
        Ok(self.projects.clone())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn filters() -> StatsFilters {
    StatsFilters {
        user_id: "user-1".to_string(),
        start_date: date(2024, 2, 1),
        end_date: date(2024, 2, 29),
        project_id: None,
    }
}

fn counts(message_type: MessageType, sent: i64, replied: i64) -> TypeCounts {
    TypeCounts {
        message_type,
        sent,
        replied,
    }
}

#[tokio::test]
async fn test_complete_stats_with_comparison() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let previous = current.previous();
    let source = FakeSource::default()
        .with_period(
            &current,
            vec![
                counts(MessageType::EmailSent, 50, 10),
                counts(MessageType::LinkedinMessageSent, 10, 5),
            ],
        )
        .with_period(
            &previous,
            vec![
                counts(MessageType::EmailSent, 40, 4),
                counts(MessageType::LinkedinInmailSent, 5, 1),
            ],
        );
    let service = StatsService::new(source);

    let response = service.complete_stats(&filters(), true).await.unwrap();

    assert_eq!(response.stats_by_type.len(), 3);
    let email = &response.stats_by_type[0];
    assert_eq!(email.message_type, MessageType::EmailSent);
    assert_eq!(email.response_rate, 20.0);
    let email_cmp = email.comparison.as_ref().expect("email has a baseline");
    assert_eq!(email_cmp.previous_response_rate, 10.0);
    assert_eq!(email_cmp.change_percentage, Some(100.0));
    assert!(email_cmp.is_improvement);

    // No LinkedIn messages were sent in the previous period: no baseline.
    let linkedin = &response.stats_by_type[1];
    assert_eq!(linkedin.response_rate, 50.0);
    assert!(linkedin.comparison.is_none());

    // InMails had a baseline but nothing sent now: no trend.
    let inmail = &response.stats_by_type[2];
    assert_eq!(inmail.total_sent, 0);
    assert_eq!(inmail.response_rate, 0.0);
    assert!(inmail.comparison.is_none());

    assert_eq!(response.total_messages, 60);
    assert_eq!(response.overall_response_rate, 25.0);

    let overall = response.comparison.expect("previous period had sends");
    assert_eq!(overall.current_response_rate, 25.0);
    assert_eq!(overall.previous_response_rate, 11.11);
    assert_eq!(overall.change_percentage, Some(125.0));
    assert!(overall.is_improvement);

    let seen = service.source().seen();
    assert_eq!(seen.len(), 2);
    assert!(seen.contains(&previous));
}

#[tokio::test]
async fn test_idle_type_gets_no_trend() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let previous = current.previous();
    let source = FakeSource::default()
        .with_period(&current, vec![counts(MessageType::EmailSent, 10, 2)])
        .with_period(
            &previous,
            vec![
                counts(MessageType::EmailSent, 10, 1),
                counts(MessageType::LinkedinInmailSent, 5, 1),
            ],
        );
    let service = StatsService::new(source);

    let response = service.complete_stats(&filters(), true).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let inmail = &json["stats_by_type"][2];
    assert_eq!(inmail["type"], "LINKEDIN_INMAIL_SENT");
    assert_eq!(inmail["total_sent"], 0);
    assert!(inmail.get("comparison").is_none());
    assert!(json["stats_by_type"][0].get("comparison").is_some());
}

#[tokio::test]
async fn test_without_comparison_skips_previous_period() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let source = FakeSource::default()
        .with_period(&current, vec![counts(MessageType::EmailSent, 3, 1)]);
    let service = StatsService::new(source);

    let response = service.complete_stats(&filters(), false).await.unwrap();

    assert!(response.comparison.is_none());
    assert!(response.stats_by_type.iter().all(|s| s.comparison.is_none()));
    assert_eq!(service.source().seen(), vec![current]);
}

#[tokio::test]
async fn test_empty_previous_period_has_no_comparison() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let source = FakeSource::default()
        .with_period(&current, vec![counts(MessageType::EmailSent, 8, 2)]);
    let service = StatsService::new(source);

    let response = service.complete_stats(&filters(), true).await.unwrap();

    assert!(response.comparison.is_none());
    assert!(response.stats_by_type.iter().all(|s| s.comparison.is_none()));
    assert_eq!(response.total_messages, 8);
    assert_eq!(response.overall_response_rate, 25.0);
}

#[tokio::test]
async fn test_totals_match_per_type_sums() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let source = FakeSource::default().with_period(
        &current,
        vec![
            counts(MessageType::EmailSent, 7, 3),
            counts(MessageType::LinkedinMessageSent, 11, 2),
            counts(MessageType::LinkedinInmailSent, 5, 0),
        ],
    );
    let service = StatsService::new(source);

    let response = service.complete_stats(&filters(), false).await.unwrap();

    let sent: i64 = response.stats_by_type.iter().map(|s| s.total_sent).sum();
    let replied: i64 = response.stats_by_type.iter().map(|s| s.total_replied).sum();
    assert_eq!(sent, response.total_messages);
    assert_eq!(
        response.overall_response_rate,
        (replied as f64 / sent as f64 * 100.0 * 100.0).round() / 100.0
    );
    assert_eq!(response.period.start_date, date(2024, 2, 1));
    assert_eq!(response.period.end_date, date(2024, 2, 29));
}

#[tokio::test]
async fn test_comparison_reuses_supplied_current_stats() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let previous = current.previous();
    let source = FakeSource::default()
        .with_period(&previous, vec![counts(MessageType::EmailSent, 10, 5)]);
    let service = StatsService::new(source);

    let supplied = vec![outreach_stats_core::MessageTypeStats::from_counts(counts(
        MessageType::EmailSent,
        10,
        1,
    ))];
    let cmp = service
        .comparison(&current, Some(&supplied))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cmp.current_response_rate, 10.0);
    assert_eq!(cmp.previous_response_rate, 50.0);
    assert_eq!(cmp.change_percentage, Some(-80.0));
    assert_eq!(service.source().seen(), vec![previous]);
}

#[tokio::test]
async fn test_comparison_without_baseline_is_none() {
    let current = PeriodQuery::from_filters(&filters()).unwrap();
    let source = FakeSource::default()
        .with_period(&current, vec![counts(MessageType::EmailSent, 10, 1)]);
    let service = StatsService::new(source);

    assert_eq!(service.comparison(&current, None).await.unwrap(), None);
    assert_eq!(service.source().seen().len(), 2);
}

#[tokio::test]
async fn test_source_failure_propagates() {
    let service = StatsService::new(FakeSource {
        fail: true,
        ..Default::default()
    });

    let err = service.complete_stats(&filters(), true).await.unwrap_err();
    assert!(matches!(err, StatsError::DataAccess { .. }));
}

#[tokio::test]
async fn test_inverted_range_fails_before_querying() {
    let service = StatsService::new(FakeSource::default());
    let mut f = filters();
    f.start_date = date(2024, 3, 1);

    let err = service.complete_stats(&f, true).await.unwrap_err();
    assert!(matches!(err, StatsError::InvertedRange { .. }));
    assert!(service.source().seen().is_empty());
}

#[tokio::test]
async fn test_daily_stats_zero_fill_types() {
    let source = FakeSource {
        daily: vec![
            DailyTypeCounts {
                date: date(2024, 2, 3),
                counts: counts(MessageType::LinkedinMessageSent, 4, 1),
            },
            DailyTypeCounts {
                date: date(2024, 2, 1),
                counts: counts(MessageType::EmailSent, 2, 2),
            },
        ],
        ..Default::default()
    };
    let service = StatsService::new(source);
    let query = PeriodQuery::from_filters(&filters()).unwrap();

    let days = service.daily_stats(&query).await.unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, date(2024, 2, 1));
    assert_eq!(days[0].stats_by_type[0].response_rate, 100.0);
    assert_eq!(days[1].stats_by_type[1].response_rate, 25.0);
    assert!(days.iter().all(|d| d.stats_by_type.len() == 3));
}

#[tokio::test]
async fn test_available_projects_names_and_limit() {
    let source = FakeSource {
        projects: vec![
            ProjectCount {
                external_thread_id: "thread-aaaa11112222".to_string(),
                message_count: 9,
            },
            ProjectCount {
                external_thread_id: "thread-bbbb33334444".to_string(),
                message_count: 2,
            },
        ],
        ..Default::default()
    };
    let service = StatsService::new(source);

    let projects = service.available_projects("user-1").await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Projet 11112222");
    assert_eq!(projects[0].message_count, 9);
    assert_eq!(*service.source().project_limits.lock().unwrap(), vec![50]);
}

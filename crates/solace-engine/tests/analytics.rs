mod common;

use common::{at, choice, dial_entry, gad7, phq9, take};
use jiff::Zoned;
use jiff::tz::{self, TimeZone};
use solace_core::{Answer, AssessmentType, Question, QuestionKind, RiskBand, RiskLevel};
use solace_engine::{
    AlertLevel, AlertReason, EngineError, Priority, SuggestionKind, Trend, TrendBasis,
    distress_alert, instrument_trends, question_analytics, response_patterns, suggestions,
    summarize, summarize_with,
};

fn utc_clock(s: &str) -> Zoned {
    at(s).to_zoned(TimeZone::UTC)
}

#[test]
fn empty_history_degrades_without_failing() {
    let summary = summarize(&[], &utc_clock("2026-04-15T12:00:00Z"));
    assert_eq!(summary.total_completed, 0);
    assert_eq!(summary.completed_this_month, 0);
    assert_eq!(summary.average_score_percent, None);
    assert!(summary.risk_level_distribution.is_empty());
    assert_eq!(summary.trend, Trend::InsufficientData);
    assert_eq!(summary.last_completed_at, None);
}

#[test]
fn singleton_and_pair_histories_have_insufficient_data() {
    let one = vec![dial_entry("DIAL", 10, 3, "2026-04-01T09:00:00Z")];
    let summary = summarize(&one, &utc_clock("2026-04-15T12:00:00Z"));
    assert_eq!(summary.total_completed, 1);
    assert_eq!(summary.average_score_percent, Some(30));
    assert_eq!(summary.trend, Trend::InsufficientData);

    let mut two = one;
    two.push(dial_entry("DIAL", 10, 9, "2026-04-02T09:00:00Z"));
    assert_eq!(
        summarize(&two, &utc_clock("2026-04-15T12:00:00Z")).trend,
        Trend::InsufficientData
    );
}

#[test]
fn rising_scores_mean_a_declining_trend() {
    // Normalized 0.10, 0.20, 0.40 from oldest to newest.
    let history = vec![
        dial_entry("DIAL", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIAL", 10, 2, "2026-02-10T09:00:00Z"),
        dial_entry("DIAL", 10, 4, "2026-03-10T09:00:00Z"),
    ];
    let summary = summarize(&history, &utc_clock("2026-03-20T12:00:00Z"));
    assert_eq!(summary.trend, Trend::Declining);
    assert_ne!(summary.trend, Trend::Improving);
}

#[test]
fn falling_scores_mean_an_improving_trend() {
    let history = vec![
        dial_entry("DIAL", 10, 8, "2026-01-10T09:00:00Z"),
        dial_entry("DIAL", 10, 6, "2026-02-10T09:00:00Z"),
        dial_entry("DIAL", 10, 2, "2026-03-10T09:00:00Z"),
        dial_entry("DIAL", 10, 1, "2026-03-17T09:00:00Z"),
    ];
    let summary = summarize(&history, &utc_clock("2026-03-20T12:00:00Z"));
    assert_eq!(summary.trend, Trend::Improving);
}

#[test]
fn small_changes_are_stable() {
    let history = vec![
        dial_entry("DIAL", 20, 10, "2026-01-10T09:00:00Z"),
        dial_entry("DIAL", 20, 11, "2026-02-10T09:00:00Z"),
        dial_entry("DIAL", 20, 11, "2026-03-10T09:00:00Z"),
    ];
    assert_eq!(
        summarize(&history, &utc_clock("2026-03-20T12:00:00Z")).trend,
        Trend::Stable
    );
}

#[test]
fn history_order_does_not_matter() {
    let history = vec![
        dial_entry("DIAL", 10, 4, "2026-03-10T09:00:00Z"),
        dial_entry("DIAL", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIAL", 10, 2, "2026-02-10T09:00:00Z"),
    ];
    let summary = summarize(&history, &utc_clock("2026-03-20T12:00:00Z"));
    assert_eq!(summary.trend, Trend::Declining);
    assert_eq!(summary.last_completed_at, Some(at("2026-03-10T09:00:00Z")));
}

#[test]
fn averages_and_distribution() {
    let history = vec![
        dial_entry("DIAL", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIAL", 10, 2, "2026-02-10T09:00:00Z"),
        dial_entry("DIAL", 10, 8, "2026-03-10T09:00:00Z"),
    ];
    let summary = summarize(&history, &utc_clock("2026-03-20T12:00:00Z"));
    // (10 + 20 + 80) / 3 = 36.67
    assert_eq!(summary.average_score_percent, Some(37));
    assert_eq!(summary.risk_level_distribution.get(&RiskLevel::Minimal), Some(&2));
    assert_eq!(summary.risk_level_distribution.get(&RiskLevel::Severe), Some(&1));
    assert_eq!(summary.completed_this_month, 1);
}

#[test]
fn this_month_follows_the_reference_clock_time_zone() {
    let history = vec![
        dial_entry("DIAL", 10, 1, "2026-03-31T23:30:00Z"),
        dial_entry("DIAL", 10, 1, "2026-04-02T09:00:00Z"),
    ];
    let utc = utc_clock("2026-04-10T12:00:00Z");
    assert_eq!(summarize(&history, &utc).completed_this_month, 1);

    let brisbane = at("2026-04-10T12:00:00Z").to_zoned(TimeZone::fixed(tz::offset(10)));
    assert_eq!(summarize(&history, &brisbane).completed_this_month, 2);
}

#[test]
fn normalized_trends_may_span_instruments() {
    let history = vec![
        dial_entry("DIALA", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIALB", 20, 4, "2026-02-10T09:00:00Z"),
        dial_entry("DIALA", 10, 4, "2026-03-10T09:00:00Z"),
    ];
    let clock = utc_clock("2026-03-20T12:00:00Z");
    assert_eq!(summarize(&history, &clock).trend, Trend::Declining);
    assert!(summarize_with(&history, &clock, TrendBasis::NormalizedPercent).is_ok());
}

#[test]
fn raw_score_trends_reject_mixed_instruments() {
    let history = vec![
        dial_entry("DIALA", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIALB", 20, 4, "2026-02-10T09:00:00Z"),
        dial_entry("DIALA", 10, 4, "2026-03-10T09:00:00Z"),
    ];
    let err = summarize_with(&history, &utc_clock("2026-03-20T12:00:00Z"), TrendBasis::RawScore)
        .unwrap_err();
    let EngineError::MixedInstrumentComparison { instruments } = err else {
        panic!("expected MixedInstrumentComparison");
    };
    assert_eq!(instruments, vec!["DIALA".to_string(), "DIALB".to_string()]);
}

#[test]
fn raw_score_trend_within_one_instrument() {
    let history = vec![
        dial_entry("DIAL", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIAL", 10, 2, "2026-02-10T09:00:00Z"),
        dial_entry("DIAL", 10, 4, "2026-03-10T09:00:00Z"),
    ];
    let summary =
        summarize_with(&history, &utc_clock("2026-03-20T12:00:00Z"), TrendBasis::RawScore).unwrap();
    assert_eq!(summary.trend, Trend::Declining);
}

#[test]
fn per_instrument_trends_partition_history() {
    let history = vec![
        dial_entry("DIALA", 10, 1, "2026-01-10T09:00:00Z"),
        dial_entry("DIALA", 10, 2, "2026-02-10T09:00:00Z"),
        dial_entry("DIALA", 10, 5, "2026-03-10T09:00:00Z"),
        dial_entry("DIALB", 20, 18, "2026-01-12T09:00:00Z"),
        dial_entry("DIALB", 20, 10, "2026-02-12T09:00:00Z"),
        dial_entry("DIALB", 20, 4, "2026-03-12T09:00:00Z"),
        dial_entry("DIALC", 10, 4, "2026-03-12T09:00:00Z"),
    ];
    let trends = instrument_trends(&history);
    assert_eq!(trends.get("DIALA"), Some(&Trend::Declining));
    assert_eq!(trends.get("DIALB"), Some(&Trend::Improving));
    assert_eq!(trends.get("DIALC"), Some(&Trend::InsufficientData));
}

#[test]
fn summary_serializes_snake_case() {
    let summary = summarize(&[], &utc_clock("2026-04-15T12:00:00Z"));
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["trend"], "insufficient_data");
    assert!(json["average_score_percent"].is_null());
    assert!(json["last_completed_at"].is_null());
}

#[test]
fn no_alert_without_two_recent_entries() {
    let clock = utc_clock("2026-03-20T12:00:00Z");
    assert_eq!(distress_alert(&[], &clock), None);

    let history = vec![
        dial_entry("DIAL", 30, 29, "2026-01-05T09:00:00Z"),
        dial_entry("DIAL", 30, 28, "2026-03-18T09:00:00Z"),
    ];
    assert_eq!(distress_alert(&history, &clock), None);
}

#[test]
fn consistently_high_totals_raise_a_high_alert() {
    let history = vec![
        dial_entry("DIAL", 30, 16, "2026-03-01T09:00:00Z"),
        dial_entry("DIAL", 30, 18, "2026-03-15T09:00:00Z"),
    ];
    let alert = distress_alert(&history, &utc_clock("2026-03-20T12:00:00Z")).unwrap();
    assert_eq!(alert.level, AlertLevel::High);
    assert_eq!(alert.reason, AlertReason::ConsistentlyHigh { average_score: 17.0 });
    assert_eq!(alert.recent_scores, vec![18, 16]);
}

#[test]
fn a_rapid_rise_raises_a_medium_alert() {
    let history = vec![
        dial_entry("DIAL", 30, 2, "2026-03-01T09:00:00Z"),
        dial_entry("DIAL", 30, 5, "2026-03-08T09:00:00Z"),
        dial_entry("DIAL", 30, 11, "2026-03-15T09:00:00Z"),
    ];
    let alert = distress_alert(&history, &utc_clock("2026-03-20T12:00:00Z")).unwrap();
    assert_eq!(alert.level, AlertLevel::Medium);
    assert_eq!(alert.reason, AlertReason::RapidIncrease { score_change: 9 });
    assert_eq!(alert.recent_scores, vec![11, 5, 2]);
}

#[test]
fn a_rise_of_exactly_the_threshold_does_not_alert() {
    let history = vec![
        dial_entry("DIAL", 30, 2, "2026-03-01T09:00:00Z"),
        dial_entry("DIAL", 30, 5, "2026-03-08T09:00:00Z"),
        dial_entry("DIAL", 30, 10, "2026-03-15T09:00:00Z"),
    ];
    assert_eq!(
        distress_alert(&history, &utc_clock("2026-03-20T12:00:00Z")),
        None
    );
}

#[test]
fn only_the_newest_five_in_the_window_count() {
    // Five low recent totals outweigh older high ones.
    let mut history = vec![
        dial_entry("DIAL", 30, 30, "2026-03-10T08:00:00Z"),
        dial_entry("DIAL", 30, 30, "2026-03-10T08:30:00Z"),
    ];
    for day in 11..16 {
        history.push(dial_entry(
            "DIAL",
            30,
            3,
            &format!("2026-03-{day}T09:00:00Z"),
        ));
    }
    assert_eq!(
        distress_alert(&history, &utc_clock("2026-03-20T12:00:00Z")),
        None
    );
}

#[test]
fn response_patterns_report_durations_and_recent_activity() {
    let empty = response_patterns(&[]);
    assert_eq!(empty.total_completed, 0);
    assert_eq!(empty.average_completion_minutes, None);
    assert!(empty.recent_activity.is_empty());

    let mut history: Vec<_> = (1..=5)
        .map(|day| dial_entry("DIALA", 10, day, &format!("2026-03-0{day}T09:00:00Z")))
        .collect();
    history.push(dial_entry("DIALB", 10, 7, "2026-03-09T09:00:00Z"));

    let patterns = response_patterns(&history);
    assert_eq!(patterns.total_completed, 6);
    // Every session took two minutes.
    assert_eq!(patterns.average_completion_minutes, Some(2.0));
    assert_eq!(patterns.assessment_frequency.get("DIALA"), Some(&5));
    assert_eq!(patterns.assessment_frequency.get("DIALB"), Some(&1));

    let recent: Vec<u32> = patterns.recent_activity.iter().map(|a| a.total_score).collect();
    assert_eq!(recent, vec![7, 5, 4, 3, 2]);
    assert_eq!(patterns.recent_activity[0].assessment, "DIALB");
    assert_eq!(patterns.recent_activity[0].risk_level, RiskLevel::Severe);
}

#[test]
fn question_analytics_count_options_per_question() {
    let phq = phq9();
    let history = vec![
        take(phq.clone(), &vec![Answer::Option { index: 1 }; 9], at("2026-03-01T09:00:00Z")),
        take(phq.clone(), &vec![Answer::Option { index: 3 }; 9], at("2026-03-08T09:00:00Z")),
        take(gad7(), &vec![Answer::Option { index: 0 }; 7], at("2026-03-09T09:00:00Z")),
    ];

    let analytics = question_analytics(&history, &phq);
    assert_eq!(analytics.len(), 9);
    let first = &analytics[0];
    assert_eq!(first.question_id, "phq9_q1");
    assert_eq!(first.total_responses, 2);
    assert_eq!(first.average_score, Some(2.0));
    let counts: Vec<usize> = first.options.iter().map(|o| o.count).collect();
    assert_eq!(counts, vec![0, 1, 0, 1]);
    let percents: Vec<f64> = first.options.iter().map(|o| o.percent).collect();
    assert_eq!(percents, vec![0.0, 50.0, 0.0, 50.0]);
}

#[test]
fn question_analytics_skip_unanswered_and_free_text() {
    let checkin = AssessmentType::new(
        "checkin",
        "CHECKIN",
        "Check-in",
        vec![
            Question::new("mood", "Mood", 1, choice(&[0, 2])),
            Question::new("note", "Notes", 2, QuestionKind::FreeText).optional(),
        ],
        vec![RiskBand::new(RiskLevel::Minimal, 0, 2)],
    )
    .unwrap();
    let history = vec![
        take(
            checkin.clone(),
            &[Answer::Option { index: 1 }, Answer::Text { text: "ok".into() }],
            at("2026-03-01T09:00:00Z"),
        ),
        take(
            checkin.clone(),
            &[Answer::Option { index: 0 }, Answer::Unanswered],
            at("2026-03-02T09:00:00Z"),
        ),
    ];

    let analytics = question_analytics(&history, &checkin);
    assert_eq!(analytics[0].total_responses, 2);
    assert_eq!(analytics[0].average_score, Some(1.0));
    assert_eq!(analytics[1].total_responses, 1);
    assert_eq!(analytics[1].average_score, None);
    assert!(analytics[1].options.is_empty());
}

#[test]
fn an_empty_history_suggests_a_checkup() {
    let suggested = suggestions(&[], &utc_clock("2026-03-20T12:00:00Z"));
    assert_eq!(suggested.len(), 1);
    assert_eq!(suggested[0].kind, SuggestionKind::RegularCheckup);
    assert_eq!(suggested[0].assessment, "PHQ9");
    assert_eq!(suggested[0].reason, "No assessment taken yet");
}

#[test]
fn an_old_elevated_phq9_suggests_all_three() {
    let history = vec![take(
        phq9(),
        &vec![Answer::Option { index: 2 }; 9],
        at("2026-02-28T09:00:00Z"),
    )];
    let suggested = suggestions(&history, &utc_clock("2026-03-20T12:00:00Z"));
    let kinds: Vec<SuggestionKind> = suggested.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SuggestionKind::RegularCheckup,
            SuggestionKind::FollowUp,
            SuggestionKind::AnxietyScreening,
        ]
    );
    assert_eq!(suggested[0].reason, "20 days since last assessment");
    assert_eq!(suggested[1].assessment, "PHQ9");
    assert!(suggested[1].reason.ends_with("score: 18"));
    assert_eq!(suggested[2].priority, Priority::Medium);
    assert_eq!(suggested[2].assessment, "GAD7");
}

#[test]
fn recent_minimal_screens_need_no_suggestions() {
    let history = vec![
        take(phq9(), &vec![Answer::Option { index: 0 }; 9], at("2026-03-10T09:00:00Z")),
        take(gad7(), &vec![Answer::Option { index: 0 }; 7], at("2026-03-17T09:00:00Z")),
    ];
    assert!(suggestions(&history, &utc_clock("2026-03-20T12:00:00Z")).is_empty());

    // Fourteen whole days is not yet overdue.
    let checkup_due = suggestions(&history, &utc_clock("2026-03-31T12:00:00Z"));
    assert!(checkup_due.is_empty());
    let overdue = suggestions(&history, &utc_clock("2026-04-01T12:00:00Z"));
    assert_eq!(overdue[0].kind, SuggestionKind::RegularCheckup);
}

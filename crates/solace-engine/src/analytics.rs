use std::collections::{BTreeMap, BTreeSet};

use jiff::{Timestamp, Zoned};
use serde::{Deserialize, Serialize};
use solace_core::{Answer, AssessmentType, QuestionKind, RiskLevel};
use ts_rs::TS;
use uuid::Uuid;

use crate::completed::CompletedAssessment;
use crate::error::EngineError;
use crate::scoring::raw_value;

/// Fewest completed assessments a trend is computed from.
pub const MIN_TREND_ENTRIES: usize = 3;

/// Normalized change below which two halves of a history count as level.
pub const STABLE_THRESHOLD: f64 = 0.10;

/// Days back from the clock that [`distress_alert`] looks at.
pub const ALERT_WINDOW_DAYS: i64 = 30;

/// Newest assessments inside the alert window that are considered.
pub const ALERT_SAMPLE: usize = 5;

/// Mean raw total above which recent scores count as consistently high.
pub const HIGH_AVERAGE_SCORE: f64 = 15.0;

/// Rise of the newest total over the third newest that counts as rapid.
pub const RAPID_RISE: i64 = 8;

/// Entries listed in [`ResponsePatterns::recent_activity`].
pub const RECENT_ACTIVITY: usize = 5;

/// Days without an assessment before a check-up is suggested.
pub const CHECKUP_AFTER_DAYS: i64 = 14;

pub const MAX_SUGGESTIONS: usize = 3;

const SECONDS_PER_DAY: i64 = 86_400;

/// Direction of a respondent's clinical status.
///
/// Higher scores mean more severe symptoms on every supported instrument,
/// so a rising score is `Declining`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

/// What the trend compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TrendBasis {
    /// `total_score / max_score`; comparable across instruments.
    #[default]
    NormalizedPercent,
    /// Raw totals; only meaningful within a single instrument.
    RawScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressSummary {
    pub total_completed: usize,
    pub completed_this_month: usize,
    /// Mean percentage of maximum, rounded; `None` for an empty history.
    pub average_score_percent: Option<u32>,
    pub risk_level_distribution: BTreeMap<RiskLevel, usize>,
    pub trend: Trend,
    pub last_completed_at: Option<Timestamp>,
}

/// Aggregate a respondent's history. Never fails: empty and short
/// histories degrade to `None` and [`Trend::InsufficientData`].
///
/// `clock` is the caller's reference time; its time zone decides which
/// calendar month counts as "this month".
pub fn summarize(history: &[CompletedAssessment], clock: &Zoned) -> ProgressSummary {
    let newest_first = newest_first(history);
    let trend = trend_from(&newest_first, normalized_half_delta);
    summary(history, clock, trend)
}

/// [`summarize`] with an explicit trend basis. A raw-score trend over
/// more than one instrument fails with
/// [`EngineError::MixedInstrumentComparison`].
pub fn summarize_with(
    history: &[CompletedAssessment],
    clock: &Zoned,
    basis: TrendBasis,
) -> Result<ProgressSummary, EngineError> {
    let direction = trend(history, basis)?;
    Ok(summary(history, clock, direction))
}

/// Trend over the whole history on the given basis.
pub fn trend(history: &[CompletedAssessment], basis: TrendBasis) -> Result<Trend, EngineError> {
    let newest_first = newest_first(history);
    match basis {
        TrendBasis::NormalizedPercent => Ok(trend_from(&newest_first, normalized_half_delta)),
        TrendBasis::RawScore => {
            if newest_first.len() >= MIN_TREND_ENTRIES {
                let instruments: BTreeSet<&str> = newest_first
                    .iter()
                    .map(|e| e.assessment_type().name.as_str())
                    .collect();
                if instruments.len() > 1 {
                    return Err(EngineError::MixedInstrumentComparison {
                        instruments: instruments.into_iter().map(str::to_string).collect(),
                    });
                }
            }
            Ok(trend_from(&newest_first, raw_half_delta))
        }
    }
}

/// Trend per instrument, each computed only from that instrument's entries.
pub fn instrument_trends(history: &[CompletedAssessment]) -> BTreeMap<String, Trend> {
    let mut partitions: BTreeMap<&str, Vec<&CompletedAssessment>> = BTreeMap::new();
    for entry in history {
        partitions
            .entry(entry.assessment_type().name.as_str())
            .or_default()
            .push(entry);
    }

    partitions
        .into_iter()
        .map(|(name, mut entries)| {
            entries.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));
            (name.to_string(), trend_from(&entries, normalized_half_delta))
        })
        .collect()
}

fn summary(history: &[CompletedAssessment], clock: &Zoned, trend: Trend) -> ProgressSummary {
    let tz = clock.time_zone();
    let completed_this_month = history
        .iter()
        .filter(|e| {
            let local = e.completed_at().to_zoned(tz.clone());
            local.year() == clock.year() && local.month() == clock.month()
        })
        .count();

    let average_score_percent = if history.is_empty() {
        None
    } else {
        let sum: f64 = history.iter().map(|e| e.normalized_score() * 100.0).sum();
        Some((sum / history.len() as f64).round() as u32)
    };

    let mut risk_level_distribution = BTreeMap::new();
    for entry in history {
        *risk_level_distribution.entry(entry.risk_level()).or_insert(0) += 1;
    }

    let summary = ProgressSummary {
        total_completed: history.len(),
        completed_this_month,
        average_score_percent,
        risk_level_distribution,
        trend,
        last_completed_at: history.iter().map(|e| e.completed_at()).max(),
    };
    tracing::debug!(
        total = summary.total_completed,
        this_month = summary.completed_this_month,
        trend = ?summary.trend,
        "summarized assessment history"
    );
    summary
}

fn newest_first(history: &[CompletedAssessment]) -> Vec<&CompletedAssessment> {
    let mut sorted: Vec<&CompletedAssessment> = history.iter().collect();
    sorted.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));
    sorted
}

/// Split newest-first entries into the `ceil(n/2)` most recent and the
/// rest, and read the change between the halves through `delta`.
fn trend_from(
    newest_first: &[&CompletedAssessment],
    delta: fn(&[&CompletedAssessment], &[&CompletedAssessment]) -> f64,
) -> Trend {
    if newest_first.len() < MIN_TREND_ENTRIES {
        return Trend::InsufficientData;
    }
    let (recent, older) = newest_first.split_at(newest_first.len().div_ceil(2));
    let delta = delta(recent, older);
    if delta.abs() < STABLE_THRESHOLD {
        Trend::Stable
    } else if delta > 0.0 {
        Trend::Declining
    } else {
        Trend::Improving
    }
}

fn normalized_half_delta(recent: &[&CompletedAssessment], older: &[&CompletedAssessment]) -> f64 {
    mean(recent, |e| e.normalized_score()) - mean(older, |e| e.normalized_score())
}

/// Difference of raw means, scaled by the shared instrument maximum so
/// the same threshold applies.
fn raw_half_delta(recent: &[&CompletedAssessment], older: &[&CompletedAssessment]) -> f64 {
    let max_score = recent
        .first()
        .map_or(0, |e| e.assessment_type().max_score);
    if max_score == 0 {
        return 0.0;
    }
    let raw = |e: &CompletedAssessment| f64::from(e.total_score());
    (mean(recent, raw) - mean(older, raw)) / f64::from(max_score)
}

fn mean(entries: &[&CompletedAssessment], value: impl Fn(&CompletedAssessment) -> f64) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|&e| value(e)).sum::<f64>() / entries.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlertLevel {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum AlertReason {
    /// Mean of the recent totals, one decimal.
    ConsistentlyHigh { average_score: f64 },
    /// Newest total minus the third newest.
    RapidIncrease { score_change: i64 },
}

/// A recent-history pattern that may indicate distress and warrants a
/// wellness check by a guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DistressAlert {
    pub level: AlertLevel,
    pub reason: AlertReason,
    /// Totals the alert is based on, newest first.
    pub recent_scores: Vec<u32>,
}

/// Look for a distress pattern in the newest [`ALERT_SAMPLE`] assessments
/// completed within [`ALERT_WINDOW_DAYS`] of `clock`.
///
/// A mean total above [`HIGH_AVERAGE_SCORE`] is a high alert; otherwise a
/// newest total more than [`RAPID_RISE`] above the third newest is a
/// medium one. Fewer than two entries in the window never alert.
pub fn distress_alert(history: &[CompletedAssessment], clock: &Zoned) -> Option<DistressAlert> {
    let since = clock.timestamp().as_second() - ALERT_WINDOW_DAYS * SECONDS_PER_DAY;
    let recent: Vec<u32> = newest_first(history)
        .into_iter()
        .filter(|e| e.completed_at().as_second() >= since)
        .take(ALERT_SAMPLE)
        .map(|e| e.total_score())
        .collect();
    if recent.len() < 2 {
        return None;
    }

    let average = recent.iter().map(|&s| f64::from(s)).sum::<f64>() / recent.len() as f64;
    let alert = if average > HIGH_AVERAGE_SCORE {
        DistressAlert {
            level: AlertLevel::High,
            reason: AlertReason::ConsistentlyHigh {
                average_score: round_to(average, 1),
            },
            recent_scores: recent,
        }
    } else {
        let [newest, _, third, ..] = recent[..] else {
            return None;
        };
        let score_change = i64::from(newest) - i64::from(third);
        if score_change <= RAPID_RISE {
            return None;
        }
        DistressAlert {
            level: AlertLevel::Medium,
            reason: AlertReason::RapidIncrease { score_change },
            recent_scores: recent[..3].to_vec(),
        }
    };
    tracing::warn!(level = ?alert.level, "distress pattern in assessment history");
    Some(alert)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentActivity {
    pub assessment_id: Uuid,
    pub assessment: String,
    pub display_name: String,
    pub completed_at: Timestamp,
    pub total_score: u32,
    pub risk_level: RiskLevel,
}

/// How a respondent engages with assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponsePatterns {
    pub total_completed: usize,
    /// Mean time taken in minutes, one decimal; `None` when no entry
    /// records a duration.
    pub average_completion_minutes: Option<f64>,
    /// Completed count per instrument name.
    pub assessment_frequency: BTreeMap<String, usize>,
    /// The newest [`RECENT_ACTIVITY`] entries, newest first.
    pub recent_activity: Vec<RecentActivity>,
}

pub fn response_patterns(history: &[CompletedAssessment]) -> ResponsePatterns {
    let durations: Vec<f64> = history
        .iter()
        .filter_map(|e| e.time_taken_seconds())
        .map(|s| s as f64 / 60.0)
        .collect();
    let average_completion_minutes = (!durations.is_empty())
        .then(|| round_to(durations.iter().sum::<f64>() / durations.len() as f64, 1));

    let mut assessment_frequency = BTreeMap::new();
    for entry in history {
        *assessment_frequency
            .entry(entry.assessment_type().name.clone())
            .or_insert(0) += 1;
    }

    let recent_activity = newest_first(history)
        .into_iter()
        .take(RECENT_ACTIVITY)
        .map(|e| RecentActivity {
            assessment_id: e.id(),
            assessment: e.assessment_type().name.clone(),
            display_name: e.assessment_type().display_name.clone(),
            completed_at: e.completed_at(),
            total_score: e.total_score(),
            risk_level: e.risk_level(),
        })
        .collect();

    ResponsePatterns {
        total_completed: history.len(),
        average_completion_minutes,
        assessment_frequency,
        recent_activity,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionCount {
    pub text: String,
    pub score: u32,
    pub count: usize,
    /// Share of the question's answers selecting this option, one decimal.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionAnalytics {
    pub question_id: String,
    pub text: String,
    /// Completed assessments that answered this question.
    pub total_responses: usize,
    /// Mean item score before reverse scoring, two decimals. `None` for
    /// free text and for questions nobody answered.
    pub average_score: Option<f64>,
    /// Per-option counts in option order; empty for scales and free text.
    pub options: Vec<OptionCount>,
}

/// Answer statistics per question of `assessment`, over the history
/// entries taken against it. Entries of other instruments are ignored.
pub fn question_analytics(
    history: &[CompletedAssessment],
    assessment: &AssessmentType,
) -> Vec<QuestionAnalytics> {
    let entries: Vec<&CompletedAssessment> = history
        .iter()
        .filter(|e| e.assessment_type().id == assessment.id)
        .collect();

    assessment
        .questions
        .iter()
        .map(|q| {
            let answers: Vec<&Answer> = entries
                .iter()
                .filter_map(|e| e.responses().iter().find(|r| r.question_id == q.id))
                .map(|r| &r.answer)
                .filter(|a| a.is_answered())
                .collect();
            let total_responses = answers.len();

            let mut counts = vec![0usize; q.kind.options().len()];
            for answer in &answers {
                let selected = match answer {
                    Answer::Option { index } => std::slice::from_ref(index),
                    Answer::Options { indices } => indices.as_slice(),
                    _ => &[],
                };
                for &index in selected {
                    if let Some(count) = counts.get_mut(index) {
                        *count += 1;
                    }
                }
            }
            let options = q
                .kind
                .options()
                .iter()
                .zip(counts)
                .map(|(option, count)| OptionCount {
                    text: option.text.clone(),
                    score: option.score,
                    count,
                    percent: percent_of(count, total_responses),
                })
                .collect();

            let scored = !matches!(q.kind, QuestionKind::FreeText) && total_responses > 0;
            let average_score = scored.then(|| {
                let sum: f64 = answers
                    .iter()
                    .map(|a| f64::from(raw_value(&q.kind, a)))
                    .sum();
                round_to(sum / total_responses as f64, 2)
            });

            QuestionAnalytics {
                question_id: q.id.clone(),
                text: q.text.clone(),
                total_responses,
                average_score,
                options,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SuggestionKind {
    RegularCheckup,
    FollowUp,
    AnxietyScreening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Priority {
    Medium,
    High,
}

/// A next assessment to offer the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Machine key of the instrument to take.
    pub assessment: String,
    pub reason: String,
}

/// Up to [`MAX_SUGGESTIONS`] suggested next assessments, most urgent first.
///
/// A check-up is due after more than [`CHECKUP_AFTER_DAYS`] whole days
/// without an assessment (or with none at all), a follow-up after any
/// result of moderate risk or worse, and anxiety screening once depression
/// has been screened without it.
pub fn suggestions(history: &[CompletedAssessment], clock: &Zoned) -> Vec<Suggestion> {
    let newest_first = newest_first(history);
    let mut suggestions = Vec::new();

    let days_since = newest_first.first().map(|e| {
        (clock.timestamp().as_second() - e.completed_at().as_second()).div_euclid(SECONDS_PER_DAY)
    });
    if days_since.is_none_or(|days| days > CHECKUP_AFTER_DAYS) {
        suggestions.push(Suggestion {
            kind: SuggestionKind::RegularCheckup,
            title: "Regular Mental Health Check-up".to_string(),
            description: "It's been a while since your last assessment. Regular monitoring helps track your wellbeing.".to_string(),
            priority: Priority::High,
            assessment: "PHQ9".to_string(),
            reason: match days_since {
                Some(days) => format!("{days} days since last assessment"),
                None => "No assessment taken yet".to_string(),
            },
        });
    }

    if let Some(latest) = newest_first
        .iter()
        .find(|e| e.risk_level() >= RiskLevel::Moderate)
    {
        suggestions.push(Suggestion {
            kind: SuggestionKind::FollowUp,
            title: "Follow-up Assessment Recommended".to_string(),
            description: "Your recent assessment indicated elevated symptoms. A follow-up can help track changes.".to_string(),
            priority: Priority::High,
            assessment: latest.assessment_type().name.clone(),
            reason: format!(
                "Recent {} score: {}",
                latest.assessment_type().display_name,
                latest.total_score()
            ),
        });
    }

    let taken = |name: &str| history.iter().any(|e| e.assessment_type().name == name);
    if taken("PHQ9") && !taken("GAD7") {
        suggestions.push(Suggestion {
            kind: SuggestionKind::AnxietyScreening,
            title: "Anxiety Screening".to_string(),
            description: "Since you've completed depression screening, anxiety assessment can provide a complete picture.".to_string(),
            priority: Priority::Medium,
            assessment: "GAD7".to_string(),
            reason: "Comprehensive mental health screening".to_string(),
        });
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 1)
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

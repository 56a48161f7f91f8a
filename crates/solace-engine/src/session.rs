use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use solace_core::{Answer, AssessmentType, Question, Response};
use ts_rs::TS;

use crate::audit::AuditEvent;
use crate::classify::classify;
use crate::completed::CompletedAssessment;
use crate::error::{EngineError, MissingQuestion};
use crate::scoring::{check_answer, score_items};

/// Where a session is in `NotStarted → InProgress → Complete → Submitted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    NotStarted,
    /// One response slot per question, in question order.
    InProgress {
        current_index: usize,
        responses: Vec<Response>,
    },
    /// Every required question answered; responses frozen.
    Complete { responses: Vec<Response> },
    Submitted { assessment: CompletedAssessment },
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::InProgress { .. } => "in_progress",
            SessionState::Complete { .. } => "complete",
            SessionState::Submitted { .. } => "submitted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub required_missing: usize,
}

/// One respondent taking one assessment.
///
/// A session is a plain value owned by the caller. Every transition borrows
/// the current session and returns the next one, so the previous state
/// stays usable when a transition fails and sessions can be serialized and
/// resumed at any point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    respondent_id: String,
    assessment: AssessmentType,
    started_at: Option<Timestamp>,
    state: SessionState,
}

impl Session {
    pub fn new(respondent_id: impl Into<String>, assessment: AssessmentType) -> Self {
        Self {
            respondent_id: respondent_id.into(),
            assessment,
            started_at: None,
            state: SessionState::NotStarted,
        }
    }

    /// Validate the assessment type and open every response slot.
    ///
    /// An assessment with no questions, or with any other configuration
    /// defect, is never presented.
    pub fn start(&self, now: Timestamp) -> Result<Session, EngineError> {
        if !matches!(self.state, SessionState::NotStarted) {
            return Err(self.invalid("start"));
        }
        self.assessment.validate()?;

        let responses = self
            .assessment
            .questions
            .iter()
            .map(|q| Response::unanswered(q.id.clone()))
            .collect();

        let mut next = self.with_state(SessionState::InProgress {
            current_index: 0,
            responses,
        });
        next.started_at = Some(now);
        AuditEvent::assessment_started(&next).emit();
        Ok(next)
    }

    /// Select option `option_index` for the question at `question_index`.
    pub fn answer(&self, question_index: usize, option_index: usize) -> Result<Session, EngineError> {
        self.answer_with(question_index, Answer::Option {
            index: option_index,
        })
    }

    /// Record `answer` for the question at `question_index`, replacing any
    /// earlier answer. The cursor does not move. `Answer::Unanswered`
    /// clears the slot.
    pub fn answer_with(&self, question_index: usize, answer: Answer) -> Result<Session, EngineError> {
        let (current_index, responses) = self.in_progress("answer")?;
        let out_of_range = EngineError::QuestionOutOfRange {
            index: question_index,
            total: self.assessment.questions.len(),
        };
        let Some(question) = self.assessment.question(question_index) else {
            return Err(out_of_range);
        };
        check_answer(question, &answer).map_err(EngineError::InvalidAnswer)?;

        let mut responses = responses.to_vec();
        let Some(slot) = responses.get_mut(question_index) else {
            return Err(out_of_range);
        };
        *slot = Response::new(question.id.clone(), answer);

        tracing::debug!(
            respondent = %self.respondent_id,
            question = %question.id,
            "answer recorded"
        );
        Ok(self.with_state(SessionState::InProgress {
            current_index,
            responses,
        }))
    }

    /// Move to the following question. Stays on the last question rather
    /// than submitting.
    pub fn next(&self) -> Result<Session, EngineError> {
        self.move_cursor("move to the next question", |i| i.saturating_add(1))
    }

    /// Move to the preceding question. Stays on the first question.
    pub fn previous(&self) -> Result<Session, EngineError> {
        self.move_cursor("move to the previous question", |i| i.saturating_sub(1))
    }

    /// Jump to `index`, clamped to the last question.
    pub fn go_to(&self, index: usize) -> Result<Session, EngineError> {
        self.move_cursor("jump to a question", |_| index)
    }

    /// Freeze the responses once every required question is answered.
    pub fn complete(&self) -> Result<Session, EngineError> {
        let responses = self.frozen_responses("complete")?;
        Ok(self.with_state(SessionState::Complete { responses }))
    }

    /// Complete the session if needed, then score and classify it.
    ///
    /// Fails with [`EngineError::IncompleteAssessment`] while any required
    /// question is unanswered; optional questions never block submission.
    pub fn submit(&self, now: Timestamp) -> Result<Session, EngineError> {
        let responses = match &self.state {
            SessionState::Complete { responses } => responses.clone(),
            _ => self.frozen_responses("submit")?,
        };
        let breakdown = score_items(&responses, &self.assessment)?;
        let band = classify(breakdown.total, &self.assessment)?;

        let time_taken_seconds = self
            .started_at
            .and_then(|started| u64::try_from(now.as_second() - started.as_second()).ok());
        let completed = CompletedAssessment::new(
            self.respondent_id.clone(),
            &self.assessment,
            responses,
            breakdown.total,
            band,
            now,
            time_taken_seconds,
        );

        AuditEvent::assessment_submitted(&completed).emit();

        Ok(self.with_state(SessionState::Submitted {
            assessment: completed,
        }))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> &'static str {
        self.state.label()
    }

    pub fn respondent_id(&self) -> &str {
        &self.respondent_id
    }

    pub fn assessment(&self) -> &AssessmentType {
        &self.assessment
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            SessionState::InProgress { current_index, .. } => Some(*current_index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.assessment.question(i))
    }

    /// Recorded responses, one slot per question, once the session has started.
    pub fn responses(&self) -> Option<&[Response]> {
        match &self.state {
            SessionState::NotStarted => None,
            SessionState::InProgress { responses, .. } | SessionState::Complete { responses } => {
                Some(responses)
            }
            SessionState::Submitted { assessment } => Some(assessment.responses()),
        }
    }

    pub fn completed(&self) -> Option<&CompletedAssessment> {
        match &self.state {
            SessionState::Submitted { assessment } => Some(assessment),
            _ => None,
        }
    }

    pub fn progress(&self) -> Progress {
        let responses = self.responses().unwrap_or_default();
        Progress {
            answered: responses.iter().filter(|r| r.answer.is_answered()).count(),
            total: self.assessment.questions.len(),
            required_missing: self.missing_required(responses).len(),
        }
    }

    /// Required questions whose slot holds no answer.
    pub fn missing_required(&self, responses: &[Response]) -> Vec<MissingQuestion> {
        self.assessment
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| {
                q.is_required && !responses.get(*i).is_some_and(|r| r.answer.is_answered())
            })
            .map(|(index, q)| MissingQuestion {
                index,
                question_id: q.id.clone(),
                order: q.order,
            })
            .collect()
    }

    fn with_state(&self, state: SessionState) -> Session {
        Session {
            respondent_id: self.respondent_id.clone(),
            assessment: self.assessment.clone(),
            started_at: self.started_at,
            state,
        }
    }

    fn invalid(&self, operation: &'static str) -> EngineError {
        EngineError::InvalidTransition {
            operation,
            state: self.state.label(),
        }
    }

    fn in_progress(&self, operation: &'static str) -> Result<(usize, &[Response]), EngineError> {
        match &self.state {
            SessionState::InProgress {
                current_index,
                responses,
            } => Ok((*current_index, responses)),
            _ => Err(self.invalid(operation)),
        }
    }

    fn move_cursor(
        &self,
        operation: &'static str,
        step: impl FnOnce(usize) -> usize,
    ) -> Result<Session, EngineError> {
        let (current_index, responses) = self.in_progress(operation)?;
        let last = self.assessment.questions.len().saturating_sub(1);
        Ok(self.with_state(SessionState::InProgress {
            current_index: step(current_index).min(last),
            responses: responses.to_vec(),
        }))
    }

    /// Responses of an in-progress session, once every required question
    /// is answered.
    fn frozen_responses(&self, operation: &'static str) -> Result<Vec<Response>, EngineError> {
        match &self.state {
            SessionState::InProgress { responses, .. } => {
                let missing = self.missing_required(responses);
                if !missing.is_empty() {
                    tracing::debug!(
                        respondent = %self.respondent_id,
                        missing = missing.len(),
                        "submission blocked by unanswered required questions"
                    );
                    return Err(EngineError::IncompleteAssessment { missing });
                }
                Ok(responses.clone())
            }
            _ => Err(self.invalid(operation)),
        }
    }
}

// src/session.rs

use crate::model::{Question, QuizAttempt, UserAnswer};
use crate::scoring::build_attempt;
use crate::shuffle::shuffle;
use crate::storage::KeyValueStore;
use crate::store::{AttemptStore, StoreError};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    InProgress,
    ReviewPending,
    Finalized,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("the quiz has already been started")]
    AlreadyStarted,
    #[error("the quiz questions are still loading")]
    NotStarted,
    #[error("close the review summary before changing answers")]
    ReviewOpen,
    #[error("the quiz has already been submitted")]
    Finalized,
    #[error("option {index} does not exist, the question has {options} options")]
    OptionOutOfRange { index: usize, options: usize },
    #[error("the quiz can only be submitted from the last question")]
    NotOnLastQuestion,
}

/// Answered/unanswered counts shown before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
}

/// Result of submitting a quiz. The attempt is always available for the
/// results view; `save_error` is set when it could not be persisted.
#[derive(Debug)]
pub struct Submission {
    pub attempt: QuizAttempt,
    pub save_error: Option<StoreError>,
}

impl Submission {
    pub fn saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// One run through a category: shuffled once on start, answers kept in the
/// same order as the shuffled questions until the quiz is submitted.
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: String,
    state: SessionState,
    limit: Option<usize>,
    questions: Vec<Question>,
    answers: Vec<UserAnswer>,
    current: usize,
}

impl QuizSession {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            state: SessionState::Loading,
            limit: None,
            questions: Vec::new(),
            answers: Vec::new(),
            current: 0,
        }
    }

    /// Keeps at most `limit` questions after shuffling.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// `Loading` → `InProgress`: shuffles the questions exactly once and
    /// opens one unanswered slot per question.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        mut questions: Vec<Question>,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Loading {
            return Err(SessionError::AlreadyStarted);
        }
        shuffle(&mut questions, rng);
        if let Some(limit) = self.limit {
            questions.truncate(limit);
        }

        self.answers = questions
            .iter()
            .map(|q| UserAnswer::unanswered(q.id.clone()))
            .collect();
        self.questions = questions;
        self.current = 0;
        self.state = SessionState::InProgress;
        log::info!(
            "Started {} quiz with {} questions",
            self.category,
            self.questions.len()
        );
        Ok(())
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_answer(&self) -> Option<usize> {
        self.answers
            .get(self.current)
            .and_then(|a| a.selected_answer_index)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Fraction of the quiz reached, counting the question on screen.
    pub fn progress(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f32 / self.questions.len() as f32
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Loading => Err(SessionError::NotStarted),
            SessionState::InProgress => Ok(()),
            SessionState::ReviewPending => Err(SessionError::ReviewOpen),
            SessionState::Finalized => Err(SessionError::Finalized),
        }
    }

    /// Moves to `index`, clamped to the question range.
    pub fn go_to(&mut self, index: usize) -> Result<usize, SessionError> {
        self.ensure_editable()?;
        self.current = index.min(self.questions.len().saturating_sub(1));
        Ok(self.current)
    }

    pub fn next(&mut self) -> Result<usize, SessionError> {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn previous(&mut self) -> Result<usize, SessionError> {
        self.go_to(self.current.saturating_sub(1))
    }

    /// Records `option` for the question on screen, replacing any earlier pick.
    pub fn select_answer(&mut self, option: usize) -> Result<(), SessionError> {
        self.ensure_editable()?;
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::OptionOutOfRange {
                index: option,
                options: 0,
            });
        };
        if option >= question.options.len() {
            return Err(SessionError::OptionOutOfRange {
                index: option,
                options: question.options.len(),
            });
        }
        self.answers[self.current].selected_answer_index = Some(option);
        Ok(())
    }

    pub fn review_summary(&self) -> ReviewSummary {
        let answered = self.answers.iter().filter(|a| a.is_answered()).count();
        ReviewSummary {
            total: self.answers.len(),
            answered,
            unanswered: self.answers.len() - answered,
        }
    }

    /// `InProgress` → `ReviewPending`.
    pub fn request_review(&mut self) -> Result<ReviewSummary, SessionError> {
        self.ensure_editable()?;
        if !self.is_last() {
            return Err(SessionError::NotOnLastQuestion);
        }
        self.state = SessionState::ReviewPending;
        Ok(self.review_summary())
    }

    /// `ReviewPending` → `InProgress`.
    pub fn continue_answering(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::ReviewPending => {
                self.state = SessionState::InProgress;
                Ok(())
            }
            SessionState::InProgress => Ok(()),
            SessionState::Loading => Err(SessionError::NotStarted),
            SessionState::Finalized => Err(SessionError::Finalized),
        }
    }

    /// Scores the answers against the shuffled questions and hands the attempt
    /// to `store`. A failed save does not lose the score.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut AttemptStore<S>,
    ) -> Result<Submission, SessionError> {
        match self.state {
            SessionState::Loading => return Err(SessionError::NotStarted),
            SessionState::Finalized => return Err(SessionError::Finalized),
            SessionState::InProgress if !self.is_last() => {
                return Err(SessionError::NotOnLastQuestion);
            }
            SessionState::InProgress | SessionState::ReviewPending => {}
        }
        self.state = SessionState::Finalized;

        let attempt = build_attempt(&self.category, self.answers.clone(), &self.questions);
        let submission = match store.append(&self.category, attempt.clone()) {
            Ok(saved) => Submission {
                attempt: saved,
                save_error: None,
            },
            Err(err) => Submission {
                attempt: attempt.stamped(store.now()),
                save_error: Some(err),
            },
        };
        log::info!(
            "Submitted {} quiz: {}/{}",
            self.category,
            submission.attempt.score,
            submission.attempt.total_questions
        );
        Ok(submission)
    }
}

use super::*;
use crate::session::{ReviewSummary, SessionError};
use crate::store::{StoreError, UserId};

impl BoardPrepApp {
    /// Signs in with the name and role typed on the sign-in screen.
    /// Only members get a history namespace.
    pub fn sign_in(&mut self) {
        let name = self.name_input.trim().to_string();
        let Some(user_id) = UserId::from_name(&name) else {
            self.message = "⚠ Enter your name to continue.".into();
            return;
        };

        match self.role_input {
            Role::Member => self.store.sign_in(user_id),
            Role::Admin => {
                self.store.sign_out();
                log::info!("Admin session for {name}: progress is not stored");
            }
        }

        self.prefs.last_user = name.clone();
        self.prefs.last_role = self.role_input;
        self.user = Some(SignedInUser {
            name,
            role: self.role_input,
        });
        self.message.clear();
        self.state = AppState::Home;
    }

    /// Drops the user namespace and any in-flight quiz.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("{} signed out", user.name);
        }
        self.store.sign_out();
        self.session = None;
        self.results = None;
        self.review = None;
        self.confirm_clear = false;
        self.message.clear();
        self.state = AppState::SignIn;
    }

    /// Opens a fresh session for `category` with a fresh shuffle. An
    /// unfinished session is discarded without saving anything.
    pub fn start_quiz(&mut self, category: &str) {
        if self.bank.category(category).is_none() {
            log::warn!("Unknown category {category}, back to home");
            self.message = format!("Category \"{category}\" does not exist.");
            self.state = AppState::Home;
            return;
        }
        if let Some(old) = self.session.take() {
            log::debug!("Discarding unfinished {} session", old.category());
        }

        let mut session = QuizSession::new(category).with_limit(self.config.questions_per_quiz);
        let questions = self.bank.questions_for(category);
        match session.start(questions, &mut rand::thread_rng()) {
            Ok(()) => {
                self.session = Some(session);
                self.results = None;
                self.message.clear();
                self.state = AppState::Quiz;
            }
            Err(err) => {
                log::error!("Could not start {category} quiz: {err}");
                self.message = err.to_string();
            }
        }
    }

    fn with_session<T>(
        &mut self,
        f: impl FnOnce(&mut QuizSession) -> Result<T, SessionError>,
    ) -> Option<T> {
        let session = self.session.as_mut()?;
        match f(session) {
            Ok(value) => {
                self.message.clear();
                Some(value)
            }
            Err(err) => {
                log::debug!("Quiz action rejected: {err}");
                self.message = format!("⚠ {err}");
                None
            }
        }
    }

    pub fn select_answer(&mut self, option: usize) {
        self.with_session(|s| s.select_answer(option));
    }

    pub fn next_question(&mut self) {
        self.with_session(|s| s.next());
    }

    pub fn previous_question(&mut self) {
        self.with_session(|s| s.previous());
    }

    pub fn request_review(&mut self) -> Option<ReviewSummary> {
        self.with_session(|s| s.request_review())
    }

    pub fn continue_answering(&mut self) {
        self.with_session(|s| s.continue_answering());
    }

    /// Scores and saves the running quiz, then shows the results.
    pub fn submit_quiz(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let category = session.category().to_string();
        match session.submit(&mut self.store) {
            Ok(submission) => {
                let saved = submission.saved();
                self.message = match &submission.save_error {
                    None => String::new(),
                    Some(StoreError::NotSignedIn) => {
                        "ℹ Admin sessions do not keep quiz history.".into()
                    }
                    Some(err) => {
                        log::error!("Progress for {category} not saved: {err}");
                        "⚠ Your progress could not be saved.".into()
                    }
                };
                self.results = Some(ResultsView {
                    category,
                    attempt: submission.attempt,
                    saved,
                });
                self.session = None;
                self.state = AppState::Results;
            }
            Err(err) => {
                self.message = format!("⚠ {err}");
            }
        }
    }

    /// "Try again" from the results screen.
    pub fn retry_quiz(&mut self) {
        if let Some(category) = self.results.as_ref().map(|r| r.category.clone()) {
            self.start_quiz(&category);
        }
    }

    /// Leaves a running quiz; nothing is saved.
    pub fn abandon_quiz(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Abandoned {} quiz", session.category());
        }
        self.state = AppState::Home;
    }

    pub fn clear_history(&mut self) {
        self.confirm_clear = false;
        match self.store.clear() {
            Ok(()) => {
                self.review = None;
                self.message = "🗑 Your quiz history was cleared.".into();
            }
            Err(err) => {
                log::error!("Could not clear history: {err}");
                self.message = format!("⚠ Could not clear history: {err}");
            }
        }
    }

    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        ctx.set_visuals(if self.prefs.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }
}

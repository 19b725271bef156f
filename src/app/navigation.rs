use super::*;

impl BoardPrepApp {
    pub fn go_home(&mut self) {
        self.confirm_clear = false;
        self.state = AppState::Home;
    }

    pub fn open_progress(&mut self) {
        self.state = AppState::Progress;
    }

    pub fn open_review(&mut self) {
        self.review = None;
        self.state = AppState::Review;
    }

    /// Results for the newest attempt of `category`. Without one (for
    /// instance after signing in again) the quiz restarts instead.
    pub fn open_results(&mut self, category: &str) {
        match self.store.latest_attempt(category) {
            Some(attempt) => {
                self.results = Some(ResultsView {
                    category: category.to_string(),
                    attempt,
                    saved: true,
                });
                self.state = AppState::Results;
            }
            None => {
                log::debug!("No attempt to show for {category}, restarting the quiz");
                self.start_quiz(category);
            }
        }
    }

    /// Opens attempt `index` of `category`. A missing attempt leads back to
    /// the review list.
    pub fn open_attempt(&mut self, category: &str, index: usize) {
        match self.store.attempt_at(category, index) {
            Some(attempt) => {
                self.review = Some(ReviewSelection {
                    category: category.to_string(),
                    index,
                    attempt,
                });
                self.state = AppState::ReviewAttempt;
            }
            None => {
                log::warn!("Attempt {index} of {category} not found");
                self.message = "That attempt is no longer available.".into();
                self.open_review();
            }
        }
    }
}

use super::*;
use crate::view_models::{
    CategoryInfo, CategoryProgress, QuestionRow, category_infos, progress_overview,
    question_rows,
};

impl BoardPrepApp {
    pub fn is_member(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Member)
    }

    pub fn category_cards(&self) -> Vec<CategoryInfo> {
        category_infos(&self.bank, &self.store.all_attempts())
    }

    /// Attempted categories with their statistics, for progress and review.
    pub fn progress(&self) -> Vec<CategoryProgress> {
        progress_overview(&self.store.all_attempts(), &self.bank)
    }

    pub fn result_rows(&self) -> Vec<QuestionRow> {
        self.results
            .as_ref()
            .map(|r| question_rows(&r.attempt, &self.bank))
            .unwrap_or_default()
    }

    pub fn review_rows(&self) -> Vec<QuestionRow> {
        self.review
            .as_ref()
            .map(|r| question_rows(&r.attempt, &self.bank))
            .unwrap_or_default()
    }

    pub fn category_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.bank.category_name(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app, member_app};

    #[test]
    fn progress_lists_attempted_categories_only() {
        let mut app = member_app("u1");
        assert!(app.progress().is_empty());

        app.start_quiz("chemistry");
        let last = app.session.as_ref().unwrap().len() - 1;
        app.session.as_mut().unwrap().go_to(last).unwrap();
        app.submit_quiz();

        let progress = app.progress();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].name, "Chemistry");
        assert_eq!(progress[0].attempts.len(), 1);
        assert_eq!(app.result_rows().len(), app.results.as_ref().unwrap().attempt.answers.len());
    }

    #[test]
    fn signed_out_app_has_no_history() {
        let app = app();
        assert!(!app.is_member());
        assert!(app.progress().is_empty());
        assert!(app.category_cards().iter().all(|c| c.attempts == 0));
        assert!(app.result_rows().is_empty());
    }
}

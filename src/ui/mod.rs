mod helpers;
pub mod layout;
pub mod views;

use crate::app::BoardPrepApp;
use crate::model::AppState;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, top_panel};

impl App for BoardPrepApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Navigation bar once someone is signed in
        if self.state != AppState::SignIn {
            top_panel(self, ctx);
        }

        bottom_panel(self, ctx);

        // Dispatch by state
        match self.state {
            AppState::SignIn => views::sign_in::ui_sign_in(self, ctx),
            AppState::Home => views::home::ui_home(self, ctx),
            AppState::Quiz => views::quiz::ui_quiz(self, ctx),
            AppState::Results => views::results::ui_results(self, ctx),
            AppState::Progress => views::progress::ui_progress(self, ctx),
            AppState::Review => views::review::ui_review(self, ctx),
            AppState::ReviewAttempt => views::review::ui_review_attempt(self, ctx),
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, &self.prefs);
    }
}

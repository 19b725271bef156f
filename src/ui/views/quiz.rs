use crate::BoardPrepApp;
use crate::model::{AppState, Question};
use crate::session::{ReviewSummary, SessionState};
use crate::ui::layout::{centered_panel, two_button_row};
use egui::{Align2, Button, Context, ProgressBar, RichText, ScrollArea};

enum QuizAction {
    Select(usize),
    Previous,
    Next,
    Review,
    ContinueAnswering,
    Submit,
    Quit,
}

pub fn ui_quiz(app: &mut BoardPrepApp, ctx: &Context) {
    let Some(session) = app.session.as_ref() else {
        app.state = AppState::Home;
        return;
    };

    // Snapshot of the session for this frame; mutations are applied after drawing.
    let title = format!("{} Quiz", app.category_name(session.category()));
    let total = session.len();
    let index = session.current_index();
    let question: Option<Question> = session.current_question().cloned();
    let selected = session.current_answer();
    let progress = session.progress();
    let is_last = session.is_last();
    let reviewing = session.state() == SessionState::ReviewPending;
    let summary = session.review_summary();

    let mut action = None;

    centered_panel(ctx, 480.0, 650.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(&title);
        });
        ui.add_space(8.0);

        let Some(question) = &question else {
            ui.label("There are no questions in this category yet.");
            ui.add_space(12.0);
            if ui.button("Back to home").clicked() {
                action = Some(QuizAction::Quit);
            }
            return;
        };

        let panel_width = ui.available_width();
        ui.add(ProgressBar::new(progress).desired_width(panel_width));
        ui.label(format!("Question {} of {}", index + 1, total));
        ui.add_space(10.0);

        ScrollArea::vertical().max_height(140.0).show(ui, |ui| {
            ui.label(RichText::new(&question.text).size(18.0));
        });
        if let Some(url) = &question.image_url {
            ui.hyperlink_to("🖼 Question image", url);
        }
        ui.add_space(10.0);

        for (i, option) in question.options.iter().enumerate() {
            let checked = selected == Some(i);
            if ui
                .add_enabled(!reviewing, egui::RadioButton::new(checked, option.as_str()))
                .clicked()
            {
                action = Some(QuizAction::Select(i));
            }
            ui.add_space(4.0);
        }
        ui.add_space(12.0);

        let (previous, next) = two_button_row(
            ui,
            panel_width,
            ("⬅ Previous", index > 0 && !reviewing),
            ("Next ➡", !is_last && !reviewing),
        );
        if previous {
            action = Some(QuizAction::Previous);
        }
        if next {
            action = Some(QuizAction::Next);
        }

        if is_last {
            ui.add_space(6.0);
            let (review, finish) = two_button_row(
                ui,
                panel_width,
                ("📋 Review answers", !reviewing),
                ("✔ Finish quiz", !reviewing),
            );
            if review {
                action = Some(QuizAction::Review);
            }
            if finish {
                action = Some(QuizAction::Submit);
            }
        }

        if !app.message.is_empty() {
            ui.add_space(8.0);
            ui.label(&app.message);
        }
    });

    if reviewing {
        review_window(ctx, summary, &mut action);
    }

    match action {
        Some(QuizAction::Select(i)) => app.select_answer(i),
        Some(QuizAction::Previous) => app.previous_question(),
        Some(QuizAction::Next) => app.next_question(),
        Some(QuizAction::Review) => {
            app.request_review();
        }
        Some(QuizAction::ContinueAnswering) => app.continue_answering(),
        Some(QuizAction::Submit) => app.submit_quiz(),
        Some(QuizAction::Quit) => app.abandon_quiz(),
        None => {}
    }
}

fn review_window(ctx: &Context, summary: ReviewSummary, action: &mut Option<QuizAction>) {
    egui::Window::new("Review your answers")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("You are about to finish the quiz.");
            ui.add_space(6.0);
            ui.label(format!("Total questions: {}", summary.total));
            ui.label(RichText::new(format!("Answered: {}", summary.answered)).color(egui::Color32::from_rgb(34, 160, 80)));
            ui.label(RichText::new(format!("Unanswered: {}", summary.unanswered)).color(egui::Color32::from_rgb(210, 160, 20)));
            ui.add_space(8.0);
            ui.label("Are you sure you want to submit?");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.add(Button::new("Continue reviewing")).clicked() {
                    *action = Some(QuizAction::ContinueAnswering);
                }
                if ui.add(Button::new("Submit quiz")).clicked() {
                    *action = Some(QuizAction::Submit);
                }
            });
        });
}

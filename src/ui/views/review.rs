use crate::BoardPrepApp;
use crate::model::AppState;
use crate::ui::helpers::{band_color, question_card};
use crate::ui::layout::{simple_panel, two_button_row};
use crate::view_models::{CategoryProgress, QuestionRow, ResultSummary, format_date};
use egui::{Context, RichText, ScrollArea};

pub fn ui_review(app: &mut BoardPrepApp, ctx: &Context) {
    let overview: Vec<CategoryProgress> = app.progress();
    let is_member = app.is_member();
    let mut open: Option<(String, usize)> = None;

    simple_panel(ctx, 640.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🔍 Review past attempts");
            ui.label("Select a category to review your past attempts.");
        });
        ui.add_space(10.0);

        if !app.message.is_empty() {
            ui.label(&app.message);
            ui.add_space(6.0);
        }

        if !is_member || overview.is_empty() {
            ui.label("There are no attempts to review yet.");
            ui.add_space(8.0);
            if ui.button("Go to quizzes").clicked() {
                app.go_home();
            }
            return;
        }

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for category in &overview {
                egui::CollapsingHeader::new(RichText::new(&category.name).strong())
                    .id_salt(format!("review_{}", category.slug))
                    .show(ui, |ui| {
                        for row in &category.attempts {
                            ui.horizontal(|ui| {
                                ui.label(&row.date);
                                ui.label(format!("Score: {} / {}", row.score, row.total));
                                if ui.button("View details").clicked() {
                                    open = Some((category.slug.clone(), row.index));
                                }
                            });
                        }
                    });
                ui.add_space(6.0);
            }
        });
    });

    if let Some((category, index)) = open {
        app.message.clear();
        app.open_attempt(&category, index);
    }
}

pub fn ui_review_attempt(app: &mut BoardPrepApp, ctx: &Context) {
    let Some(review) = app.review.as_ref() else {
        app.state = AppState::Review;
        return;
    };
    let title = format!("{} Attempt Review", app.category_name(&review.category));
    let date = format_date(review.attempt.date);
    let summary = ResultSummary::of(&review.attempt);
    let rows: Vec<QuestionRow> = app.review_rows();

    let mut back = false;
    let mut home = false;

    simple_panel(ctx, 700.0, |ui| {
        let panel_width = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading(&title);
            ui.label(format!("Attempt from: {date}"));
            ui.label(
                RichText::new(format!("{} / {}", summary.score, summary.total))
                    .size(28.0)
                    .strong()
                    .color(band_color(summary.band)),
            );
            ui.label(format!("({}%)", summary.percentage));
        });
        ui.add_space(8.0);

        (back, home) = two_button_row(ui, panel_width, ("⬅ Back to review", true), ("🏠 Home", true));
        ui.add_space(10.0);

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for row in &rows {
                question_card(ui, row);
            }
        });
    });

    if back {
        app.open_review();
    } else if home {
        app.go_home();
    }
}

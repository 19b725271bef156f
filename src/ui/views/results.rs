use crate::BoardPrepApp;
use crate::model::AppState;
use crate::ui::helpers::{band_color, question_card};
use crate::ui::layout::{simple_panel, two_button_row};
use crate::view_models::{QuestionRow, ResultSummary};
use egui::{Context, RichText, ScrollArea};

pub fn ui_results(app: &mut BoardPrepApp, ctx: &Context) {
    let Some(results) = app.results.as_ref() else {
        app.state = AppState::Home;
        return;
    };
    let title = format!("{} Results", app.category_name(&results.category));
    let summary = ResultSummary::of(&results.attempt);
    let rows: Vec<QuestionRow> = app.result_rows();

    let mut retry = false;
    let mut home = false;

    simple_panel(ctx, 700.0, |ui| {
        let panel_width = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading(&title);
            ui.label("Here's how you performed.");
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("{} / {}", summary.score, summary.total))
                    .size(32.0)
                    .strong()
                    .color(band_color(summary.band)),
            );
            ui.label(format!("({}%)", summary.percentage));
        });

        if !app.message.is_empty() {
            ui.add_space(6.0);
            ui.label(&app.message);
        }
        ui.add_space(10.0);

        (retry, home) = two_button_row(ui, panel_width, ("🔄 Try again", true), ("🏠 Back to home", true));
        ui.add_space(10.0);

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for row in &rows {
                question_card(ui, row);
            }
        });
    });

    if retry {
        app.retry_quiz();
    } else if home {
        app.go_home();
    }
}

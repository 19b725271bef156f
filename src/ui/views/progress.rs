use crate::BoardPrepApp;
use crate::scoring::ScoreBand;
use crate::ui::helpers::band_color;
use crate::ui::layout::simple_panel;
use crate::view_models::CategoryProgress;
use egui::{Align2, Button, Context, Grid, RichText, ScrollArea};

pub fn ui_progress(app: &mut BoardPrepApp, ctx: &Context) {
    let overview: Vec<CategoryProgress> = app.progress();
    let is_member = app.is_member();

    simple_panel(ctx, 640.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("📈 Your progress");
        });
        ui.add_space(10.0);

        if !is_member {
            ui.label("Progress is only kept for member accounts.");
            return;
        }
        if overview.is_empty() {
            ui.label("No quiz attempts yet. Take a quiz to see your progress here.");
            ui.add_space(8.0);
            if ui.button("Go to quizzes").clicked() {
                app.go_home();
            }
            return;
        }

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for (i, category) in overview.iter().enumerate() {
                egui::CollapsingHeader::new(RichText::new(&category.name).strong())
                    .id_salt(&category.slug)
                    .default_open(i == 0)
                    .show(ui, |ui| category_progress(ui, category));
                ui.add_space(6.0);
            }

            ui.add_space(12.0);
            if ui.button("🗑 Clear my history").clicked() {
                app.confirm_clear = true;
            }
            if !app.message.is_empty() {
                ui.label(&app.message);
            }
        });
    });

    if app.confirm_clear {
        confirm_clear_window(app, ctx);
    }
}

fn category_progress(ui: &mut egui::Ui, category: &CategoryProgress) {
    ui.label(format!(
        "Attempts: {}   Best: {}%   Latest: {}%   Average: {}%",
        category.attempts.len(),
        category.best_percentage,
        category.latest_percentage,
        category.average_percentage
    ));

    let trend = category
        .trend
        .iter()
        .map(|p| format!("{p}%"))
        .collect::<Vec<_>>()
        .join(" → ");
    ui.label(format!("Trend: {trend}"));
    ui.add_space(6.0);

    Grid::new(format!("progress_grid_{}", category.slug))
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label("Date");
            ui.label("Score");
            ui.label("%");
            ui.end_row();

            for row in &category.attempts {
                ui.label(&row.date);
                ui.label(format!("{} / {}", row.score, row.total));
                ui.label(
                    RichText::new(format!("{}%", row.percentage))
                        .color(band_color(ScoreBand::for_percentage(row.percentage))),
                );
                ui.end_row();
            }
        });
}

fn confirm_clear_window(app: &mut BoardPrepApp, ctx: &Context) {
    egui::Window::new("Clear history?")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("This removes every saved attempt for your account.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.add(Button::new("Cancel")).clicked() {
                    app.confirm_clear = false;
                }
                if ui.add(Button::new("Clear")).clicked() {
                    app.clear_history();
                }
            });
        });
}

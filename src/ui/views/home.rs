use crate::BoardPrepApp;
use crate::ui::helpers::big_list_button;
use crate::ui::layout::simple_panel;
use crate::view_models::CategoryInfo;
use egui::{Context, RichText, ScrollArea};

pub fn ui_home(app: &mut BoardPrepApp, ctx: &Context) {
    let cards: Vec<CategoryInfo> = app.category_cards();

    simple_panel(ctx, 560.0, |ui| {
        let content_width = ui.available_width();
        let button_h = 40.0;

        ui.vertical_centered(|ui| {
            let greeting = app
                .user
                .as_ref()
                .map(|u| format!("Welcome, {}!", u.name))
                .unwrap_or_else(|| "Welcome!".to_string());
            ui.heading(greeting);
            ui.label("Choose a subject to start a quiz.");
        });
        ui.add_space(12.0);

        if !app.message.is_empty() {
            ui.label(&app.message);
            ui.add_space(8.0);
        }

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for card in &cards {
                if big_list_button(ui, card.label(), content_width, button_h, card.question_count > 0) {
                    app.start_quiz(&card.slug);
                    return;
                }
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&card.description).small());
                    if card.attempts > 0 && ui.small_button("Last results").clicked() {
                        app.open_results(&card.slug);
                    }
                });
                ui.add_space(10.0);
            }
        });
    });
}

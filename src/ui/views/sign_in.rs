use crate::BoardPrepApp;
use crate::model::Role;
use crate::ui::layout::centered_panel;
use egui::{Button, Context, Key, RichText, TextEdit};

pub fn ui_sign_in(app: &mut BoardPrepApp, ctx: &Context) {
    centered_panel(ctx, 280.0, 420.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("📚 BoardPrep Pro");
            ui.label("Sign in to keep track of your quiz results.");
            ui.add_space(16.0);

            let width = ui.available_width().min(320.0);
            let name = ui.add_sized(
                [width, 28.0],
                TextEdit::singleline(&mut app.name_input).hint_text("Your name"),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add_space(((ui.available_width() - 180.0) / 2.0).max(0.0));
                ui.radio_value(&mut app.role_input, Role::Member, "Member");
                ui.radio_value(&mut app.role_input, Role::Admin, "Admin");
            });
            if app.role_input == Role::Admin {
                ui.label(RichText::new("Admin sessions do not keep quiz history.").italics());
            }

            ui.add_space(12.0);
            let submitted = name.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.add_sized([width, 36.0], Button::new("Sign in")).clicked() || submitted {
                app.sign_in();
            }

            if !app.message.is_empty() {
                ui.add_space(8.0);
                ui.label(&app.message);
            }
        });
    });
}

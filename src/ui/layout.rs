use crate::BoardPrepApp;
use crate::model::AppState;
use egui::{Button, CentralPanel, Context, Frame, Ui};

pub fn top_panel(app: &mut BoardPrepApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            let in_quiz = app.state == AppState::Quiz;

            if ui.button("🏠 Home").clicked() {
                if in_quiz {
                    app.abandon_quiz();
                } else {
                    app.go_home();
                }
            }
            if ui
                .add_enabled(!in_quiz, Button::new("📈 Progress"))
                .clicked()
            {
                app.open_progress();
            }
            if ui
                .add_enabled(!in_quiz, Button::new("🔍 Review"))
                .clicked()
            {
                app.open_review();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Sign out").clicked() {
                    app.sign_out();
                    ctx.request_repaint();
                }
                if let Some(user) = &app.user {
                    ui.label(format!("👤 {}", user.name));
                }
            });
        });
    });
}

pub fn bottom_panel(app: &mut BoardPrepApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- THEME -----------
        ui.with_layout(
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                let label = if app.prefs.dark_mode {
                    "☀ Light mode"
                } else {
                    "🌙 Dark mode"
                };
                if ui.button(label).clicked() {
                    app.toggle_theme(ctx);
                }
            }
        );
    });
}

/// Panel centred both ways, with a bounded content width.
pub fn centered_panel(
    ctx: &Context,
    est_height: f32,
    max_width: f32,
    inner: impl FnOnce(&mut Ui),
) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
        ui.add_space(extra);
    });
}

/// Full-height panel for long scrolling pages (results, progress, review).
pub fn simple_panel(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            let w = ui.available_width().min(max_width);
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 12))
                .show(ui, |ui| {
                    ui.set_width(w);
                    inner(ui);
                });
        });
    });
}

/// Two equally sized buttons in one row. Returns (left clicked, right clicked).
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    left: (&str, bool),
    right: (&str, bool),
) -> (bool, bool) {
    let btn_w = (panel_width - 8.0) / 2.0;
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - panel_width) / 2.0).max(0.0));
        clicked_left = ui
            .add_enabled_ui(left.1, |ui| ui.add_sized([btn_w, 36.0], Button::new(left.0)))
            .inner
            .clicked();
        clicked_right = ui
            .add_enabled_ui(right.1, |ui| ui.add_sized([btn_w, 36.0], Button::new(right.0)))
            .inner
            .clicked();
    });
    (clicked_left, clicked_right)
}

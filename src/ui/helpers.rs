// src/ui/helpers.rs
use crate::scoring::{Outcome, ScoreBand};
use crate::view_models::QuestionRow;
use egui::{Button, Color32, RichText, Ui, Vec2};

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height))).clicked()
}

pub fn band_color(band: ScoreBand) -> Color32 {
    match band {
        ScoreBand::Good => Color32::from_rgb(34, 160, 80),
        ScoreBand::Fair => Color32::from_rgb(210, 160, 20),
        ScoreBand::Poor => Color32::from_rgb(210, 60, 60),
    }
}

/// One graded question: options with the correct one and a wrong pick
/// highlighted, followed by the explanation.
pub fn question_card(ui: &mut Ui, row: &QuestionRow) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let (icon, color) = match row.outcome {
            Outcome::Correct => ("✅", band_color(ScoreBand::Good)),
            Outcome::Unanswered => ("⭕", band_color(ScoreBand::Fair)),
            Outcome::Incorrect | Outcome::Mismatched => ("❌", band_color(ScoreBand::Poor)),
        };
        ui.label(RichText::new(format!("{icon} {}. {}", row.number, row.text)).strong().color(color));
        if let Some(url) = &row.image_url {
            ui.hyperlink_to("🖼 Question image", url);
        }
        ui.add_space(4.0);

        for (i, option) in row.options.iter().enumerate() {
            let is_correct = i == row.correct_index;
            let is_pick = row.selected == Some(i);
            let text = match (is_correct, is_pick) {
                (true, true) => RichText::new(format!("✔ {option}  (your answer)")).color(band_color(ScoreBand::Good)),
                (true, false) => RichText::new(format!("✔ {option}")).color(band_color(ScoreBand::Good)),
                (false, true) => RichText::new(format!("✖ {option}  (your answer)")).color(band_color(ScoreBand::Poor)),
                (false, false) => RichText::new(format!("   {option}")),
            };
            ui.label(text);
        }
        if row.selected.is_none() {
            ui.label(RichText::new("You did not answer this question.").italics());
        }

        ui.add_space(4.0);
        ui.label(format!("💡 {}", row.explanation));
    });
    ui.add_space(6.0);
}

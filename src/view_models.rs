// src/view_models.rs

use crate::data::QuestionBank;
use crate::model::{QuizAttempt, percentage};
use crate::scoring::{Outcome, ScoreBand, grade};
use chrono::{DateTime, Local, TimeZone};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug)]
pub struct CategoryInfo {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub question_count: usize,
    pub attempts: usize,
    pub last_percentage: Option<u32>,
}

impl CategoryInfo {
    pub fn label(&self) -> String {
        match self.last_percentage {
            Some(p) => format!("{} ({} questions, last {}%)", self.name, self.question_count, p),
            None => format!("{} ({} questions)", self.name, self.question_count),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultSummary {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub band: ScoreBand,
}

impl ResultSummary {
    pub fn of(attempt: &QuizAttempt) -> Self {
        let percentage = attempt.percentage();
        Self {
            score: attempt.score,
            total: attempt.total_questions,
            percentage,
            band: ScoreBand::for_percentage(percentage),
        }
    }
}

/// One answered question as shown in results and review.
#[derive(Clone, Debug)]
pub struct QuestionRow {
    pub number: usize, // 1-based position in the attempt
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub outcome: Outcome,
    pub explanation: String,
    pub image_url: Option<String>,
}

/// Joins an attempt's answers with the bank. Answers whose question is no
/// longer in the bank are skipped.
pub fn question_rows(attempt: &QuizAttempt, bank: &QuestionBank) -> Vec<QuestionRow> {
    attempt
        .answers
        .iter()
        .enumerate()
        .filter_map(|(i, answer)| {
            let question = bank.question(&answer.question_id)?;
            Some(QuestionRow {
                number: i + 1,
                text: question.text.clone(),
                options: question.options.clone(),
                selected: answer.selected_answer_index,
                correct_index: question.correct_index,
                outcome: grade(answer, question),
                explanation: question.explanation.clone(),
                image_url: question.image_url.clone(),
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRow {
    pub index: usize, // position in the newest-first history
    pub date: String,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryProgress {
    pub slug: String,
    pub name: String,
    pub attempts: Vec<AttemptRow>,
    pub best_percentage: u32,
    pub latest_percentage: u32,
    pub average_percentage: u32,
    /// Percentages oldest to newest.
    pub trend: Vec<u32>,
}

fn attempt_rows(history: &[QuizAttempt]) -> Vec<AttemptRow> {
    history
        .iter()
        .enumerate()
        .map(|(index, a)| AttemptRow {
            index,
            date: format_date(a.date),
            score: a.score,
            total: a.total_questions,
            percentage: a.percentage(),
        })
        .collect()
}

/// Per-category statistics, in bank category order. Categories the bank no
/// longer knows come last, by slug.
pub fn progress_overview(
    all: &BTreeMap<String, Vec<QuizAttempt>>,
    bank: &QuestionBank,
) -> Vec<CategoryProgress> {
    let mut slugs: Vec<&str> = bank
        .categories
        .iter()
        .map(|c| c.slug.as_str())
        .filter(|slug| all.contains_key(*slug))
        .collect();
    slugs.extend(
        all.keys()
            .map(String::as_str)
            .filter(|slug| bank.category(slug).is_none()),
    );

    slugs
        .into_iter()
        .filter_map(|slug| {
            let history = all.get(slug)?;
            let latest = history.first()?;
            let percentages: Vec<u32> = history.iter().map(QuizAttempt::percentage).collect();
            let score_sum: u32 = history.iter().map(|a| a.score).sum();
            let total_sum: u32 = history.iter().map(|a| a.total_questions).sum();

            Some(CategoryProgress {
                slug: slug.to_string(),
                name: bank.category_name(slug).to_string(),
                attempts: attempt_rows(history),
                best_percentage: percentages.iter().copied().max().unwrap_or(0),
                latest_percentage: latest.percentage(),
                average_percentage: percentage(score_sum, total_sum),
                trend: percentages.into_iter().rev().collect(),
            })
        })
        .collect()
}

pub fn category_infos(
    bank: &QuestionBank,
    all: &BTreeMap<String, Vec<QuizAttempt>>,
) -> Vec<CategoryInfo> {
    bank.categories
        .iter()
        .map(|c| {
            let history = all.get(&c.slug);
            CategoryInfo {
                slug: c.slug.clone(),
                name: c.name.clone(),
                description: c.description.clone(),
                question_count: bank.questions_for(&c.slug).len(),
                attempts: history.map_or(0, Vec::len),
                last_percentage: history.and_then(|h| h.first()).map(QuizAttempt::percentage),
            }
        })
        .collect()
}

/// Epoch milliseconds as local `YYYY-MM-DD HH:MM`.
pub fn format_date(millis: i64) -> String {
    format_date_in(millis, &Local)
}

fn format_date_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown date".to_owned(),
    }
}

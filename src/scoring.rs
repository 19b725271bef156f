use crate::model::{NewAttempt, Question, UserAnswer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
    /// The answer does not belong to the question at its position.
    Mismatched,
}

/// Grades one answer against the question at the same position.
pub fn grade(answer: &UserAnswer, question: &Question) -> Outcome {
    if answer.question_id != question.id {
        return Outcome::Mismatched;
    }
    match answer.selected_answer_index {
        None => Outcome::Unanswered,
        Some(idx) if question.is_correct(Some(idx)) => Outcome::Correct,
        Some(_) => Outcome::Incorrect,
    }
}

/// Counts correct answers, pairing `answers[i]` with `questions[i]`.
///
/// Positions past the shorter sequence, answers pointing at a different
/// question and out-of-range selections all count as incorrect.
pub fn score(answers: &[UserAnswer], questions: &[Question]) -> u32 {
    answers
        .iter()
        .zip(questions)
        .filter(|(a, q)| grade(a, q) == Outcome::Correct)
        .count() as u32
}

/// Builds the unstamped attempt for a finished answer sheet.
pub fn build_attempt(category: &str, answers: Vec<UserAnswer>, questions: &[Question]) -> NewAttempt {
    NewAttempt {
        score: score(&answers, questions),
        total_questions: answers.len() as u32,
        answers,
        category: category.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            ScoreBand::Good
        } else if percentage >= 50 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

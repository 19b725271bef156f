use serde::{Deserialize, Serialize};

/// A subject category shown on the home screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    #[serde(rename = "questionText")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_index: usize,
    pub explanation: String,
    pub category: String,
    #[serde(default, rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Question {
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected.is_some_and(|idx| idx == self.correct_index && idx < self.options.len())
    }
}

/// The user's selection for one question; `None` means unanswered.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: String,
    pub selected_answer_index: Option<usize>,
}

impl UserAnswer {
    pub fn unanswered(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_answer_index: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected_answer_index.is_some()
    }
}

/// A scored attempt that has not been stamped with a date yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAttempt {
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<UserAnswer>,
    pub category: String,
}

impl NewAttempt {
    pub fn stamped(self, date: i64) -> QuizAttempt {
        QuizAttempt {
            date,
            score: self.score,
            total_questions: self.total_questions,
            answers: self.answers,
            category: self.category,
        }
    }
}

/// A finalized attempt as persisted in the attempt history.
///
/// `date` is milliseconds since the Unix epoch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub date: i64,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<UserAnswer>,
    pub category: String,
}

impl QuizAttempt {
    /// Rounded percentage, 0 for an empty attempt.
    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total_questions)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    /// Same attempt, ignoring the timestamp.
    pub fn same_content(&self, other: &NewAttempt) -> bool {
        self.score == other.score
            && self.total_questions == other.total_questions
            && self.answers == other.answers
            && self.category == other.category
    }
}

pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}

/// Who is signed in. Only members get a storage namespace.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Member,
    Admin,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    SignIn,
    Home,
    Quiz,
    Results,
    Progress,
    Review,
    ReviewAttempt,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::SignIn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_index: usize) -> Question {
        Question {
            id: "phy-1".into(),
            text: "What is the SI unit of electric current?".into(),
            options: vec!["Volt".into(), "Ampere".into(), "Ohm".into()],
            correct_index,
            explanation: "Ampere.".into(),
            category: "physics".into(),
            image_url: None,
        }
    }

    #[test]
    fn unanswered_and_out_of_range_are_never_correct() {
        let q = question(1);
        assert!(q.is_correct(Some(1)));
        assert!(!q.is_correct(None));
        assert!(!q.is_correct(Some(7)));

        // A malformed question whose correct index is past the options.
        let broken = question(5);
        assert!(!broken.is_correct(Some(5)));
    }

    #[test]
    fn percentage_rounds_and_handles_empty() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn attempt_json_uses_camel_case_fields() {
        let attempt = NewAttempt {
            score: 1,
            total_questions: 1,
            answers: vec![UserAnswer {
                question_id: "phy-1".into(),
                selected_answer_index: None,
            }],
            category: "physics".into(),
        }
        .stamped(42);

        let json = serde_json::to_string(&attempt).unwrap();
        assert!(json.contains("\"totalQuestions\":1"));
        assert!(json.contains("\"questionId\":\"phy-1\""));
        assert!(json.contains("\"selectedAnswerIndex\":null"));
        assert!(json.contains("\"date\":42"));
    }
}

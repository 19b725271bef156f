// src/data.rs

use crate::model::{Category, Question};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("question bank is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("question {id} needs at least 2 options, found {found}")]
    TooFewOptions { id: String, found: usize },
    #[error("question {id} marks option {index} as correct but only has {options} options")]
    CorrectIndexOutOfRange {
        id: String,
        index: usize,
        options: usize,
    },
    #[error("duplicate question id {0}")]
    DuplicateId(String),
    #[error("question {id} belongs to unknown category {category}")]
    UnknownCategory { id: String, category: String },
}

/// Questions grouped by category, read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    pub categories: Vec<Category>,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn from_yaml(source: &str) -> Result<Self, BankError> {
        let bank: QuestionBank = serde_yaml::from_str(source)?;
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), BankError> {
        let slugs: HashSet<&str> = self.categories.iter().map(|c| c.slug.as_str()).collect();
        let mut seen = HashSet::new();

        for q in &self.questions {
            if q.options.len() < 2 {
                return Err(BankError::TooFewOptions {
                    id: q.id.clone(),
                    found: q.options.len(),
                });
            }
            if q.correct_index >= q.options.len() {
                return Err(BankError::CorrectIndexOutOfRange {
                    id: q.id.clone(),
                    index: q.correct_index,
                    options: q.options.len(),
                });
            }
            if !seen.insert(q.id.as_str()) {
                return Err(BankError::DuplicateId(q.id.clone()));
            }
            if !slugs.contains(q.category.as_str()) {
                return Err(BankError::UnknownCategory {
                    id: q.id.clone(),
                    category: q.category.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Display name for a slug, falling back to the slug itself.
    pub fn category_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.category(slug).map(|c| c.name.as_str()).unwrap_or(slug)
    }

    /// Questions of one category in bank order.
    pub fn questions_for(&self, slug: &str) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.category == slug)
            .cloned()
            .collect()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Loads the question bank from the embedded YAML.
pub fn read_bank_embedded() -> QuestionBank {
    let file_content = include_str!("data/questions.yaml");
    QuestionBank::from_yaml(file_content).expect("Embedded question bank is invalid")
}

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_STORAGE_PATH: &str = "boardprep_storage.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON file backing attempt history on native builds.
    pub storage_path: String,
    /// Questions per quiz; `None` uses the whole category.
    pub questions_per_quiz: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            #[cfg(target_arch = "wasm32")]
            storage_path: String::new(),
            questions_per_quiz: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `BOARDPREP_STORAGE_PATH` and
    /// `BOARDPREP_QUESTIONS_PER_QUIZ`. The web build always uses defaults.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::from_lookup(|key| std::env::var(key).ok())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("BOARDPREP_STORAGE_PATH").filter(|s| !s.trim().is_empty()) {
            config.storage_path = path.trim().to_string();
        }

        if let Some(raw) = lookup("BOARDPREP_QUESTIONS_PER_QUIZ") {
            match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    log::warn!("Ignoring BOARDPREP_QUESTIONS_PER_QUIZ={raw:?}, expected a positive number")
                }
                Ok(n) => config.questions_per_quiz = Some(n),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BOARDPREP_STORAGE_PATH", " /tmp/history.json "),
            ("BOARDPREP_QUESTIONS_PER_QUIZ", "3"),
        ]));
        assert_eq!(config.storage_path, "/tmp/history.json");
        assert_eq!(config.questions_per_quiz, Some(3));
    }

    #[test]
    fn ignores_bad_question_count() {
        for raw in ["0", "-2", "many"] {
            let config =
                AppConfig::from_lookup(lookup(&[("BOARDPREP_QUESTIONS_PER_QUIZ", raw)]));
            assert_eq!(config.questions_per_quiz, None);
        }
    }
}

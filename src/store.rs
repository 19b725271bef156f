// src/store.rs

use crate::model::{NewAttempt, QuizAttempt};
use crate::storage::{KeyValueStore, StorageError};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const STORAGE_KEY_PREFIX: &str = "boardPrepPro";
/// Attempts kept per (user, category); the oldest is dropped beyond this.
pub const MAX_ATTEMPTS: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no member is signed in, progress is not saved")]
    NotSignedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode attempt history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Opaque per-user namespace for storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Lower-cases the name and collapses whitespace runs into `_`.
    /// Returns `None` for a blank name.
    pub fn from_name(name: &str) -> Option<Self> {
        let sanitized = name
            .split_whitespace()
            .map(|part| part.to_lowercase().replace(':', "_"))
            .collect::<Vec<_>>()
            .join("_");
        if sanitized.is_empty() {
            None
        } else {
            Some(Self(sanitized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn history_key(user: &UserId, category: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}:{user}:history:{category}")
}

fn latest_key(user: &UserId, category: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}:{user}:latest:{category}")
}

fn manifest_key(user: &UserId) -> String {
    format!("{STORAGE_KEY_PREFIX}:{user}:categories")
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Per-user, per-category attempt history on top of a [`KeyValueStore`].
///
/// Reads never fail: storage or decoding problems are logged and read as
/// "no history". Only [`AttemptStore::append`] and [`AttemptStore::clear`]
/// report errors, so the caller can tell the user progress was not saved.
///
/// Layout per user:
/// - `boardPrepPro:<user>:history:<category>`: JSON array, newest first
/// - `boardPrepPro:<user>:latest:<category>`: JSON of the newest attempt
/// - `boardPrepPro:<user>:categories`: JSON array of categories with history
pub struct AttemptStore<S> {
    storage: S,
    user: Option<UserId>,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> AttemptStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
            clock: now_millis,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn signed_in(mut self, user: UserId) -> Self {
        self.sign_in(user);
        self
    }

    pub fn sign_in(&mut self, user: UserId) {
        log::info!("Attempt history namespace set to {user}");
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("Attempt history namespace {user} released");
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn now(&self) -> i64 {
        (self.clock)()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Stamps `attempt`, puts it at the front of the category history and
    /// trims the history to [`MAX_ATTEMPTS`].
    pub fn append(&mut self, category: &str, attempt: NewAttempt) -> Result<QuizAttempt, StoreError> {
        let user = self.user.clone().ok_or(StoreError::NotSignedIn)?;
        let attempt = attempt.stamped(self.now());

        let mut history = self.attempts(category);
        history.insert(0, attempt.clone());
        history.truncate(MAX_ATTEMPTS);
        let history_json = serde_json::to_string(&history)?;
        let latest_json = serde_json::to_string(&attempt)?;

        let result = self.write_all(&user, category, history_json, latest_json);
        match &result {
            Ok(()) => log::info!(
                "Saved {category} attempt for {user}: {}/{} ({} kept)",
                attempt.score,
                attempt.total_questions,
                history.len()
            ),
            Err(err) => log::error!("Could not save {category} attempt for {user}: {err}"),
        }
        result.map(|()| attempt)
    }

    fn write_all(
        &mut self,
        user: &UserId,
        category: &str,
        history_json: String,
        latest_json: String,
    ) -> Result<(), StoreError> {
        // Manifest first: a listed category with no history reads as empty.
        match self.load_manifest(user) {
            Ok((mut categories, stale)) => {
                let missing = !categories.iter().any(|c| c == category);
                if missing {
                    categories.push(category.to_owned());
                }
                if missing || stale {
                    self.storage
                        .set(&manifest_key(user), serde_json::to_string(&categories)?)?;
                }
            }
            // Overwriting it now would drop every other category.
            Err(err) => log::error!("Leaving manifest of {user} untouched: {err}"),
        }

        self.storage.set(&history_key(user, category), history_json)?;

        let latest = latest_key(user, category);
        if let Err(err) = self.storage.set(&latest, latest_json) {
            // A stale pointer would hide the new attempt; drop it and let
            // reads fall back to the history head.
            log::warn!("Could not update latest pointer {latest}: {err}");
            if let Err(err) = self.storage.remove(&latest) {
                log::error!("Could not drop stale latest pointer {latest}: {err}");
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Full history for `category`, newest first.
    pub fn attempts(&self, category: &str) -> Vec<QuizAttempt> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        self.read_json(&history_key(user, category)).unwrap_or_default()
    }

    /// Newest attempt, via the latest pointer when it is readable.
    pub fn latest_attempt(&self, category: &str) -> Option<QuizAttempt> {
        let user = self.user.as_ref()?;
        self.read_json::<QuizAttempt>(&latest_key(user, category))
            .or_else(|| self.attempts(category).into_iter().next())
    }

    /// Attempt at `index` in the newest-first history.
    pub fn attempt_at(&self, category: &str, index: usize) -> Option<QuizAttempt> {
        self.attempts(category).into_iter().nth(index)
    }

    /// Categories the current user has history for, in first-attempt order.
    pub fn categories(&self) -> Vec<String> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        match self.load_manifest(user) {
            Ok((categories, _)) => categories,
            Err(err) => {
                log::error!("Could not list categories of {user}: {err}");
                Vec::new()
            }
        }
    }

    /// Manifest of `user`. A manifest that cannot be read or decoded is
    /// rebuilt from the history keys and flagged stale so the next write
    /// repairs it. Fails only when that rebuild is impossible too.
    fn load_manifest(&self, user: &UserId) -> Result<(Vec<String>, bool), StorageError> {
        let key = manifest_key(user);
        match self.storage.get(&key) {
            Ok(None) => return Ok((Vec::new(), false)),
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(categories) => return Ok((categories, false)),
                Err(err) => log::warn!("Rebuilding corrupt manifest {key}: {err}"),
            },
            Err(err) => log::warn!("Rebuilding unreadable manifest {key}: {err}"),
        }
        let prefix = format!("{STORAGE_KEY_PREFIX}:{user}:history:");
        let categories = self
            .storage
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_owned))
            .collect();
        Ok((categories, true))
    }

    /// Every non-empty category history of the current user.
    pub fn all_attempts(&self) -> BTreeMap<String, Vec<QuizAttempt>> {
        self.categories()
            .into_iter()
            .filter_map(|category| {
                let attempts = self.attempts(&category);
                (!attempts.is_empty()).then_some((category, attempts))
            })
            .collect()
    }

    /// Removes every history, latest pointer and the manifest of the current user.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let user = self.user.clone().ok_or(StoreError::NotSignedIn)?;
        for category in self.categories() {
            self.storage.remove(&history_key(&user, &category))?;
            self.storage.remove(&latest_key(&user, &category))?;
        }
        self.storage.remove(&manifest_key(&user))?;
        log::info!("Cleared attempt history for {user}");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::error!("Could not read {key}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Ignoring corrupt entry {key}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserAnswer;
    use crate::storage::MemoryStore;

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    fn store_for(name: &str) -> AttemptStore<MemoryStore> {
        AttemptStore::new(MemoryStore::new())
            .with_clock(fixed_clock)
            .signed_in(UserId::from_name(name).unwrap())
    }

    fn attempt(category: &str, score: u32) -> NewAttempt {
        NewAttempt {
            score,
            total_questions: 20,
            answers: vec![UserAnswer {
                question_id: format!("{category}-1"),
                selected_answer_index: Some(score as usize % 4),
            }],
            category: category.into(),
        }
    }

    /// Storage whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
        fail_reads: bool,
        fail_removes: bool,
        fail_keys: bool,
        fail_key_containing: Option<&'static str>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads {
                return Err(StorageError::Unavailable("reads disabled".into()));
            }
            self.inner.get(key)
        }
        fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            let targeted = self
                .fail_key_containing
                .is_some_and(|needle| key.contains(needle));
            if self.fail_writes || targeted {
                return Err(StorageError::Backend("QuotaExceededError".into()));
            }
            self.inner.set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if self.fail_removes {
                return Err(StorageError::Backend("remove refused".into()));
            }
            self.inner.remove(key)
        }
        fn keys(&self) -> Result<Vec<String>, StorageError> {
            if self.fail_keys {
                return Err(StorageError::Unavailable("enumeration disabled".into()));
            }
            self.inner.keys()
        }
    }

    #[test]
    fn user_id_is_sanitized() {
        assert_eq!(UserId::from_name("  Ada   Lovelace ").unwrap().as_str(), "ada_lovelace");
        assert_eq!(UserId::from_name("a:b").unwrap().as_str(), "a_b");
        assert!(UserId::from_name("   ").is_none());
    }

    #[test]
    fn append_then_latest_round_trips() {
        let mut store = store_for("u1");
        let new = attempt("physics", 7);

        let saved = store.append("physics", new.clone()).unwrap();
        assert_eq!(saved.date, fixed_clock());

        let latest = store.latest_attempt("physics").unwrap();
        assert!(latest.same_content(&new));
        assert_eq!(latest, saved);
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let mut store = store_for("u1");
        for score in 0..15 {
            store.append("physics", attempt("physics", score)).unwrap();
        }

        let scores: Vec<u32> = store.attempts("physics").iter().map(|a| a.score).collect();
        assert_eq!(scores, [14, 13, 12, 11, 10, 9, 8, 7, 6, 5]);
    }

    #[test]
    fn reads_are_idempotent() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 3)).unwrap();
        store.append("physics", attempt("physics", 4)).unwrap();
        assert_eq!(store.attempts("physics"), store.attempts("physics"));
    }

    #[test]
    fn users_do_not_see_each_other() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 1)).unwrap();

        store.sign_in(UserId::from_name("u2").unwrap());
        store.append("physics", attempt("physics", 2)).unwrap();
        assert_eq!(store.attempts("physics").len(), 1);
        assert_eq!(store.attempts("physics")[0].score, 2);

        store.sign_in(UserId::from_name("u1").unwrap());
        let u1 = store.attempts("physics");
        assert_eq!(u1.len(), 1);
        assert_eq!(u1[0].score, 1);
    }

    #[test]
    fn latest_falls_back_to_history_head() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 1)).unwrap();
        store.append("physics", attempt("physics", 2)).unwrap();

        let user = store.user().unwrap().clone();
        let pointer = latest_key(&user, "physics");

        store.storage_mut().remove(&pointer).unwrap();
        assert_eq!(store.latest_attempt("physics").unwrap().score, 2);

        store.storage_mut().set(&pointer, "{broken".into()).unwrap();
        assert_eq!(store.latest_attempt("physics").unwrap().score, 2);
    }

    #[test]
    fn missing_history_reads_as_none() {
        let store = store_for("u1");
        assert!(store.attempts("history").is_empty());
        assert!(store.latest_attempt("history").is_none());
        assert!(store.attempt_at("history", 0).is_none());
    }

    #[test]
    fn attempt_at_indexes_newest_first() {
        let mut store = store_for("u1");
        for score in [5, 6, 7] {
            store.append("biology", attempt("biology", score)).unwrap();
        }
        assert_eq!(store.attempt_at("biology", 0).unwrap().score, 7);
        assert_eq!(store.attempt_at("biology", 2).unwrap().score, 5);
        assert!(store.attempt_at("biology", 3).is_none());
    }

    #[test]
    fn all_attempts_lists_categories_without_bookkeeping_keys() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 1)).unwrap();
        store.append("history", attempt("history", 2)).unwrap();
        store.append("physics", attempt("physics", 3)).unwrap();

        let all = store.all_attempts();
        assert_eq!(all.keys().collect::<Vec<_>>(), ["history", "physics"]);
        assert_eq!(all["physics"].len(), 2);
        assert_eq!(all["history"].len(), 1);
        assert_eq!(store.categories(), ["physics", "history"]);
    }

    #[test]
    fn signed_out_reads_empty_and_refuses_writes() {
        let mut store = AttemptStore::new(MemoryStore::new());
        assert!(store.attempts("physics").is_empty());
        assert!(store.all_attempts().is_empty());
        assert!(matches!(
            store.append("physics", attempt("physics", 1)),
            Err(StoreError::NotSignedIn)
        ));
        assert!(store.storage().keys().unwrap().is_empty());
    }

    #[test]
    fn sign_out_hides_history() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 1)).unwrap();
        store.sign_out();
        assert!(store.attempts("physics").is_empty());
        assert!(store.latest_attempt("physics").is_none());
    }

    #[test]
    fn failed_write_is_reported_and_history_unchanged() {
        let mut store = AttemptStore::new(FlakyStore::default())
            .with_clock(fixed_clock)
            .signed_in(UserId::from_name("u1").unwrap());
        store.append("physics", attempt("physics", 1)).unwrap();

        store.storage_mut().fail_writes = true;
        let err = store.append("physics", attempt("physics", 2)).unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Backend(_))));

        store.storage_mut().fail_writes = false;
        let scores: Vec<u32> = store.attempts("physics").iter().map(|a| a.score).collect();
        assert_eq!(scores, [1]);
        assert_eq!(store.latest_attempt("physics").unwrap().score, 1);
    }

    #[test]
    fn failed_pointer_write_does_not_leave_stale_latest() {
        let mut store = AttemptStore::new(FlakyStore::default())
            .with_clock(fixed_clock)
            .signed_in(UserId::from_name("u1").unwrap());
        store.append("physics", attempt("physics", 1)).unwrap();

        store.storage_mut().fail_key_containing = Some(":latest:");
        store.append("physics", attempt("physics", 2)).unwrap();
        assert_eq!(store.latest_attempt("physics").unwrap().score, 2);
    }

    #[test]
    fn stuck_pointer_is_reported_as_failed_save() {
        let mut store = AttemptStore::new(FlakyStore::default())
            .with_clock(fixed_clock)
            .signed_in(UserId::from_name("u1").unwrap());
        store.append("physics", attempt("physics", 1)).unwrap();

        store.storage_mut().fail_key_containing = Some(":latest:");
        store.storage_mut().fail_removes = true;
        let err = store.append("physics", attempt("physics", 2)).unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Backend(_))));
    }

    #[test]
    fn corrupt_manifest_is_rebuilt_from_history_keys() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 1)).unwrap();
        store.append("history", attempt("history", 2)).unwrap();
        let user = store.user().unwrap().clone();
        store
            .storage_mut()
            .set(&manifest_key(&user), "{corrupt".into())
            .unwrap();

        assert_eq!(store.all_attempts().len(), 2);

        store.append("biology", attempt("biology", 3)).unwrap();
        let all = store.all_attempts();
        assert_eq!(all.keys().collect::<Vec<_>>(), ["biology", "history", "physics"]);
        assert_eq!(all["physics"].len(), 1);

        let raw = store.storage().get(&manifest_key(&user)).unwrap().unwrap();
        let repaired: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(repaired.len(), 3);
    }

    #[test]
    fn unrecoverable_manifest_is_left_alone() {
        let mut store = AttemptStore::new(FlakyStore::default())
            .with_clock(fixed_clock)
            .signed_in(UserId::from_name("u1").unwrap());
        store.append("physics", attempt("physics", 1)).unwrap();
        let user = store.user().unwrap().clone();
        store
            .storage_mut()
            .inner
            .set(&manifest_key(&user), "{corrupt".into())
            .unwrap();

        store.storage_mut().fail_keys = true;
        store.append("history", attempt("history", 2)).unwrap();
        let raw = store.storage().get(&manifest_key(&user)).unwrap().unwrap();
        assert_eq!(raw, "{corrupt");

        store.storage_mut().fail_keys = false;
        let all = store.all_attempts();
        assert_eq!(all.keys().collect::<Vec<_>>(), ["history", "physics"]);
    }

    #[test]
    fn unreadable_storage_degrades_to_empty() {
        let mut store = AttemptStore::new(FlakyStore::default())
            .signed_in(UserId::from_name("u1").unwrap());
        store.append("physics", attempt("physics", 1)).unwrap();

        store.storage_mut().fail_reads = true;
        assert!(store.attempts("physics").is_empty());
        assert!(store.latest_attempt("physics").is_none());
        assert!(store.all_attempts().is_empty());
    }

    #[test]
    fn corrupt_history_is_replaced_on_next_append() {
        let mut store = store_for("u1");
        let user = store.user().unwrap().clone();
        store
            .storage_mut()
            .set(&history_key(&user, "physics"), "not json".into())
            .unwrap();

        assert!(store.attempts("physics").is_empty());
        store.append("physics", attempt("physics", 4)).unwrap();
        assert_eq!(store.attempts("physics").len(), 1);
    }

    #[test]
    fn clear_removes_only_current_user() {
        let mut store = store_for("u1");
        store.append("physics", attempt("physics", 1)).unwrap();
        store.append("history", attempt("history", 1)).unwrap();
        store.sign_in(UserId::from_name("u2").unwrap());
        store.append("physics", attempt("physics", 2)).unwrap();

        store.sign_in(UserId::from_name("u1").unwrap());
        store.clear().unwrap();
        assert!(store.all_attempts().is_empty());
        assert!(store.latest_attempt("physics").is_none());

        store.sign_in(UserId::from_name("u2").unwrap());
        assert_eq!(store.attempts("physics").len(), 1);
        let keys = store.storage().keys().unwrap();
        assert!(keys.iter().all(|k| k.contains(":u2:")));
    }
}

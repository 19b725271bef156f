use crate::config::AppConfig;
use crate::data::{QuestionBank, read_bank_embedded};
use crate::model::{AppState, QuizAttempt, Role};
use crate::session::QuizSession;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::store::AttemptStore;
use serde::{Deserialize, Serialize};

// Submodules
pub mod actions;
pub mod navigation;
pub mod queries;

pub type DynStore = Box<dyn KeyValueStore>;

/// Small UI preferences kept through eframe's own persistence.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Preferences {
    pub last_user: String,
    pub last_role: Role,
    pub dark_mode: bool,
}

/// What the results screen shows for the quiz just submitted.
#[derive(Clone, Debug)]
pub struct ResultsView {
    pub category: String,
    pub attempt: QuizAttempt,
    pub saved: bool,
}

/// Attempt opened from the review list.
#[derive(Clone, Debug)]
pub struct ReviewSelection {
    pub category: String,
    pub index: usize,
    pub attempt: QuizAttempt,
}

#[derive(Clone, Debug)]
pub struct SignedInUser {
    pub name: String,
    pub role: Role,
}

pub struct BoardPrepApp {
    pub prefs: Preferences,
    pub config: AppConfig,
    pub bank: QuestionBank,
    pub store: AttemptStore<DynStore>,
    pub state: AppState,
    pub user: Option<SignedInUser>,
    pub session: Option<QuizSession>,
    pub results: Option<ResultsView>,
    pub review: Option<ReviewSelection>,
    pub message: String,
    pub name_input: String,
    pub role_input: Role,
    pub confirm_clear: bool,
}

impl BoardPrepApp {
    pub fn new(config: AppConfig, storage: DynStore, prefs: Preferences) -> Self {
        Self::with_bank(config, storage, prefs, read_bank_embedded())
    }

    pub fn with_bank(
        config: AppConfig,
        storage: DynStore,
        prefs: Preferences,
        bank: QuestionBank,
    ) -> Self {
        log::info!(
            "Loaded {} questions in {} categories",
            bank.len(),
            bank.categories.len()
        );
        Self {
            name_input: prefs.last_user.clone(),
            role_input: prefs.last_role,
            prefs,
            config,
            bank,
            store: AttemptStore::new(storage),
            state: AppState::SignIn,
            user: None,
            session: None,
            results: None,
            review: None,
            message: String::new(),
            confirm_clear: false,
        }
    }

    /// Entry point used by eframe, restoring preferences from its storage.
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let prefs: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if prefs.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        let storage = open_storage(&config);
        Self::new(config, storage, prefs)
    }
}

/// Opens the configured history backend, falling back to memory so the quiz
/// stays usable when persistent storage is unavailable.
pub fn open_storage(config: &AppConfig) -> DynStore {
    #[cfg(not(target_arch = "wasm32"))]
    let opened = crate::storage::FileStore::open(&config.storage_path)
        .map(|store| Box::new(store) as DynStore);
    #[cfg(target_arch = "wasm32")]
    let opened = {
        let _ = config;
        crate::storage::LocalStorage::open().map(|store| Box::new(store) as DynStore)
    };

    match opened {
        Ok(store) => store,
        Err(err) => {
            log::error!("Persistent storage unavailable, history will not survive a restart: {err}");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn app() -> BoardPrepApp {
        BoardPrepApp::new(
            AppConfig::default(),
            Box::new(MemoryStore::new()),
            Preferences::default(),
        )
    }

    pub fn member_app(name: &str) -> BoardPrepApp {
        let mut app = app();
        app.name_input = name.to_string();
        app.role_input = Role::Member;
        app.sign_in();
        app
    }
}

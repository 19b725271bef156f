pub mod app;
pub mod config;
pub mod data;
pub mod model;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view_models;

pub use app::BoardPrepApp;

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod state;
pub mod ui;
pub mod view;

pub use api::{AttendanceApi, HttpAttendanceApi};
pub use app::router;
pub use config::Config;
pub use controller::ViewSyncController;
pub use state::AppState;

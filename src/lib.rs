pub mod app;
pub mod catalog;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use state::AppState;
pub use storage::{resolve_data_path, JsonFileStore};

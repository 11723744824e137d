pub mod app;
pub mod changelog;
pub mod channels;
pub mod color;
pub mod config;
pub mod discord;
pub mod errors;
pub mod handlers;
pub mod maps;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod supabase;
pub mod timeline;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_changelog;

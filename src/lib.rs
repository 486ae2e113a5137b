pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod history;
pub mod models;
pub mod owner;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;

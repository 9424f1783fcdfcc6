//! Countdown Widget - A single countdown timer served over HTTP
//!
//! The timer is a small state machine (idle, running, paused) driven by user
//! intents and a once-per-second ticker. An axum router acts as the
//! presentation layer, rendering the state and forwarding intents.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use timer::{format_time, TimerController};
pub use utils::signals::shutdown_signal;

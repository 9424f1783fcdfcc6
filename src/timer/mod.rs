//! Countdown timer module
//!
//! The state machine, its scheduling primitive, and the helpers the
//! presentation layer uses to render it.

pub mod controller;
pub mod format;
pub mod input;
pub mod ticker;

// Re-export main types
pub use controller::TimerController;
pub use format::format_time;
pub use input::{parse_duration, RejectReason, SetDurationOutcome};
pub use ticker::{ManualTicker, Ticker, TokioTicker, TICK_PERIOD};

pub mod config;
pub mod dispatch;
pub mod listener;
pub mod protocol;
pub mod worker;
mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};

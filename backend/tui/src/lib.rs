//! Terminal front end.
//!
//! `app` holds view state, `input` maps keys and pastes to actions,
//! `render` draws, `runner` owns the terminal and the event loop.

pub mod app;
pub mod input;
pub mod render;
pub mod runner;

pub use app::{Mode, TuiApp};
pub use runner::run;

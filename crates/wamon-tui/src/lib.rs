//! wamon-tui - Terminal UI for wamon
//!
//! Ratatui-based rendering, terminal event polling, and the main event
//! loop tying terminal input to the wamon-app update function.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;

// Re-export main entry point
pub use runner::run;

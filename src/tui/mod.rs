//! TUI module for the interactive bill-splitting interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Ui, Action, Transition)
//! - `update`: Pure transitions and registry effects
//! - `view`: Pure rendering
//! - `run`: Terminal effects and the event loop

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::{run, RunConfig};

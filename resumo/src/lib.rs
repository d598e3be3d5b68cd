mod app;
pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod logging;
pub mod validators;

pub use app::{App, CommandError};

//! Headless terminal front end: line commands in, text feed out.
mod app;
mod effects;
mod input;
mod ui;

pub use app::run_app;

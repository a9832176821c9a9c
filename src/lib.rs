pub mod api;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod players;
pub mod scoring;
pub mod settings;
pub mod tui;

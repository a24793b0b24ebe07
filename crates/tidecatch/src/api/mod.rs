pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod ui;

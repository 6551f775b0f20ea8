pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod core;
pub mod display;
pub mod fallback;
pub mod input;
pub mod models;
pub mod providers;
pub mod utils;

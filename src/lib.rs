pub mod app;
pub mod config;
pub mod scanner;
pub mod state;
pub mod tracker;

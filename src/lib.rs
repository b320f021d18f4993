pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod meals;
pub mod progress;
pub mod state;
pub mod storage;

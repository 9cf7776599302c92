pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod input;
pub mod reading;
pub mod storage;
pub mod ui;

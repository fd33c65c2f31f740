pub mod app;
pub mod catalog;
pub mod config;
pub mod models;
pub mod selection;
pub mod utils;
pub mod view;

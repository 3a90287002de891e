pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repository;
pub mod service;

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod projector;
pub mod server;

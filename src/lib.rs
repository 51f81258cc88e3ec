pub mod config;
pub mod constants;
pub mod db;
pub mod handlers;
pub mod server;
pub mod services;

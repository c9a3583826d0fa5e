pub mod admin;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod markdown;
pub mod models;
pub mod site;
pub mod upload;

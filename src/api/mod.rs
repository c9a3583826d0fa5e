pub mod client;
pub mod endpoints;

pub use client::{error_message, ApiClient, FetchOptions};

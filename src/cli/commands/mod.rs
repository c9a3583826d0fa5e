pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod projects;
pub mod skills;
pub mod upload;

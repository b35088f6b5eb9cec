// taskdeck-api: Async Rust client for the taskdeck REST backend.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod auth;
mod comments;
mod projects;
mod tasks;
mod team;

pub use client::ApiClient;
pub use error::Error;

// castmin-api: Async Rust client for the Opencast admin-ng REST API

pub mod acls;
pub mod auth;
pub mod client;
pub mod error;
pub mod events;
pub mod info;
pub mod models;
pub mod resources;
pub mod series;
pub mod themes;
pub mod transport;

pub use client::AdminClient;
pub use error::Error;
pub use models::{ListParams, Page};
pub use themes::NewTheme;

//! Radarr API client
//!
//! Thin JSON client for the Radarr v3 HTTP API.
//!
//! ## Module Structure
//!
//! - `auth` - Base URL and API key shared by every request
//! - `client` - `RadarrClient` with generic list/get/create/update/delete calls
//! - `error` - Client error type
//! - `models` - Wire shapes the provider inspects directly (envelope, field bag)
//! - `paths` - Endpoint paths

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod paths;

// Re-export main types
pub use auth::AuthContext;
pub use client::RadarrClient;
pub use error::{ClientError, ClientResult};
pub use models::{Field, ProviderResource, SystemStatus};

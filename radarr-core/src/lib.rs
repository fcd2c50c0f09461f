//! Radarr Core
//!
//! Engine-facing model shared by the Radarr provider: attribute values,
//! desired and observed state, attribute schemas, diagnostics and the
//! `Provider` trait.

pub mod provider;
pub mod resource;
pub mod schema;

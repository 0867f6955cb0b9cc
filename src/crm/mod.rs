//! # CRM Backend Module
//!
//! The search/CRUD collaborator behind the gateway and its HubSpot
//! implementation.

pub mod backend;
pub mod client;
pub mod errors;

pub use backend::{CrmBackend, Item, SearchResponse};
pub use client::HubSpotClient;
pub use errors::{CrmError, CrmResult};

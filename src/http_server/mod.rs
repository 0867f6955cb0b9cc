//! # CRM Gateway HTTP Server Module
//!
//! Combines all endpoint routers into a single axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/search/:collection` - Structured search with limit validation
//! - `/graphql` - Query text translation
//! - `/api/hubspot/*` - CRM CRUD proxy
//! - `/webhooks/*` - Inbound webhook receiver

pub mod errors;
pub mod graphql_routes;
pub mod observability_routes;
pub mod proxy_routes;
pub mod search_routes;
pub mod server;
pub mod webhook_routes;

pub use errors::{GatewayError, GatewayResult};
pub use server::{AppState, HttpServer};

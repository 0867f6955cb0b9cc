//! crmgate - bounded query translation in front of a CRM search API
//!
//! Query text and structured search bodies are validated locally against
//! the backend's limits before any request is sent.

pub mod cli;
pub mod config;
pub mod crm;
pub mod http_server;
pub mod observability;
pub mod query;

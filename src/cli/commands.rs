//! CLI command implementations
//!
//! `serve` owns the runtime and the logging subscriber. `translate` and
//! `validate` are local, one-shot, and never contact the CRM.

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};
use crate::config::GatewayConfig;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::query::{self, QueryError, SearchRequestInput};

/// Run the CLI with the given command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config),
        Command::Translate { query } => {
            let raw = match query {
                Some(q) => q,
                None => read_input()?,
            };
            translate(&raw)
        }
        Command::Validate { collection } => {
            let body = read_input()?;
            validate(&collection, &body)
        }
    }
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Load configuration and serve HTTP until stopped
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = GatewayConfig::load(config_path)?;
    init_logging(&config.log_filter);

    info!(config = %config_path.display(), "configuration loaded");

    let server = HttpServer::new(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Translate query text and print the resulting request
pub fn translate(raw: &str) -> CliResult<()> {
    report(translation_output(raw))
}

/// Validate a structured search body and print the bounded request
pub fn validate(collection: &str, body: &str) -> CliResult<()> {
    report(validation_output(collection, body))
}

fn report(outcome: Result<Value, (&'static str, String)>) -> CliResult<()> {
    match outcome {
        Ok(data) => write_response(data),
        Err((code, message)) => {
            write_error(code, &message)?;
            Err(CliError::rejected(message))
        }
    }
}

fn rejection(e: QueryError) -> (&'static str, String) {
    (e.code(), e.to_string())
}

pub(crate) fn translation_output(raw: &str) -> Result<Value, (&'static str, String)> {
    let translated = query::translate(raw).map_err(rejection)?;
    Ok(json!({
        "collection": translated.collection.as_str(),
        "request": translated.request,
    }))
}

pub(crate) fn validation_output(
    collection: &str,
    body: &str,
) -> Result<Value, (&'static str, String)> {
    query::validator::resolve_collection(collection).map_err(rejection)?;

    let input = if body.trim().is_empty() {
        SearchRequestInput::default()
    } else {
        serde_json::from_str(body)
            .map_err(|e| ("CRM_GATEWAY_INVALID_BODY", format!("Invalid request body: {}", e)))?
    };

    let validated = query::validate(collection, input).map_err(rejection)?;
    Ok(json!({
        "collection": validated.collection.as_str(),
        "request": validated.request,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_output() {
        let out = translation_output(
            r#"{ contacts(filter: { email__contains: "acme" }, limit: 5) { items { id email } } }"#,
        )
        .unwrap();
        assert_eq!(out["collection"], "contacts");
        assert_eq!(out["request"]["limit"], 5);
        assert_eq!(
            out["request"]["filterGroups"][0]["filters"][0]["operator"],
            "CONTAINS_TOKEN"
        );
    }

    #[test]
    fn test_translation_output_missing_collection() {
        let (code, _) = translation_output("{ widgets { items { id } } }").unwrap_err();
        assert_eq!(code, "CRM_QUERY_MISSING_COLLECTION");
    }

    #[test]
    fn test_validation_output_clamps_limit() {
        let out = validation_output("deals", r#"{"limit": 1000}"#).unwrap();
        assert_eq!(out["request"]["limit"], 200);
    }

    #[test]
    fn test_validation_output_unknown_collection() {
        let (code, message) = validation_output("widgets", "{}").unwrap_err();
        assert_eq!(code, "CRM_QUERY_UNSUPPORTED_ENDPOINT");
        assert!(message.contains("widgets"));
    }

    #[test]
    fn test_validation_output_bad_json() {
        let (code, _) = validation_output("contacts", "{ nope").unwrap_err();
        assert_eq!(code, "CRM_GATEWAY_INVALID_BODY");
    }
}

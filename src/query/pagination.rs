//! # Pagination Directives
//!
//! Extracts `limit:` and `offset:` directives from raw query text.

use std::sync::OnceLock;

use regex::Regex;

use super::limits::PAGE_SIZE_CAP;

/// Page size used when the query has no `limit:` directive
pub const DEFAULT_LIMIT: i64 = 10;

/// Page size and cursor requested by the query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub after: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            after: None,
        }
    }
}

fn limit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\blimit:\s*(-?\d+)").expect("limit pattern"))
}

fn offset_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\boffset:\s*(-?\d+)").expect("offset pattern"))
}

/// First integer following `re`, if it parses
fn directive(re: &Regex, raw: &str) -> Option<i64> {
    re.captures(raw).and_then(|c| c[1].parse().ok())
}

/// Extract pagination directives.
///
/// The limit is capped at the page size cap. Values below 1 are passed
/// through unchanged; whether to floor them is still undecided.
pub fn extract_pagination(raw: &str) -> Pagination {
    let limit = directive(limit_regex(), raw).unwrap_or(DEFAULT_LIMIT);
    let after = directive(offset_regex(), raw).map(|offset| offset.to_string());

    Pagination {
        limit: PAGE_SIZE_CAP.apply(limit),
        after,
    }
}

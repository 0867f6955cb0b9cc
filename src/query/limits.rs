//! # Search Limits
//!
//! Two kinds of rule bound a search request:
//! - hard caps reject the request when exceeded (filter complexity)
//! - soft caps clamp the value (page size)

use serde::Serialize;

/// A cap that rejects the request when exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardCap {
    pub name: &'static str,
    pub max: usize,
}

impl HardCap {
    /// Whether `count` stays within the cap
    pub fn allows(&self, count: usize) -> bool {
        count <= self.max
    }
}

/// A cap that silently lowers values above it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftCap {
    pub name: &'static str,
    pub max: i64,
}

impl SoftCap {
    /// Clamp `value` to the cap. Values below the cap are untouched.
    pub fn apply(&self, value: i64) -> i64 {
        value.min(self.max)
    }
}

pub const MAX_FILTER_GROUPS: HardCap = HardCap {
    name: "max_filter_groups",
    max: 5,
};

pub const MAX_FILTERS_PER_GROUP: HardCap = HardCap {
    name: "max_filters_per_group",
    max: 6,
};

pub const MAX_TOTAL_FILTERS: HardCap = HardCap {
    name: "max_total_filters",
    max: 18,
};

pub const PAGE_SIZE_CAP: SoftCap = SoftCap {
    name: "max_limit",
    max: 200,
};

/// Limits as reported to callers alongside a search
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LimitInfo {
    pub max_filter_groups: usize,
    pub max_filters_per_group: usize,
    pub max_total_filters: usize,
    pub max_limit: i64,
}

impl LimitInfo {
    pub fn current() -> Self {
        Self {
            max_filter_groups: MAX_FILTER_GROUPS.max,
            max_filters_per_group: MAX_FILTERS_PER_GROUP.max,
            max_total_filters: MAX_TOTAL_FILTERS.max,
            max_limit: PAGE_SIZE_CAP.max,
        }
    }
}

//! # Query Cost Accounting
//!
//! Synthetic cost points for a completed search, reported to callers as
//! advisory telemetry. Exceeding the budget never rejects a request.

use serde::Serialize;

/// Points for initiating one collection search
pub const SEARCH_COST: u64 = 300;

/// Points per object returned
pub const OBJECT_COST: u64 = 30;

/// Points per requested property that has a value on an object
pub const POPULATED_PROPERTY_COST: u64 = 3;

/// Points per requested property that is empty or absent on an object
pub const EMPTY_PROPERTY_COST: u64 = 1;

/// Advertised budget ceiling
pub const MAX_COST: u64 = 30_000;

/// Kind of downstream request being charged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    CollectionSearch,
}

impl RequestKind {
    pub fn cost(&self) -> u64 {
        match self {
            RequestKind::CollectionSearch => SEARCH_COST,
        }
    }
}

/// Used and maximum cost points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBudget {
    pub used: u64,
    pub max: u64,
}

impl CostBudget {
    pub fn exceeded(&self) -> bool {
        self.used > self.max
    }
}

/// Monotonic cost counter for one request
#[derive(Debug, Default)]
pub struct CostAccountant {
    used: u64,
}

impl CostAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charge_request(&mut self, kind: RequestKind) {
        self.used += kind.cost();
    }

    pub fn charge_object(&mut self) {
        self.used += OBJECT_COST;
    }

    pub fn charge_property(&mut self, populated: bool) {
        self.used += if populated {
            POPULATED_PROPERTY_COST
        } else {
            EMPTY_PROPERTY_COST
        };
    }

    pub fn budget(&self) -> CostBudget {
        CostBudget {
            used: self.used,
            max: MAX_COST,
        }
    }

    /// Cost of a whole response in one call.
    ///
    /// `populated_counts[i]` is the number of populated properties on
    /// object `i`; the rest of `properties_per_object` count as empty.
    pub fn account(
        kind: RequestKind,
        object_count: usize,
        properties_per_object: usize,
        populated_counts: &[usize],
    ) -> CostBudget {
        let mut accountant = Self::new();
        accountant.charge_request(kind);
        for index in 0..object_count {
            accountant.charge_object();
            let populated = populated_counts
                .get(index)
                .copied()
                .unwrap_or(0)
                .min(properties_per_object);
            for slot in 0..properties_per_object {
                accountant.charge_property(slot < populated);
            }
        }
        accountant.budget()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_objects_three_properties() {
        let budget = CostAccountant::account(RequestKind::CollectionSearch, 2, 3, &[2, 2]);
        assert_eq!(budget.used, 374);
        assert_eq!(budget.max, 30_000);
    }

    #[test]
    fn test_empty_response_costs_search_only() {
        let budget = CostAccountant::account(RequestKind::CollectionSearch, 0, 5, &[]);
        assert_eq!(budget.used, 300);
    }

    #[test]
    fn test_incremental_matches_bulk() {
        let mut acc = CostAccountant::new();
        acc.charge_request(RequestKind::CollectionSearch);
        acc.charge_object();
        acc.charge_property(true);
        acc.charge_property(false);
        assert_eq!(
            acc.budget(),
            CostAccountant::account(RequestKind::CollectionSearch, 1, 2, &[1])
        );
    }

    #[test]
    fn test_overrun_is_reported_not_enforced() {
        let budget = CostAccountant::account(RequestKind::CollectionSearch, 200, 100, &[100; 200]);
        assert!(budget.exceeded());
        assert_eq!(budget.used, 300 + 200 * 30 + 200 * 100 * 3);
    }
}

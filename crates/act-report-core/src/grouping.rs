//! Rule grouping over the catalog
//!
//! Iteration order for a whole run is the order in which rule identifiers are
//! first seen in the catalog. Matching is exact: no case folding, no trimming.

use crate::catalog::{RuleId, TestCaseCatalog};
use std::collections::HashSet;

/// Distinct rule identifiers, first-seen order, each exactly once
pub fn distinct_rule_ids(catalog: &TestCaseCatalog) -> Vec<RuleId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for test in catalog.test_cases() {
        if seen.insert(&test.rule_id) {
            ids.push(test.rule_id.clone());
        }
    }
    ids
}

/// URLs of every test case for `rule_id`, in catalog order
pub fn urls_for_rule(rule_id: &RuleId, catalog: &TestCaseCatalog) -> Vec<String> {
    catalog
        .test_cases()
        .iter()
        .filter(|test| &test.rule_id == rule_id)
        .map(|test| test.url.clone())
        .collect()
}

/// Restrict `rule_ids` to `selection`, keeping catalog order.
///
/// Returns the retained identifiers and the selected identifiers that do not
/// occur in the catalog.
pub fn select_rules(rule_ids: Vec<RuleId>, selection: &[RuleId]) -> (Vec<RuleId>, Vec<RuleId>) {
    let missing = selection
        .iter()
        .filter(|id| !rule_ids.contains(id))
        .cloned()
        .collect();
    let selected = rule_ids
        .into_iter()
        .filter(|id| selection.contains(id))
        .collect();
    (selected, missing)
}

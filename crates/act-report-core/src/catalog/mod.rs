//! Test-case catalog
//!
//! The catalog is the published list of ACT rule test cases. Each entry pairs a
//! rule identifier with the URL of one test fixture; everything else in the
//! published entries is ignored.

mod source;

pub use source::{CatalogClient, CatalogFile, TestCaseSource};

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ACT rule identifier, compared verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Create a rule identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One published test fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Rule the fixture belongs to
    pub rule_id: RuleId,
    /// Location of the fixture
    pub url: String,
}

impl TestCase {
    pub fn new(rule_id: impl Into<RuleId>, url: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            url: url.into(),
        }
    }
}

/// The loaded test cases, in published order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseCatalog {
    test_cases: Vec<TestCase>,
}

impl TestCaseCatalog {
    /// Build a catalog from already parsed test cases
    pub fn new(test_cases: Vec<TestCase>) -> Self {
        Self { test_cases }
    }

    /// Parse a catalog document.
    ///
    /// The document must carry a `testcases` array; an empty array is a valid
    /// catalog that yields a run over zero rules.
    pub fn from_value(document: serde_json::Value) -> CatalogResult<Self> {
        let serde_json::Value::Object(mut fields) = document else {
            return Err(CatalogError::Format(
                "catalog document is not a JSON object".into(),
            ));
        };

        let test_cases = fields
            .remove("testcases")
            .filter(|value| !value.is_null())
            .ok_or_else(|| CatalogError::Format("no `testcases` collection".into()))?;

        let test_cases: Vec<TestCase> = serde_json::from_value(test_cases)
            .map_err(|e| CatalogError::Format(format!("invalid `testcases` entry: {}", e)))?;

        Ok(Self { test_cases })
    }

    /// Parse a catalog document from raw bytes
    pub fn from_slice(bytes: &[u8]) -> CatalogResult<Self> {
        let document = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::Format(format!("catalog is not valid JSON: {}", e)))?;
        Self::from_value(document)
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_published_entries_and_ignores_extra_fields() {
        let catalog = TestCaseCatalog::from_value(json!({
            "name": "ACT-Rules community test cases",
            "count": 2,
            "testcases": [
                {
                    "ruleId": "b5c3f8",
                    "ruleName": "HTML page has lang attribute",
                    "testcaseId": "b24e0ae4c4c3c6a8d0d8c1e3b5a1b8e4a6c3d2e1",
                    "url": "https://www.w3.org/WAI/content-assets/wcag-act-rules/testcases/b5c3f8/1.html",
                    "expected": "passed"
                },
                {
                    "ruleId": "2779a5",
                    "url": "https://www.w3.org/WAI/content-assets/wcag-act-rules/testcases/2779a5/2.html"
                }
            ]
        }))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.test_cases()[0].rule_id, RuleId::from("b5c3f8"));
        assert!(catalog.test_cases()[1].url.ends_with("/2.html"));
    }

    #[test]
    fn empty_collection_is_not_an_error() {
        let catalog = TestCaseCatalog::from_value(json!({ "testcases": [] })).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_collection_is_a_format_error() {
        let err = TestCaseCatalog::from_value(json!({ "count": 0 })).unwrap_err();
        assert!(matches!(err, CatalogError::Format(_)));

        let err = TestCaseCatalog::from_value(json!({ "testcases": null })).unwrap_err();
        assert!(matches!(err, CatalogError::Format(_)));
    }

    #[test]
    fn entry_without_rule_id_is_a_format_error() {
        let err = TestCaseCatalog::from_value(json!({
            "testcases": [{ "url": "https://example.org/1.html" }]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("testcases"));
    }

    #[test]
    fn invalid_json_is_a_format_error() {
        let err = TestCaseCatalog::from_slice(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Format(_)));
    }

    #[test]
    fn rule_ids_compare_verbatim() {
        assert_ne!(RuleId::from("B5C3F8"), RuleId::from("b5c3f8"));
        assert_ne!(RuleId::from(" b5c3f8"), RuleId::from("b5c3f8"));
        assert_eq!(RuleId::from("b5c3f8").to_string(), "b5c3f8");
    }
}

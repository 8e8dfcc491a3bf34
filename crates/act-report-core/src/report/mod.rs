//! EARL report documents
//!
//! The report generator returns one fragment per rule: a single-key object
//! whose key is the rule-scoped report name and whose value is a JSON-LD
//! document with an `@graph` of per-test-case entries. [`ReportFragment`] makes
//! that envelope explicit instead of reaching for "the first value".

mod aggregate;
mod filter;

pub use aggregate::ReportAggregator;
pub use filter::is_implemented;

use crate::catalog::RuleId;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One `@graph` entry: the outcome of a rule over one test subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEntry {
    /// Recorded outcomes for this subject
    pub assertions: Vec<Value>,

    /// Every other field of the entry, passed through untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GraphEntry {
    pub fn with_assertions(assertions: Vec<Value>) -> Self {
        Self {
            assertions,
            fields: Map::new(),
        }
    }
}

/// A report document with its `@graph`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Envelope fields (`@context`, report metadata, ...)
    #[serde(flatten)]
    pub envelope: Map<String, Value>,

    #[serde(rename = "@graph")]
    pub graph: Vec<GraphEntry>,
}

impl ReportDocument {
    /// A document with no envelope fields and an empty graph
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of assertions across every graph entry
    pub fn assertion_count(&self) -> usize {
        self.graph.iter().map(|entry| entry.assertions.len()).sum()
    }
}

/// A rule-scoped report as returned by the report generator
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFragment {
    key: String,
    document: ReportDocument,
}

impl ReportFragment {
    pub fn new(key: impl Into<String>, document: ReportDocument) -> Self {
        Self {
            key: key.into(),
            document,
        }
    }

    /// Parse a generator response, which must be an object with exactly one key
    pub fn from_value(value: Value) -> EngineResult<Self> {
        let Value::Object(envelope) = value else {
            return Err(EngineError::MalformedReport(
                "report is not a JSON object".into(),
            ));
        };

        if envelope.len() != 1 {
            return Err(EngineError::MalformedReport(format!(
                "expected exactly one report key, found {}",
                envelope.len()
            )));
        }

        let Some((key, inner)) = envelope.into_iter().next() else {
            return Err(EngineError::MalformedReport("empty report".into()));
        };

        let document = serde_json::from_value(inner)
            .map_err(|e| EngineError::MalformedReport(format!("report `{}`: {}", key, e)))?;

        Ok(Self { key, document })
    }

    /// Rule-scoped report name
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn document(&self) -> &ReportDocument {
        &self.document
    }

    /// Strip the report name, keeping the document
    pub fn into_document(self) -> ReportDocument {
        self.document
    }

    pub fn to_value(&self) -> EngineResult<Value> {
        let document = serde_json::to_value(&self.document)
            .map_err(|e| EngineError::MalformedReport(e.to_string()))?;
        let mut envelope = Map::new();
        envelope.insert(self.key.clone(), document);
        Ok(Value::Object(envelope))
    }
}

/// Report modules to include in a generated report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportModules {
    pub act: bool,
    pub html: bool,
    pub css: bool,
    #[serde(rename = "best-practices")]
    pub best_practices: bool,
}

/// Options for one report generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub aggregated: bool,
    pub aggregated_name: RuleId,
    pub modules: ReportModules,
}

impl ReportOptions {
    /// Aggregated report restricted to the ACT rules module
    pub fn for_rule(rule_id: &RuleId) -> Self {
        Self {
            aggregated: true,
            aggregated_name: rule_id.clone(),
            modules: ReportModules {
                act: true,
                html: false,
                css: false,
                best_practices: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "b20e66": {
                "@context": "https://act-rules.github.io/earl-context.json",
                "@graph": [
                    {
                        "@type": "TestSubject",
                        "source": "https://example.org/1.html",
                        "assertions": [{ "@type": "Assertion", "result": { "outcome": "earl:passed" } }]
                    },
                    {
                        "@type": "TestSubject",
                        "source": "https://example.org/2.html",
                        "assertions": []
                    }
                ]
            }
        })
    }

    #[test]
    fn unwraps_single_key_envelope() {
        let fragment = ReportFragment::from_value(sample()).unwrap();
        assert_eq!(fragment.key(), "b20e66");
        assert_eq!(fragment.document().graph.len(), 2);
        assert_eq!(fragment.document().assertion_count(), 1);
        assert_eq!(
            fragment.document().envelope["@context"],
            json!("https://act-rules.github.io/earl-context.json")
        );
        assert_eq!(
            fragment.document().graph[0].fields["source"],
            json!("https://example.org/1.html")
        );
    }

    #[test]
    fn stripped_document_keeps_envelope_fields() {
        let document = ReportFragment::from_value(sample()).unwrap().into_document();
        let value = serde_json::to_value(&document).unwrap();
        assert!(value.get("b20e66").is_none());
        assert_eq!(value["@graph"][1]["source"], json!("https://example.org/2.html"));
        assert_eq!(value["@graph"][0]["assertions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn rewraps_under_its_key() {
        let fragment = ReportFragment::from_value(sample()).unwrap();
        assert_eq!(fragment.to_value().unwrap(), sample());
    }

    #[test]
    fn rejects_multiple_keys() {
        let err = ReportFragment::from_value(json!({
            "a": { "@graph": [] },
            "b": { "@graph": [] }
        }))
        .unwrap_err();
        assert!(matches!(err, EngineError::MalformedReport(_)));
    }

    #[test]
    fn rejects_empty_object_and_missing_graph() {
        assert!(ReportFragment::from_value(json!({})).is_err());
        assert!(ReportFragment::from_value(json!({ "a": { "@context": "x" } })).is_err());
        assert!(ReportFragment::from_value(json!(null)).is_err());
    }

    #[test]
    fn report_options_restrict_to_act_module() {
        let options = ReportOptions::for_rule(&"b20e66".into());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "aggregated": true,
                "aggregatedName": "b20e66",
                "modules": {
                    "act": true,
                    "html": false,
                    "css": false,
                    "best-practices": false
                }
            })
        );
    }
}

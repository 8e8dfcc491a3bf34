//! Rule-scoped evaluation jobs
//!
//! A job asks the engine to evaluate a set of fixture URLs against exactly one
//! ACT rule, so that each rule's implementation status is measured on its own.

use crate::catalog::RuleId;
use serde::{Deserialize, Serialize};

/// Shape of the job configuration handed to the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStyle {
    /// Explicit module selection and one parallel evaluation per URL
    #[default]
    Current,
    /// URLs and rule filter only; engine defaults apply
    Legacy,
}

/// Engine modules to execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteModules {
    pub act: bool,
}

/// ACT rules module filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFilter {
    pub rules: Vec<RuleId>,
}

/// Engine job configuration for one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationJob {
    /// Rule this job is scoped to
    #[serde(skip)]
    pub rule_id: RuleId,

    /// Fixture URLs for the rule
    pub urls: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute: Option<ExecuteModules>,

    #[serde(rename = "act-rules")]
    pub act_rules: RuleFilter,

    /// Fan-out hint; the engine decides real concurrency
    #[serde(
        rename = "maxParallelEvaluations",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_parallel_evaluations: Option<usize>,
}

impl EvaluationJob {
    /// Parallelism hint, when the job style expresses one
    pub fn parallelism(&self) -> Option<usize> {
        self.max_parallel_evaluations
    }
}

/// Builds fresh jobs, one per rule
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationJobBuilder {
    style: JobStyle,
}

impl EvaluationJobBuilder {
    pub fn new(style: JobStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> JobStyle {
        self.style
    }

    /// Build the job for `rule_id`. Deterministic in its inputs.
    pub fn build(&self, rule_id: &RuleId, urls: Vec<String>) -> EvaluationJob {
        let act_rules = RuleFilter {
            rules: vec![rule_id.clone()],
        };

        match self.style {
            JobStyle::Current => EvaluationJob {
                rule_id: rule_id.clone(),
                max_parallel_evaluations: Some(urls.len()),
                urls,
                execute: Some(ExecuteModules { act: true }),
                act_rules,
            },
            JobStyle::Legacy => EvaluationJob {
                rule_id: rule_id.clone(),
                urls,
                execute: None,
                act_rules,
                max_parallel_evaluations: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls() -> Vec<String> {
        vec!["u1".to_string(), "u3".to_string()]
    }

    #[test]
    fn current_job_serializes_engine_keys() {
        let job = EvaluationJobBuilder::new(JobStyle::Current).build(&"a".into(), urls());
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({
                "urls": ["u1", "u3"],
                "execute": { "act": true },
                "act-rules": { "rules": ["a"] },
                "maxParallelEvaluations": 2
            })
        );
    }

    #[test]
    fn legacy_job_leaves_parallelism_to_the_engine() {
        let job = EvaluationJobBuilder::new(JobStyle::Legacy).build(&"a".into(), urls());
        assert_eq!(job.parallelism(), None);
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({
                "urls": ["u1", "u3"],
                "act-rules": { "rules": ["a"] }
            })
        );
    }

    #[test]
    fn parallelism_matches_url_count() {
        let many: Vec<String> = (0..37).map(|i| format!("u{}", i)).collect();
        let job = EvaluationJobBuilder::default().build(&"a".into(), many);
        assert_eq!(job.parallelism(), Some(37));
    }

    #[test]
    fn rule_filter_holds_only_the_job_rule() {
        let job = EvaluationJobBuilder::default().build(&"b20e66".into(), urls());
        assert_eq!(job.act_rules.rules, vec![RuleId::from("b20e66")]);
        assert_eq!(job.rule_id, RuleId::from("b20e66"));
    }

    #[test]
    fn building_twice_is_identical() {
        let builder = EvaluationJobBuilder::default();
        assert_eq!(
            builder.build(&"a".into(), urls()),
            builder.build(&"a".into(), urls())
        );
    }

    #[test]
    fn job_style_parses_lowercase() {
        let style: JobStyle = serde_json::from_value(json!("legacy")).unwrap();
        assert_eq!(style, JobStyle::Legacy);
    }
}

//! HTTP adapter for a remote evaluation service

use super::{EvaluationEngine, RawFindings, ReportGenerator};
use crate::error::{EngineError, EngineResult};
use crate::job::EvaluationJob;
use crate::report::{ReportFragment, ReportOptions};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Engine and report generator served over HTTP.
///
/// Endpoints: `POST /start`, `POST /evaluate`, `POST /report`, `POST /stop`.
pub struct HttpEvaluationEngine {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct ReportRequest<'a> {
    report: &'a RawFindings,
    options: &'a ReportOptions,
}

impl HttpEvaluationEngine {
    /// Create a new engine client
    pub fn new(endpoint: &str, timeout: Duration) -> EngineResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, F>(&self, path: &str, body: &B, on_failure: F) -> EngineResult<Value>
    where
        B: Serialize + Sync + ?Sized,
        F: FnOnce(String) -> EngineError + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(on_failure(format!("HTTP {} {}", status.as_u16(), message)));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body)
            .map_err(|e| on_failure(format!("invalid JSON response: {}", e)))
    }
}

#[async_trait]
impl EvaluationEngine for HttpEvaluationEngine {
    async fn start(&self, launch_options: &Value) -> EngineResult<()> {
        self.post("/start", launch_options, EngineError::Start).await?;
        Ok(())
    }

    async fn evaluate(&self, job: &EvaluationJob) -> EngineResult<RawFindings> {
        let rule_id = job.rule_id.to_string();
        let findings = self
            .post("/evaluate", job, |message| EngineError::Evaluate { rule_id, message })
            .await?;
        Ok(RawFindings::new(findings))
    }

    async fn stop(&self) -> EngineResult<()> {
        self.post("/stop", &Value::Null, EngineError::Stop).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportGenerator for HttpEvaluationEngine {
    async fn generate_report(
        &self,
        findings: &RawFindings,
        options: &ReportOptions,
    ) -> EngineResult<ReportFragment> {
        let rule_id = options.aggregated_name.to_string();
        let request = ReportRequest {
            report: findings,
            options,
        };
        let report = self
            .post("/report", &request, |message| EngineError::Report { rule_id, message })
            .await?;
        ReportFragment::from_value(report)
    }
}

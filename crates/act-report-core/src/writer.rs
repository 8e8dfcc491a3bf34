//! Report artifacts on disk

use crate::catalog::RuleId;
use crate::error::{WriteError, WriteResult};
use crate::report::ReportDocument;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact name prefix used by default
pub const DEFAULT_PREFIX: &str = "qualweb";

/// `<prefix>-<ruleId>.json`, identifier used verbatim
pub fn rule_file_name(prefix: &str, rule_id: &RuleId) -> String {
    format!("{}-{}.json", prefix, rule_id)
}

/// `<prefix>-<YYYY-MM-DD>.json`
pub fn dated_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.json", prefix, date.format("%Y-%m-%d"))
}

/// Writes pretty-printed report documents into one directory.
///
/// Each write goes to a temporary sibling first and is renamed over the
/// target, so an existing artifact is replaced whole or not at all.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
}

impl ReportWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `document` as `file_name`, returning the artifact path
    pub async fn write(&self, file_name: &str, document: &ReportDocument) -> WriteResult<PathBuf> {
        let mut body = serde_json::to_vec_pretty(document)?;
        body.push(b'\n');

        let target = self.directory.join(file_name);
        let staging = self.directory.join(format!(".{}.tmp", file_name));
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| WriteError::Io { path, source }
        };

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(io_error(&self.directory))?;
        tokio::fs::write(&staging, &body)
            .await
            .map_err(io_error(&staging))?;

        if let Err(source) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(WriteError::Io {
                path: target,
                source,
            });
        }

        debug!(path = %target.display(), bytes = body.len(), "Report written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::GraphEntry;
    use serde_json::json;

    fn document() -> ReportDocument {
        let mut document = ReportDocument::empty();
        document
            .envelope
            .insert("@context".into(), json!("earl-context.json"));
        document
            .graph
            .push(GraphEntry::with_assertions(vec![json!({ "@type": "Assertion" })]));
        document
    }

    #[test]
    fn per_rule_name_uses_identifier_verbatim() {
        assert_eq!(
            rule_file_name(DEFAULT_PREFIX, &"b20e66".into()),
            "qualweb-b20e66.json"
        );
        assert_eq!(rule_file_name("engine", &"Ab_1".into()), "engine-Ab_1.json");
    }

    #[test]
    fn dated_name_is_iso_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(dated_file_name(DEFAULT_PREFIX, date), "qualweb-2024-03-07.json");
    }

    #[tokio::test]
    async fn writes_pretty_json_and_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));

        let path = writer.write("qualweb-a.json", &document()).await.unwrap();
        assert_eq!(path, dir.path().join("reports").join("qualweb-a.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"@context\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["@graph"].as_array().unwrap().len(), 1);
        assert!(!dir.path().join("reports").join(".qualweb-a.json.tmp").exists());
    }

    #[tokio::test]
    async fn rewriting_replaces_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        writer.write("qualweb-a.json", &document()).await.unwrap();
        let path = writer
            .write("qualweb-a.json", &ReportDocument::empty())
            .await
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value, json!({ "@graph": [] }));
    }

    #[tokio::test]
    async fn unwritable_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let err = ReportWriter::new(&blocker)
            .write("qualweb-a.json", &document())
            .await
            .unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
    }
}

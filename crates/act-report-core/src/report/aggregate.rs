use super::{ReportDocument, ReportFragment};

/// Accumulates rule reports into one combined document.
///
/// The first merged fragment provides the envelope; later fragments only
/// contribute their `@graph` entries, appended in merge order. Nothing is
/// removed or reordered once appended.
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    report: Option<ReportDocument>,
    fragments: usize,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one rule report
    pub fn merge(&mut self, fragment: ReportFragment) {
        self.merge_document(fragment.into_document());
    }

    /// Merge an already unwrapped document
    pub fn merge_document(&mut self, document: ReportDocument) {
        if let Some(report) = &mut self.report {
            report.graph.extend(document.graph);
        } else {
            self.report = Some(document);
        }
        self.fragments += 1;
    }

    /// Merge a pre-combined aggregate as a single unit
    pub fn absorb(&mut self, other: ReportAggregator) {
        if let Some(document) = other.report {
            self.merge_document(document);
            self.fragments += other.fragments - 1;
        }
    }

    /// No fragment merged yet
    pub fn is_empty(&self) -> bool {
        self.report.is_none()
    }

    /// Number of fragments merged so far
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn graph_len(&self) -> usize {
        self.report.as_ref().map_or(0, |report| report.graph.len())
    }

    pub fn document(&self) -> Option<&ReportDocument> {
        self.report.as_ref()
    }

    /// Final document; an empty graph when nothing was merged
    pub fn finish(self) -> ReportDocument {
        self.report.unwrap_or_else(ReportDocument::empty)
    }
}

//! Builder for plain reports.

use super::{ReportCore, ReportDraft};
use crate::report::Report;
use crate::Result;

/// Accumulates columns and summary entries into a [`Report`].
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    core: ReportCore,
}

impl ReportBuilder {
    /// Create a builder. Fails with
    /// [`ReportError::InvalidFilename`](crate::error::ReportError::InvalidFilename).
    pub fn new(filename: &str) -> Result<Self> {
        Ok(ReportBuilder {
            core: ReportCore::new(filename)?,
        })
    }

    /// Snapshot the current state into an immutable report.
    ///
    /// Fails with [`ReportError::EmptyReport`](crate::error::ReportError::EmptyReport)
    /// when no column was added. The builder stays usable; later changes do
    /// not affect reports already built.
    pub fn build(&self) -> Result<Report> {
        self.core.ensure_not_empty()?;
        tracing::debug!(
            filename = self.core.filename(),
            columns = self.core.columns().len(),
            summary_entries = self.core.summary().len(),
            "built report"
        );
        Ok(snapshot(&self.core))
    }
}

impl ReportDraft for ReportBuilder {
    fn core(&self) -> &ReportCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ReportCore {
        &mut self.core
    }
}

pub(crate) fn snapshot(core: &ReportCore) -> Report {
    Report::new(
        core.filename().to_string(),
        core.title().to_string(),
        core.columns().to_vec(),
        core.include_row_numbers(),
        core.summary().clone(),
    )
}

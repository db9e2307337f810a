use std::path::Path;

use anyhow::Context as _;

use crate::{
    compare::differ::Discrepancy,
    foundation::{core::FrameRange, error::MvResult},
};

/// The flat text artifact of one comparison run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Compared range.
    pub range: FrameRange,
    /// Discrepancies in output order.
    pub discrepancies: Vec<Discrepancy>,
}

impl ComparisonReport {
    /// Wrap a comparison result.
    pub fn new(range: FrameRange, discrepancies: Vec<Discrepancy>) -> Self {
        Self {
            range,
            discrepancies,
        }
    }

    /// Whether the two inputs agreed over the whole range.
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Artifact text: one line per discrepancy, or the no-differences sentinel.
    pub fn render(&self) -> String {
        if self.is_clean() {
            return format!(
                "No differences found in frames {} to {}.\n",
                self.range.start, self.range.end
            );
        }
        let mut out = String::new();
        for d in &self.discrepancies {
            out.push_str(&d.to_string());
            out.push('\n');
        }
        out
    }

    /// Write the artifact, creating the parent directory if needed.
    pub fn write_to(&self, path: &Path) -> MvResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("write comparison report '{}'", path.display()))?;
        tracing::info!(
            path = %path.display(),
            lines = self.discrepancies.len(),
            "comparison report written"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compare/report.rs"]
mod tests;

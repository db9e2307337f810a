use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{MvError, MvResult},
    vectors::record::Column,
};

/// Highest method index looked for by [`merge_method_outputs`].
pub const LAST_METHOD: u32 = 8;

/// Per-method output file name for the first stream of `method`.
pub fn method_output_name(method: u32) -> String {
    format!("method{method}_output_0.csv")
}

/// Concatenate `method{0..=8}_output_0.csv` from `dir` into `out` under the canonical
/// header, in method order. Each input's own header row is skipped. Missing inputs are
/// logged and skipped. Returns how many files were merged.
#[tracing::instrument(skip_all, fields(dir = %dir.display(), out = %out.display()))]
pub fn merge_method_outputs(dir: &Path, out: &Path) -> MvResult<usize> {
    if !dir.is_dir() {
        return Err(MvError::file_not_found(dir));
    }
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut w = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(out)
        .with_context(|| format!("create '{}'", out.display()))?;
    w.write_record(Column::ALL.map(Column::name))
        .with_context(|| format!("write '{}'", out.display()))?;

    let mut merged = 0usize;
    for method in 0..=LAST_METHOD {
        let path = dir.join(method_output_name(method));
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "missing method output");
            continue;
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("open '{}'", path.display()))?;
        let mut rows = 0usize;
        for record in rdr.byte_records() {
            let record = record.map_err(|e| MvError::parse(format!("'{}': {e}", path.display())))?;
            w.write_byte_record(&record)
                .with_context(|| format!("write '{}'", out.display()))?;
            rows += 1;
        }
        tracing::debug!(method, rows, "merged method output");
        merged += 1;
    }

    w.flush()
        .with_context(|| format!("flush '{}'", out.display()))?;
    tracing::info!(merged, "combined per-method outputs");
    Ok(merged)
}

#[cfg(test)]
#[path = "../tests/unit/merge.rs"]
mod tests;

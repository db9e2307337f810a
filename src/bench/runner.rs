use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::Context as _;

use crate::{
    bench::table::{BenchmarkRow, parse_benchmark_output},
    foundation::error::{MvError, MvResult},
};

/// Methods left out of sweep results.
pub const EXCLUDED_METHODS: [&str; 2] = ["LIVE555 Parser", "Custom H.264 Parser"];

/// File name of the sweep's results table.
pub const RESULTS_FILE: &str = "benchmark_results.csv";

/// Stream counts a sweep up to `max_streams` visits: 1, 3, 5, then every 5th.
pub fn stream_run_steps(max_streams: u32) -> Vec<u32> {
    let mut steps: Vec<u32> = [1, 3, 5].into_iter().filter(|&s| s <= max_streams).collect();
    if max_streams > 5 {
        steps.extend((10..=max_streams).step_by(5));
    }
    steps
}

/// How to call the benchmark executable.
#[derive(Clone, Debug)]
pub struct BenchmarkInvocation {
    pub executable: PathBuf,
    /// Video file or stream URL handed to the executable.
    pub input: String,
    pub streams: u32,
    pub results_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl BenchmarkInvocation {
    /// Same invocation with a different stream count.
    pub fn with_streams(&self, streams: u32) -> Self {
        Self {
            streams,
            ..self.clone()
        }
    }
}

/// Run the executable once and parse its result table.
#[tracing::instrument(skip_all, fields(streams = inv.streams))]
pub fn run_benchmark(inv: &BenchmarkInvocation) -> MvResult<Vec<BenchmarkRow>> {
    let out = spawn(inv)?;
    rows_from_output(inv, &out)
}

fn spawn(inv: &BenchmarkInvocation) -> MvResult<Output> {
    tracing::info!(exe = %inv.executable.display(), streams = inv.streams, "running benchmark");
    Command::new(&inv.executable)
        .arg(&inv.input)
        .arg(inv.streams.to_string())
        .arg(&inv.results_dir)
        .arg(&inv.project_dir)
        .output()
        .map_err(|e| {
            MvError::benchmark(format!(
                "failed to run '{}': {e}",
                inv.executable.display()
            ))
        })
}

fn rows_from_output(inv: &BenchmarkInvocation, out: &Output) -> MvResult<Vec<BenchmarkRow>> {
    if !out.status.success() {
        return Err(MvError::benchmark(format!(
            "'{}' exited with status {}: {}",
            inv.executable.display(),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let rows = parse_benchmark_output(&String::from_utf8_lossy(&out.stdout), inv.streams);
    if rows.is_empty() {
        tracing::warn!(streams = inv.streams, "benchmark returned no rows");
    }
    Ok(rows)
}

/// Rows and output location of a finished sweep.
#[derive(Clone, Debug)]
pub struct SweepOutcome {
    pub rows: Vec<BenchmarkRow>,
    pub csv_path: PathBuf,
}

/// Run the benchmark for every step up to `max_streams` and write the combined table to
/// `out_dir/benchmark_results.csv`.
///
/// A step whose run exits non-zero is logged and skipped; failing to start the
/// executable at all is an error.
pub fn run_sweep(
    template: &BenchmarkInvocation,
    max_streams: u32,
    out_dir: &Path,
) -> MvResult<SweepOutcome> {
    let steps = stream_run_steps(max_streams);
    if steps.is_empty() {
        return Err(MvError::argument("max streams must be at least 1"));
    }
    tracing::info!(?steps, "stream steps to test");

    let mut rows = Vec::new();
    for s in steps {
        let inv = template.with_streams(s);
        let out = spawn(&inv)?;
        match rows_from_output(&inv, &out) {
            Ok(r) => rows.extend(r),
            Err(e) => tracing::warn!(streams = s, "{e}"),
        }
    }

    rows.retain(|r| !EXCLUDED_METHODS.contains(&r.method.as_str()));

    let csv_path = out_dir.join(RESULTS_FILE);
    write_results_csv(&rows, &csv_path)?;
    tracing::info!(rows = rows.len(), path = %csv_path.display(), "saved benchmark table");
    Ok(SweepOutcome { rows, csv_path })
}

/// Write rows as CSV with a header, creating the parent directory.
pub fn write_results_csv(rows: &[BenchmarkRow], path: &Path) -> MvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("create '{}'", path.display()))?;
    for row in rows {
        w.serialize(row)
            .with_context(|| format!("write '{}'", path.display()))?;
    }
    w.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

/// Fastest high-profile row per stream count, ascending by stream count. Ties keep the
/// earlier row.
pub fn fastest_per_stream(rows: &[BenchmarkRow]) -> Vec<&BenchmarkRow> {
    let mut best: BTreeMap<u32, &BenchmarkRow> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_high_profile()) {
        best.entry(row.streams)
            .and_modify(|cur| {
                if row.time_per_frame < cur.time_per_frame {
                    *cur = row;
                }
            })
            .or_insert(row);
    }
    best.into_values().collect()
}

/// Delete per-stream method outputs (`method*_output_*.csv` not ending in `_0.csv`).
/// Returns how many files were removed.
pub fn prune_stream_outputs(dir: &Path) -> MvResult<usize> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    let mut removed = 0usize;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_stream_output(name) && !name.ends_with("_0.csv") {
            std::fs::remove_file(entry.path())
                .with_context(|| format!("remove '{}'", entry.path().display()))?;
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::debug!(removed, "pruned per-stream outputs");
    }
    Ok(removed)
}

fn is_stream_output(name: &str) -> bool {
    name.strip_prefix("method")
        .and_then(|rest| rest.strip_suffix(".csv"))
        .is_some_and(|mid| mid.contains("_output_"))
}

#[cfg(test)]
#[path = "../../tests/unit/bench/runner.rs"]
mod tests;

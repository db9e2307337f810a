/// One row of the benchmark executable's result table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkRow {
    pub method: String,
    /// Stream count the run was made with.
    pub streams: u32,
    /// Milliseconds per frame.
    pub time_per_frame: f64,
    pub fps: f64,
    /// CPU usage in percent.
    pub cpu: f64,
    /// Memory in kB.
    pub memory: f64,
    pub mvs: u64,
    pub frames: u64,
    /// Raw flag text; `"1"` marks a high-profile method.
    pub high_profile: String,
}

impl BenchmarkRow {
    /// Whether the method is flagged high profile.
    pub fn is_high_profile(&self) -> bool {
        self.high_profile == "1"
    }
}

const FIELDS: usize = 8;

/// Extract result rows from the executable's stdout.
///
/// Rows follow the header line naming both `Method` and `Time/Frame`. Separator and
/// blank lines are skipped, as are lines with too few `|` fields or unparseable numbers.
pub fn parse_benchmark_output(text: &str, streams: u32) -> Vec<BenchmarkRow> {
    let mut in_table = false;
    let mut rows = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.contains("Method") && line.contains("Time/Frame") {
            in_table = true;
            continue;
        }
        if !in_table || line.is_empty() || line.starts_with("---") || line.starts_with('—') {
            continue;
        }
        match parse_row(line, streams) {
            Some(row) => rows.push(row),
            None => tracing::trace!(line, "skipping unparseable benchmark line"),
        }
    }
    rows
}

fn parse_row(line: &str, streams: u32) -> Option<BenchmarkRow> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < FIELDS {
        return None;
    }
    Some(BenchmarkRow {
        method: parts[0].to_string(),
        streams,
        time_per_frame: parts[1].replace("ms", "").trim().parse().ok()?,
        fps: parts[2].parse().ok()?,
        cpu: parts[3].replace('%', "").trim().parse().ok()?,
        memory: parts[4].parse().ok()?,
        mvs: parts[5].parse().ok()?,
        frames: parts[6].parse().ok()?,
        high_profile: parts[7].to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/bench/table.rs"]
mod tests;

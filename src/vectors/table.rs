use std::collections::{BTreeMap, HashMap};

use crate::vectors::record::{Column, ColumnKey, MotionVectorRecord};

/// All rows of one per-method CSV after loading, densely indexed from 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTable {
    pub(crate) schema: Vec<ColumnKey>,
    pub(crate) records: Vec<MotionVectorRecord>,
    pub(crate) dropped: usize,
}

/// Frame number to first-occurring row, built once per table.
///
/// When a method emitted several rows for one frame the first one represents the frame.
/// That is a fixed policy, not an error.
#[derive(Clone, Debug, Default)]
pub struct FrameLookup {
    first: HashMap<u64, usize>,
}

impl FrameLookup {
    /// Index `records` by frame.
    pub fn build(records: &[MotionVectorRecord]) -> Self {
        let mut first = HashMap::with_capacity(records.len().min(1 << 16));
        for (i, r) in records.iter().enumerate() {
            if let Some(f) = r.frame_number() {
                first.entry(f).or_insert(i);
            }
        }
        Self { first }
    }

    /// Row index representing `frame`.
    pub fn first_row(&self, frame: u64) -> Option<usize> {
        self.first.get(&frame).copied()
    }

    /// Number of distinct indexed frames.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Whether no frame is indexed.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

impl VectorTable {
    /// Build a table from in-memory records using the canonical schema.
    pub fn from_records(records: Vec<MotionVectorRecord>) -> Self {
        Self {
            schema: Column::ALL.into_iter().map(ColumnKey::Known).collect(),
            records,
            dropped: 0,
        }
    }

    /// Columns in declaration order, derived columns appended last.
    pub fn schema(&self) -> &[ColumnKey] {
        &self.schema
    }

    /// Look a column up by header name.
    pub fn column(&self, name: &str) -> Option<&ColumnKey> {
        self.schema.iter().find(|k| k.name() == name)
    }

    /// Whether the table has a column called `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Surviving rows.
    pub fn records(&self) -> &[MotionVectorRecord] {
        &self.records
    }

    /// Take the rows out of the table.
    pub fn into_records(self) -> Vec<MotionVectorRecord> {
        self.records
    }

    /// Number of surviving rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no row survived.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped for lacking a required field.
    pub fn dropped_rows(&self) -> usize {
        self.dropped
    }

    /// First-occurrence frame index.
    pub fn frame_lookup(&self) -> FrameLookup {
        FrameLookup::build(&self.records)
    }

    /// Rows grouped by frame, frames ascending, rows in file order. For a per-method file
    /// each group is the `(method_id, frame)` vector set; a merged file mixes methods.
    pub fn rows_by_frame(&self) -> BTreeMap<u64, Vec<&MotionVectorRecord>> {
        let mut out: BTreeMap<u64, Vec<&MotionVectorRecord>> = BTreeMap::new();
        for r in &self.records {
            if let Some(f) = r.frame_number() {
                out.entry(f).or_default().push(r);
            }
        }
        out
    }

    /// Largest integral frame number, if any.
    pub fn max_frame(&self) -> Option<u64> {
        self.records.iter().filter_map(|r| r.frame_number()).max()
    }

    /// Sorted distinct integral frame numbers.
    pub fn frame_numbers(&self) -> Vec<u64> {
        let mut frames: Vec<u64> = self
            .records
            .iter()
            .filter_map(|r| r.frame_number())
            .collect();
        frames.sort_unstable();
        frames.dedup();
        frames
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectors/table.rs"]
mod tests;

use std::fmt;

use crate::{
    foundation::core::FrameRange,
    vectors::{record::ColumnKey, table::VectorTable},
};

/// Label of the first table in discrepancy lines.
pub const LEFT_LABEL: &str = "method0";
/// Label of the second table in discrepancy lines.
pub const RIGHT_LABEL: &str = "method7";

/// Columns that identify a row rather than describe it; never compared.
pub const IDENTITY_COLUMNS: [&str; 2] = ["frame", "method_id"];

/// One line of a comparison result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discrepancy {
    /// One of the tables has no row for the frame; no fields were compared.
    MissingFrame {
        /// Frame number.
        frame: u64,
    },
    /// Both tables have the frame but a field differs.
    FieldDiffers {
        /// Frame number.
        frame: u64,
        /// Column name.
        column: String,
        /// Rendered value from the first table.
        left: String,
        /// Rendered value from the second table.
        right: String,
    },
}

impl Discrepancy {
    /// Frame the discrepancy belongs to.
    pub fn frame(&self) -> u64 {
        match self {
            Discrepancy::MissingFrame { frame } | Discrepancy::FieldDiffers { frame, .. } => {
                *frame
            }
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::MissingFrame { frame } => {
                write!(f, "Frame {frame}: missing in one of the files")
            }
            Discrepancy::FieldDiffers {
                frame,
                column,
                left,
                right,
            } => write!(
                f,
                "Frame {frame}: '{column}' differs ({LEFT_LABEL}={left}, {RIGHT_LABEL}={right})"
            ),
        }
    }
}

/// Compare two per-method tables frame by frame over an inclusive range.
///
/// Each frame is represented by its first row in each table. A frame absent from either
/// table yields a single [`Discrepancy::MissingFrame`]. Otherwise every column of `a`
/// that `b` also has (minus [`IDENTITY_COLUMNS`]) is compared exactly; two nulls are
/// equal. Output is ordered by frame, then by `a`'s column order.
#[tracing::instrument(
    skip(a, b),
    fields(a_rows = a.len(), b_rows = b.len(), frames = range.len_frames())
)]
pub fn compare_frames(a: &VectorTable, b: &VectorTable, range: FrameRange) -> Vec<Discrepancy> {
    let columns: Vec<(&ColumnKey, &ColumnKey)> = a
        .schema()
        .iter()
        .filter(|k| !IDENTITY_COLUMNS.contains(&k.name()))
        .filter_map(|ka| b.column(ka.name()).map(|kb| (ka, kb)))
        .collect();

    let lookup_a = a.frame_lookup();
    let lookup_b = b.frame_lookup();
    let mut out = Vec::new();

    for frame in range.frames() {
        let (Some(ia), Some(ib)) = (lookup_a.first_row(frame), lookup_b.first_row(frame)) else {
            out.push(Discrepancy::MissingFrame { frame });
            continue;
        };
        let (ra, rb) = (&a.records()[ia], &b.records()[ib]);

        for (ka, kb) in &columns {
            let (va, vb) = (ra.value(ka), rb.value(kb));
            if va.is_null() && vb.is_null() {
                continue;
            }
            if !va.same_as(&vb) {
                out.push(Discrepancy::FieldDiffers {
                    frame,
                    column: ka.name().to_string(),
                    left: va.to_string(),
                    right: vb.to_string(),
                });
            }
        }
    }

    tracing::debug!(discrepancies = out.len(), "comparison finished");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compare/differ.rs"]
mod tests;

use std::fmt;

use crate::vectors::cell::Cell;

/// Columns of the per-method motion-vector CSV schema, in canonical header order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// `frame`
    Frame,
    /// `method_id`
    MethodId,
    /// `source`
    Source,
    /// `w`
    W,
    /// `h`
    H,
    /// `src_x`
    SrcX,
    /// `src_y`
    SrcY,
    /// `dst_x`
    DstX,
    /// `dst_y`
    DstY,
    /// `flags`
    Flags,
    /// `motion_x`
    MotionX,
    /// `motion_y`
    MotionY,
    /// `motion_scale`
    MotionScale,
}

impl Column {
    /// Number of known columns.
    pub const COUNT: usize = 13;

    /// Every known column in canonical order.
    pub const ALL: [Column; Column::COUNT] = [
        Column::Frame,
        Column::MethodId,
        Column::Source,
        Column::W,
        Column::H,
        Column::SrcX,
        Column::SrcY,
        Column::DstX,
        Column::DstY,
        Column::Flags,
        Column::MotionX,
        Column::MotionY,
        Column::MotionScale,
    ];

    /// Columns a row must have values for to survive loading.
    pub const REQUIRED: [Column; 5] = [
        Column::Frame,
        Column::SrcX,
        Column::SrcY,
        Column::DstX,
        Column::DstY,
    ];

    /// Header name.
    pub fn name(self) -> &'static str {
        match self {
            Column::Frame => "frame",
            Column::MethodId => "method_id",
            Column::Source => "source",
            Column::W => "w",
            Column::H => "h",
            Column::SrcX => "src_x",
            Column::SrcY => "src_y",
            Column::DstX => "dst_x",
            Column::DstY => "dst_y",
            Column::Flags => "flags",
            Column::MotionX => "motion_x",
            Column::MotionY => "motion_y",
            Column::MotionScale => "motion_scale",
        }
    }

    /// Look a header name up.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// The canonical header line.
    pub fn canonical_header() -> String {
        Self::ALL.map(Column::name).join(",")
    }
}

/// A column as it appears in a loaded table: one of the known columns, or an extra
/// column carried through verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnKey {
    /// A schema column, stored as a typed field.
    Known(Column),
    /// An unrecognised column; `slot` indexes [`MotionVectorRecord::extra`].
    Extra {
        /// Header name.
        name: String,
        /// Position in the record's extra values.
        slot: usize,
    },
}

impl ColumnKey {
    /// Header name.
    pub fn name(&self) -> &str {
        match self {
            ColumnKey::Known(c) => c.name(),
            ColumnKey::Extra { name, .. } => name,
        }
    }
}

/// One field of a record, as seen by the differ.
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    /// A coerced numeric column.
    Number(Cell),
    /// An extra column, compared as text; empty text is null.
    Text(Option<&'a str>),
}

impl FieldValue<'_> {
    /// Whether the value is null/NaN.
    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Number(c) => c.is_missing(),
            FieldValue::Text(t) => t.is_none(),
        }
    }

    /// Exact equality with no tolerance. A null never equals a non-null.
    pub fn same_as(&self, other: &FieldValue<'_>) -> bool {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => match (a.value(), b.value()) {
                (Some(x), Some(y)) => x == y,
                (None, None) => true,
                _ => false,
            },
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Number(n), FieldValue::Text(t))
            | (FieldValue::Text(t), FieldValue::Number(n)) => {
                matches!((n.value(), t.map(Cell::parse)), (Some(x), Some(Cell::Present(y))) if x == y)
            }
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(c) => c.fmt(f),
            FieldValue::Text(Some(t)) => f.write_str(t),
            FieldValue::Text(None) => f.write_str("nan"),
        }
    }
}

/// One block-motion estimate produced by one extraction method.
///
/// The five required fields are plain numbers: rows lacking any of them never make it
/// out of the loader.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionVectorRecord {
    /// Frame number as read; see [`MotionVectorRecord::frame_number`].
    pub frame: f64,
    /// Producing method.
    pub method_id: Cell,
    /// Passthrough.
    pub source: Cell,
    /// Passthrough block width.
    pub w: Cell,
    /// Passthrough block height.
    pub h: Cell,
    /// Origin x.
    pub src_x: f64,
    /// Origin y.
    pub src_y: f64,
    /// Destination x.
    pub dst_x: f64,
    /// Destination y.
    pub dst_y: f64,
    /// Passthrough.
    pub flags: Cell,
    /// Displacement x; derived as `dst_x - src_x` when the column is absent.
    pub motion_x: Cell,
    /// Displacement y; derived as `dst_y - src_y` when the column is absent.
    pub motion_y: Cell,
    /// Passthrough.
    pub motion_scale: Cell,
    /// Values of extra columns, in header order.
    pub extra: Vec<Option<String>>,
}

impl MotionVectorRecord {
    /// A record with derived motion and no metadata.
    pub fn new(frame: u64, src: (f64, f64), dst: (f64, f64)) -> Self {
        Self {
            frame: frame as f64,
            method_id: Cell::Missing,
            source: Cell::Missing,
            w: Cell::Missing,
            h: Cell::Missing,
            src_x: src.0,
            src_y: src.1,
            dst_x: dst.0,
            dst_y: dst.1,
            flags: Cell::Missing,
            motion_x: Cell::Present(dst.0 - src.0),
            motion_y: Cell::Present(dst.1 - src.1),
            motion_scale: Cell::Missing,
            extra: Vec::new(),
        }
    }

    /// Set the producing method.
    pub fn with_method(mut self, method_id: i64) -> Self {
        self.method_id = Cell::Present(method_id as f64);
        self
    }

    /// The frame as an index, if it is a non-negative integer. Rows with fractional
    /// frame numbers are kept but never match a frame lookup.
    pub fn frame_number(&self) -> Option<u64> {
        (self.frame.is_finite() && self.frame >= 0.0 && self.frame.fract() == 0.0)
            .then_some(self.frame as u64)
    }

    /// Typed access to a known column.
    pub fn cell(&self, column: Column) -> Cell {
        match column {
            Column::Frame => Cell::from_f64(self.frame),
            Column::MethodId => self.method_id,
            Column::Source => self.source,
            Column::W => self.w,
            Column::H => self.h,
            Column::SrcX => Cell::from_f64(self.src_x),
            Column::SrcY => Cell::from_f64(self.src_y),
            Column::DstX => Cell::from_f64(self.dst_x),
            Column::DstY => Cell::from_f64(self.dst_y),
            Column::Flags => self.flags,
            Column::MotionX => self.motion_x,
            Column::MotionY => self.motion_y,
            Column::MotionScale => self.motion_scale,
        }
    }

    /// Field lookup for the differ.
    pub fn value(&self, key: &ColumnKey) -> FieldValue<'_> {
        match key {
            ColumnKey::Known(c) => FieldValue::Number(self.cell(*c)),
            ColumnKey::Extra { slot, .. } => {
                FieldValue::Text(self.extra.get(*slot).and_then(|v| v.as_deref()))
            }
        }
    }

    /// Euclidean displacement length; NaN when either component is missing.
    pub fn magnitude(&self) -> f64 {
        self.motion_x.or_nan().hypot(self.motion_y.or_nan())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectors/record.rs"]
mod tests;

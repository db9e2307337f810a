use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    foundation::error::{MvError, MvResult},
    vectors::{
        cell::Cell,
        record::{Column, ColumnKey, MotionVectorRecord},
        table::VectorTable,
    },
};

impl VectorTable {
    /// Load and normalize a per-method motion-vector CSV.
    ///
    /// - every known numeric column is coerced; unparseable cells become [`Cell::Missing`]
    /// - rows missing `frame`, `src_x`, `src_y`, `dst_x` or `dst_y` are dropped
    /// - absent `motion_x`/`motion_y` columns are derived as `dst - src`
    ///
    /// Errors: [`MvError::FileNotFound`] for a missing path, [`MvError::Parse`] for
    /// malformed CSV, [`MvError::MissingColumn`] when a required column is not in the
    /// header.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> MvResult<Self> {
        let f = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MvError::file_not_found(path)
            } else {
                MvError::Other(
                    anyhow::Error::new(e).context(format!("open '{}'", path.display())),
                )
            }
        })?;

        let table = Self::from_reader(BufReader::new(f)).map_err(|e| match e {
            MvError::Parse(msg) => MvError::parse(format!("'{}': {msg}", path.display())),
            other => other,
        })?;

        tracing::info!(
            rows = table.len(),
            dropped = table.dropped_rows(),
            "loaded motion vectors"
        );
        Ok(table)
    }

    /// Load from any reader holding CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> MvResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_error)?.clone();
        if headers.is_empty() {
            return Err(MvError::parse("empty input: no header row"));
        }

        let layout = HeaderLayout::resolve(&headers)?;
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in rdr.records() {
            let row = row.map_err(csv_error)?;
            if row.len() > headers.len() {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                return Err(MvError::parse(format!(
                    "line {line}: expected {} fields, saw {}",
                    headers.len(),
                    row.len()
                )));
            }
            match layout.read_row(&row) {
                Some(r) => records.push(r),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "dropped rows missing required fields");
        }

        Ok(Self {
            schema: layout.schema,
            records,
            dropped,
        })
    }
}

struct HeaderLayout {
    known: [Option<usize>; Column::COUNT],
    extra: Vec<usize>,
    derive_motion_x: bool,
    derive_motion_y: bool,
    schema: Vec<ColumnKey>,
}

impl HeaderLayout {
    fn resolve(headers: &csv::StringRecord) -> MvResult<Self> {
        let mut known = [None; Column::COUNT];
        let mut extra = Vec::new();
        let mut schema = Vec::with_capacity(headers.len() + 2);

        for (idx, name) in headers.iter().enumerate() {
            match Column::from_name(name) {
                Some(c) if known[c as usize].is_none() => {
                    known[c as usize] = Some(idx);
                    schema.push(ColumnKey::Known(c));
                }
                _ => {
                    schema.push(ColumnKey::Extra {
                        name: name.to_string(),
                        slot: extra.len(),
                    });
                    extra.push(idx);
                }
            }
        }

        for c in Column::REQUIRED {
            if known[c as usize].is_none() {
                return Err(MvError::missing_column(c.name()));
            }
        }

        let derive_motion_x = known[Column::MotionX as usize].is_none();
        let derive_motion_y = known[Column::MotionY as usize].is_none();
        if derive_motion_x {
            schema.push(ColumnKey::Known(Column::MotionX));
        }
        if derive_motion_y {
            schema.push(ColumnKey::Known(Column::MotionY));
        }

        Ok(Self {
            known,
            extra,
            derive_motion_x,
            derive_motion_y,
            schema,
        })
    }

    fn cell(&self, row: &csv::StringRecord, column: Column) -> Cell {
        self.known[column as usize]
            .and_then(|i| row.get(i))
            .map(Cell::parse)
            .unwrap_or(Cell::Missing)
    }

    /// `None` when a required field is missing after coercion.
    fn read_row(&self, row: &csv::StringRecord) -> Option<MotionVectorRecord> {
        let frame = self.cell(row, Column::Frame).value()?;
        let src_x = self.cell(row, Column::SrcX).value()?;
        let src_y = self.cell(row, Column::SrcY).value()?;
        let dst_x = self.cell(row, Column::DstX).value()?;
        let dst_y = self.cell(row, Column::DstY).value()?;

        let motion_x = if self.derive_motion_x {
            Cell::from_f64(dst_x - src_x)
        } else {
            self.cell(row, Column::MotionX)
        };
        let motion_y = if self.derive_motion_y {
            Cell::from_f64(dst_y - src_y)
        } else {
            self.cell(row, Column::MotionY)
        };

        let extra = self
            .extra
            .iter()
            .map(|&i| row.get(i).filter(|s| !s.is_empty()).map(str::to_owned))
            .collect();

        Some(MotionVectorRecord {
            frame,
            method_id: self.cell(row, Column::MethodId),
            source: self.cell(row, Column::Source),
            w: self.cell(row, Column::W),
            h: self.cell(row, Column::H),
            src_x,
            src_y,
            dst_x,
            dst_y,
            flags: self.cell(row, Column::Flags),
            motion_x,
            motion_y,
            motion_scale: self.cell(row, Column::MotionScale),
            extra,
        })
    }
}

fn csv_error(e: csv::Error) -> MvError {
    if e.is_io_error() {
        MvError::Other(anyhow::Error::new(e).context("read csv"))
    } else {
        MvError::parse(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectors/load.rs"]
mod tests;

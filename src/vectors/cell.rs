use std::fmt;

/// A numeric CSV cell after coercion.
///
/// Unparseable, empty and `nan` inputs all become [`Cell::Missing`]; a `Present` value is
/// never NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Cell {
    /// A parsed number.
    Present(f64),
    /// No usable value.
    #[default]
    Missing,
}

impl Cell {
    /// Coerce raw text. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        let t = raw.trim();
        if t.is_empty() {
            return Self::Missing;
        }
        t.parse::<f64>().map(Self::from_f64).unwrap_or(Self::Missing)
    }

    /// Wrap a float, mapping NaN to `Missing`.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            Self::Missing
        } else {
            Self::Present(v)
        }
    }

    /// The value, if present.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(v),
            Self::Missing => None,
        }
    }

    /// The value, or NaN when missing. Used where NaN must fall through comparisons.
    pub fn or_nan(self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    /// Whether the cell holds no value.
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::from_f64(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(v) => f.write_str(&format_number(*v)),
            Self::Missing => f.write_str("nan"),
        }
    }
}

/// Integral values print without a fractional part, everything else in shortest form.
pub(crate) fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectors/cell.rs"]
mod tests;

//! Core data types for survey-kml

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;

/// A raw scalar taken from one cell of the input table
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text as it appeared in the source
    Text(String),
    /// Numeric cell (spreadsheets only; CSV cells are always text)
    Number(f64),
    /// Explicitly empty cell
    Empty,
}

impl CellValue {
    /// Returns the string form of this value.
    ///
    /// Integral numbers print without a fractional part (`500000`, not
    /// `500000.0`); other numbers use the shortest round-trip form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => Cow::Owned(format_number(*n)),
            CellValue::Empty => Cow::Borrowed(""),
        }
    }

    /// Returns true when the value's trimmed string form is empty
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// One input record: field name to raw value.
///
/// Key order carries no meaning; lookups go through [`crate::fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, CellValue>,
}

impl Row {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`Row::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value stored under `name`, if present
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields.get(name)
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true when every field is blank
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(CellValue::is_blank)
    }

    /// Iterates over the fields in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// A named geographic position produced from one input row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// WGS84 latitude in degrees
    pub latitude: f64,
    /// WGS84 longitude in degrees
    pub longitude: f64,
    /// Display name
    pub name: String,
    /// Zero-based index of the row this point came from
    pub source_index: usize,
}

/// Latitude/longitude bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

/// Points in input row order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointSequence {
    points: Vec<Point>,
}

impl PointSequence {
    /// Creates an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over points in order
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Returns the points as a slice
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Returns the bounding box of all points, or `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let init = Bounds {
            min_latitude: first.latitude,
            min_longitude: first.longitude,
            max_latitude: first.latitude,
            max_longitude: first.longitude,
        };

        Some(self.points.iter().skip(1).fold(init, |b, p| Bounds {
            min_latitude: b.min_latitude.min(p.latitude),
            min_longitude: b.min_longitude.min(p.longitude),
            max_latitude: b.max_latitude.max(p.latitude),
            max_longitude: b.max_longitude.max(p.longitude),
        }))
    }

    /// Consumes the sequence, returning the points
    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }
}

impl From<Vec<Point>> for PointSequence {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

//! Column resolution across header synonyms
//!
//! Input tables carry no fixed schema: the same column may be called
//! `latitude`, `LAT` or `Lintang` depending on who produced the file. Each
//! semantic field therefore has an ordered list of candidate header names,
//! and a lookup returns the value of the first candidate that is present and
//! non-blank. Priority comes from the candidate list, never from the row.

use serde::{Deserialize, Serialize};

use crate::types::{CellValue, Row};

/// Candidate headers for the point name, in priority order
pub const NAME_FIELDS: &[&str] = &[
    "name", "Name", "nama", "Nama", "id", "ID", "titik", "Titik", "station", "Station",
];

/// Candidate headers for latitude, in priority order
pub const LATITUDE_FIELDS: &[&str] = &["lat", "latitude", "Latitude", "LAT", "lintang", "Lintang"];

/// Candidate headers for longitude, in priority order
pub const LONGITUDE_FIELDS: &[&str] = &[
    "lon", "lng", "long", "longitude", "Longitude", "LON", "bujur", "Bujur",
];

/// Candidate headers for UTM easting, in priority order
pub const EASTING_FIELDS: &[&str] = &["easting", "Easting", "x", "X", "utm_x", "EASTING"];

/// Candidate headers for UTM northing, in priority order
pub const NORTHING_FIELDS: &[&str] = &["northing", "Northing", "y", "Y", "utm_y", "NORTHING"];

/// The semantic fields a row can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Latitude,
    Longitude,
    Easting,
    Northing,
}

impl FieldKind {
    /// Returns the built-in candidate headers for this field
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Name => NAME_FIELDS,
            FieldKind::Latitude => LATITUDE_FIELDS,
            FieldKind::Longitude => LONGITUDE_FIELDS,
            FieldKind::Easting => EASTING_FIELDS,
            FieldKind::Northing => NORTHING_FIELDS,
        }
    }
}

/// Returns the value of the first candidate key present in `row` whose
/// trimmed string form is non-empty.
pub fn resolve<'r, S: AsRef<str>>(row: &'r Row, candidates: &[S]) -> Option<&'r CellValue> {
    candidates
        .iter()
        .filter_map(|key| row.get(key.as_ref()))
        .find(|value| !value.is_blank())
}

/// Extra header aliases appended after the built-in lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSynonyms {
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub latitude: Vec<String>,
    #[serde(default)]
    pub longitude: Vec<String>,
    #[serde(default)]
    pub easting: Vec<String>,
    #[serde(default)]
    pub northing: Vec<String>,
}

impl FieldSynonyms {
    fn extra(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::Latitude => &self.latitude,
            FieldKind::Longitude => &self.longitude,
            FieldKind::Easting => &self.easting,
            FieldKind::Northing => &self.northing,
        }
    }
}

/// Resolves semantic fields using the built-in candidate lists, optionally
/// extended with configured aliases of lower priority.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolver {
    name: Vec<String>,
    latitude: Vec<String>,
    longitude: Vec<String>,
    easting: Vec<String>,
    northing: Vec<String>,
}

impl FieldResolver {
    /// Creates a resolver with only the built-in candidate lists
    pub fn new() -> Self {
        Self::with_synonyms(&FieldSynonyms::default())
    }

    /// Creates a resolver whose lists are the built-ins followed by `extra`.
    ///
    /// Aliases already present earlier in a list are not repeated.
    pub fn with_synonyms(extra: &FieldSynonyms) -> Self {
        let build = |kind: FieldKind| {
            let mut keys: Vec<String> = kind.candidates().iter().map(|s| s.to_string()).collect();
            for alias in extra.extra(kind) {
                let alias = alias.trim();
                if !alias.is_empty() && !keys.iter().any(|k| k == alias) {
                    keys.push(alias.to_string());
                }
            }
            keys
        };

        Self {
            name: build(FieldKind::Name),
            latitude: build(FieldKind::Latitude),
            longitude: build(FieldKind::Longitude),
            easting: build(FieldKind::Easting),
            northing: build(FieldKind::Northing),
        }
    }

    /// Returns the candidate keys for `kind`, in priority order
    pub fn candidates(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::Latitude => &self.latitude,
            FieldKind::Longitude => &self.longitude,
            FieldKind::Easting => &self.easting,
            FieldKind::Northing => &self.northing,
        }
    }

    /// Resolves `kind` in `row`
    pub fn resolve<'r>(&self, row: &'r Row, kind: FieldKind) -> Option<&'r CellValue> {
        resolve(row, self.candidates(kind))
    }
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

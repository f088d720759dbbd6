//! survey-kml - Turn survey tables into KML
//!
//! survey-kml reads CSV and spreadsheet files whose column names are not known
//! in advance, finds the coordinate columns, projects UTM easting/northing
//! pairs to WGS84, and writes the points as a KML document.
//!
//! # Examples
//!
//! ## Converting a file
//!
//! ```
//! use survey_kml::{convert, ConvertOptions};
//!
//! let csv = b"Nama,Easting,Northing\nBM-01,500000,9600000\n";
//! let conversion = convert("survey.csv", csv, "51S", ConvertOptions::default())?;
//!
//! assert_eq!(conversion.file_name, "survey.kml");
//! assert_eq!(conversion.points.len(), 1);
//! # Ok::<(), survey_kml::Error>(())
//! ```
//!
//! ## Building points from rows
//!
//! ```
//! use survey_kml::{build, Row, ZoneDescriptor};
//!
//! let rows = vec![
//!     Row::new().with("lat", "-6.2").with("lon", "106.8"),
//!     Row::new().with("x", "700000").with("y", "9300000"),
//! ];
//! let points = build(&rows, "48S".parse::<ZoneDescriptor>()?);
//!
//! assert_eq!(points.len(), 2);
//! assert_eq!(points.as_slice()[1].name, "Point 2");
//! # Ok::<(), survey_kml::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod convert;
pub mod error;
pub mod fields;
pub mod formats;
pub mod io;
pub mod pipeline;
pub mod projection;
pub mod types;

pub use config::Config;
pub use convert::{convert, convert_file, extract, extract_file, Conversion, ConvertOptions};
pub use error::{Error, Rejection, Result};
pub use fields::{FieldKind, FieldResolver, FieldSynonyms};
pub use pipeline::{build, BuildReport, CoordinateNormalizer, PointBuilder};
pub use projection::{project, Coordinate, Hemisphere, UtmProjector, ZoneDescriptor};
pub use types::{Bounds, CellValue, Point, PointSequence, Row};

/// Crate version, reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Output document formats

pub mod kml;

pub use kml::{export, KmlWriter, KML_MIME_TYPE};

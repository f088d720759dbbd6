//! End-to-end conversion: file bytes and a zone token in, KML out
//!
//! Failure order matters to callers: a bad zone token is reported before the
//! file is even looked at, then an unsupported extension, then parse errors,
//! and finally an empty result as [`Error::NoUsablePoints`].

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::fields::FieldResolver;
use crate::formats::kml;
use crate::io;
use crate::io::SourceFormat;
use crate::pipeline::{BuildReport, PointBuilder};
use crate::projection::ZoneDescriptor;
use crate::types::PointSequence;

/// Options for one conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Document title; defaults to the source file name
    pub title: Option<String>,
    /// Field resolver; defaults to the built-in synonyms
    pub resolver: Option<FieldResolver>,
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Zone used for projected rows
    pub zone: ZoneDescriptor,
    /// Extracted points, in input order
    pub points: PointSequence,
    /// What was skipped
    pub report: BuildReport,
    /// KML document bytes
    pub document: Vec<u8>,
    /// Suggested download name (`<base>.kml`)
    pub file_name: String,
}

/// Extracts points without rendering a document.
///
/// Unlike [`convert`], an empty result is returned as an empty sequence.
pub fn extract(
    file_name: &str,
    bytes: &[u8],
    zone_token: &str,
    resolver: Option<FieldResolver>,
) -> Result<(ZoneDescriptor, PointSequence, BuildReport)> {
    let zone = ZoneDescriptor::parse(zone_token)?;
    SourceFormat::from_file_name(file_name)?;

    let rows = io::read_rows(file_name, bytes)?;
    let builder = PointBuilder::with_resolver(zone, resolver.unwrap_or_default());
    let (points, report) = builder.build_with_report(&rows);
    Ok((zone, points, report))
}

/// Converts a tabular file into a KML document
pub fn convert(file_name: &str, bytes: &[u8], zone_token: &str, options: ConvertOptions) -> Result<Conversion> {
    let (zone, points, report) = extract(file_name, bytes, zone_token, options.resolver)?;
    if points.is_empty() {
        return Err(Error::NoUsablePoints);
    }

    let title = options.title.as_deref().unwrap_or(file_name);
    let document = kml::export(&points, title)?;
    let output_name = kml::output_file_name(file_name);

    info!(
        file = file_name,
        %zone,
        points = points.len(),
        bytes = document.len(),
        "converted to KML"
    );

    Ok(Conversion {
        zone,
        points,
        report,
        document,
        file_name: output_name,
    })
}

/// Reads a file from disk for [`convert`] or [`extract`].
///
/// The zone token and the extension are checked before the file is opened,
/// so a bad zone is reported even when the path does not exist.
pub fn read_input<P: AsRef<Path>>(path: P, zone_token: &str) -> Result<(String, Vec<u8>)> {
    let path = path.as_ref();
    ZoneDescriptor::parse(zone_token)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::UnsupportedFormat(format!("{}", path.display())))?
        .to_string();
    SourceFormat::from_file_name(&file_name)?;

    let bytes = std::fs::read(path)?;
    Ok((file_name, bytes))
}

/// [`convert`] for a file on disk
pub fn convert_file<P: AsRef<Path>>(path: P, zone_token: &str, options: ConvertOptions) -> Result<Conversion> {
    let (file_name, bytes) = read_input(path, zone_token)?;
    convert(&file_name, &bytes, zone_token, options)
}

/// [`extract`] for a file on disk
pub fn extract_file<P: AsRef<Path>>(
    path: P,
    zone_token: &str,
    resolver: Option<FieldResolver>,
) -> Result<(ZoneDescriptor, PointSequence, BuildReport)> {
    let (file_name, bytes) = read_input(path, zone_token)?;
    extract(&file_name, &bytes, zone_token, resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &[u8] = b"name,lat,lon,easting,northing\n\
Jakarta,-6.2,106.8,,\n\
A & B,,,,\n\
,,,500000,9600000\n";

    #[test]
    fn test_convert_mixed_file() {
        let conversion = convert("titik.csv", MIXED, "51S", ConvertOptions::default()).unwrap();

        assert_eq!(conversion.file_name, "titik.kml");
        assert_eq!(conversion.points.len(), 2);
        assert_eq!(conversion.report.missing_coordinate, 1);

        let first = &conversion.points.as_slice()[0];
        assert_eq!((first.latitude, first.longitude), (-6.2, 106.8));
        assert_eq!(first.name, "Jakarta");

        let second = &conversion.points.as_slice()[1];
        assert_eq!(second.name, "Point 3");
        assert_eq!(second.source_index, 2);
        assert!((second.longitude - 123.0).abs() < 1e-9);
        assert!((second.latitude - -3.618_877_192_7).abs() < 1e-7);

        let doc = String::from_utf8(conversion.document).unwrap();
        assert!(doc.contains("<name>titik.csv</name>"));
        assert!(doc.contains("<coordinates>106.8,-6.2,0</coordinates>"));
        assert!(!doc.contains("A & B"));
    }

    #[test]
    fn test_custom_title() {
        let options = ConvertOptions {
            title: Some("Survey <2024>".to_string()),
            ..Default::default()
        };
        let conversion = convert("titik.csv", MIXED, "51S", options).unwrap();
        let doc = String::from_utf8(conversion.document).unwrap();
        assert!(doc.contains("<name>Survey &lt;2024&gt;</name>"));
    }

    #[test]
    fn test_zone_error_comes_first() {
        let err = convert("points.pdf", b"", "99Z", ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ZoneParse(_)));
    }

    #[test]
    fn test_unsupported_format() {
        let err = convert("points.pdf", b"", "51S", ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_no_usable_points_is_distinct() {
        let err = convert("empty.csv", b"name\nA & B\n", "51S", ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoUsablePoints));

        let err = convert("empty.csv", b"", "51S", ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoUsablePoints));
    }

    #[test]
    fn test_extract_allows_empty() {
        let (zone, points, report) = extract("empty.csv", b"lat,lon\n", "48N", None).unwrap();
        assert_eq!(zone.to_string(), "48N");
        assert!(points.is_empty());
        assert_eq!(report.total_rows, 0);
    }

    #[test]
    fn test_custom_resolver() {
        let synonyms = crate::fields::FieldSynonyms {
            easting: vec!["timur".to_string()],
            northing: vec!["utara".to_string()],
            ..Default::default()
        };
        let options = ConvertOptions {
            resolver: Some(FieldResolver::with_synonyms(&synonyms)),
            ..Default::default()
        };
        let conversion = convert("t.csv", b"timur,utara\n500000,9600000\n", "51S", options).unwrap();
        assert_eq!(conversion.points.len(), 1);
    }

    #[test]
    fn test_file_zone_checked_before_disk() {
        let err = convert_file("/definitely/not/here/points.pdf", "99Z", ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::ZoneParse(ref t) if t == "99Z"));

        let err = extract_file("/definitely/not/here/points.pdf", "99Z", None).unwrap_err();
        assert!(matches!(err, Error::ZoneParse(_)));
    }

    #[test]
    fn test_file_format_checked_before_disk() {
        let err = convert_file("/definitely/not/here/points.pdf", "51S", ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_file_missing_is_io() {
        let err = convert_file("/definitely/not/here/points.csv", "51S", ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_convert_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        file.write_all(MIXED).unwrap();
        file.flush().unwrap();

        let conversion = convert_file(file.path(), "51S", ConvertOptions::default()).unwrap();
        assert_eq!(conversion.points.len(), 2);
        assert!(conversion.file_name.ends_with(".kml"));

        let (_, points, _) = extract_file(file.path(), "51s", None).unwrap();
        assert_eq!(points, conversion.points);
    }
}

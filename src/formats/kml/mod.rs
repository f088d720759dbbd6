//! KML (Keyhole Markup Language) output
//!
//! # Examples
//!
//! ```
//! use survey_kml::formats::kml;
//! use survey_kml::Point;
//!
//! let points = vec![Point {
//!     latitude: -6.2,
//!     longitude: 106.8,
//!     name: "Jakarta".to_string(),
//!     source_index: 0,
//! }];
//!
//! let bytes = kml::export(&points, "survey.csv")?;
//! let doc = String::from_utf8(bytes).unwrap();
//! assert!(doc.contains("<coordinates>106.8,-6.2,0</coordinates>"));
//! # Ok::<(), survey_kml::Error>(())
//! ```

pub mod escape;
pub mod writer;

pub use escape::escape_xml;
pub use writer::KmlWriter;

use crate::error::Result;
use crate::types::Point;

/// KML 2.2 namespace URI
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// MIME type of KML documents
pub const KML_MIME_TYPE: &str = "application/vnd.google-earth.kml+xml";

/// File extension of KML documents, without the dot
pub const KML_EXTENSION: &str = "kml";

/// Serialises `points` as a KML document titled `title`
pub fn export<'a, I>(points: I, title: &str) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Point>,
{
    KmlWriter::new().to_bytes(title, points)
}

/// Returns the KML MIME type as a [`mime::Mime`]
pub fn mime_type() -> mime::Mime {
    KML_MIME_TYPE
        .parse()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

/// Derives the download name for a source file: the base name with its last
/// extension replaced by `.kml`.
///
/// Directory components are dropped. Names with no usable base fall back to
/// `output.kml`.
pub fn output_file_name(source_name: &str) -> String {
    let base = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name);

    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };

    if stem.trim().is_empty() {
        format!("output.{}", KML_EXTENSION)
    } else {
        format!("{}.{}", stem, KML_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn point(name: &str, lat: f64, lon: f64, idx: usize) -> Point {
        Point {
            latitude: lat,
            longitude: lon,
            name: name.to_string(),
            source_index: idx,
        }
    }

    /// Re-reads a document with an independent XML parser, returning the
    /// document title and each placemark's (name, lon, lat, alt).
    fn parse(doc: &[u8]) -> (String, Vec<(String, f64, f64, f64)>) {
        let mut reader = Reader::from_reader(doc);
        let mut buf = Vec::new();
        let mut path: Vec<String> = Vec::new();
        let mut title = String::new();
        let mut placemarks = Vec::new();
        let mut name = String::new();

        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => {
                    path.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Text(t) => {
                    let value = t.unescape().unwrap().into_owned();
                    match path.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
                        ["kml", "Document", "name"] => title.push_str(&value),
                        ["kml", "Document", "Placemark", "name"] => name.push_str(&value),
                        ["kml", "Document", "Placemark", "Point", "coordinates"] => {
                            let parts: Vec<f64> =
                                value.split(',').map(|p| p.parse().unwrap()).collect();
                            placemarks.push((std::mem::take(&mut name), parts[0], parts[1], parts[2]));
                        }
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        (title, placemarks)
    }

    #[test]
    fn test_round_trip_through_xml_parser() {
        let points = vec![
            point("Jakarta", -6.2, 106.8, 0),
            point("A < B & \"C\"", -3.618_877_192_7, 123.0, 2),
            point("it's > 'quoted'", 45.125_153_847_6, 12.456_876_510_2, 5),
            point("Sumur Bor №3 北", 0.0, -0.000_000_027_6, 9),
        ];

        let bytes = export(&points, "Data <Survey> & 'Co'.xlsx").unwrap();
        let (title, placemarks) = parse(&bytes);

        assert_eq!(title, "Data <Survey> & 'Co'.xlsx");
        assert_eq!(placemarks.len(), points.len());
        for (p, (name, lon, lat, alt)) in points.iter().zip(&placemarks) {
            assert_eq!(&p.name, name);
            assert_eq!(p.longitude, *lon);
            assert_eq!(p.latitude, *lat);
            assert_eq!(*alt, 0.0);
        }
    }

    #[test]
    fn test_output_is_utf8() {
        let points = vec![point("Titik Ä", 1.0, 2.0, 0)];
        let bytes = export(&points, "ü.csv").unwrap();
        assert!(std::str::from_utf8(&bytes).is_ok());
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("survey.csv"), "survey.kml");
        assert_eq!(output_file_name("data.backup.xlsx"), "data.backup.kml");
        assert_eq!(output_file_name("C:\\Users\\me\\titik.XLS"), "titik.kml");
        assert_eq!(output_file_name("/tmp/points"), "points.kml");
        assert_eq!(output_file_name(".csv"), ".csv.kml");
        assert_eq!(output_file_name(""), "output.kml");
        assert_eq!(output_file_name("dir/"), "output.kml");
    }

    #[test]
    fn test_mime_type() {
        let mime = mime_type();
        assert_eq!(mime.essence_str(), KML_MIME_TYPE);
        assert_eq!(mime.subtype().as_str(), "vnd.google-earth.kml");
        assert_eq!(mime.suffix().map(|s| s.as_str()), Some("xml"));
    }
}

//! KML document writer

use std::io::Write;

use crate::error::Result;
use crate::types::Point;

use super::escape::{escape_xml, strip_invalid_xml_chars};
use super::KML_NAMESPACE;

/// Writes point sequences as KML 2.2 documents.
///
/// The output is UTF-8, has no DTD, and contains one `Placemark` per point in
/// sequence order. Coordinates are written as `longitude,latitude,0` using
/// the shortest decimal form that parses back to the same `f64`.
#[derive(Debug, Clone)]
pub struct KmlWriter {
    indent: &'static str,
}

impl KmlWriter {
    /// Creates a writer with two-space indentation
    pub fn new() -> Self {
        Self { indent: "  " }
    }

    /// Writes the document for `points` titled `title` to `out`
    pub fn write<'a, W, I>(&self, out: &mut W, title: &str, points: I) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Point>,
    {
        let i1 = self.indent;
        let i2 = self.indent.repeat(2);
        let i3 = self.indent.repeat(3);
        let i4 = self.indent.repeat(4);

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, r#"<kml xmlns="{}">"#, KML_NAMESPACE)?;
        writeln!(out, "{}<Document>", i1)?;
        writeln!(out, "{}<name>{}</name>", i2, text(title))?;

        for point in points {
            writeln!(out, "{}<Placemark>", i2)?;
            writeln!(out, "{}<name>{}</name>", i3, text(&point.name))?;
            writeln!(out, "{}<Point>", i3)?;
            writeln!(
                out,
                "{}<coordinates>{},{},0</coordinates>",
                i4, point.longitude, point.latitude
            )?;
            writeln!(out, "{}</Point>", i3)?;
            writeln!(out, "{}</Placemark>", i2)?;
        }

        writeln!(out, "{}</Document>", i1)?;
        writeln!(out, "</kml>")?;
        Ok(())
    }

    /// Renders the document into a byte buffer
    pub fn to_bytes<'a, I>(&self, title: &str, points: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut buffer = Vec::with_capacity(512);
        self.write(&mut buffer, title, points)?;
        Ok(buffer)
    }
}

impl Default for KmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn text(raw: &str) -> String {
    escape_xml(&strip_invalid_xml_chars(raw)).into_owned()
}

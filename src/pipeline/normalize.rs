//! Per-row coordinate normalisation
//!
//! A row either already carries geographic coordinates, or carries a UTM
//! easting/northing pair that is projected with the invocation's zone.
//! Geographic coordinates win when both are present.

use tracing::trace;

use crate::error::Rejection;
use crate::fields::{FieldKind, FieldResolver};
use crate::projection::{Coordinate, UtmProjector, ZoneDescriptor};
use crate::types::{CellValue, Point, Row};

/// Parses a cell as a finite number.
///
/// Text is trimmed and every `,` thousands separator is removed before
/// parsing, so `"9,600,000"` is `9600000`. Values that do not parse, or parse
/// to infinity or NaN, yield `None`.
pub fn parse_number(value: &CellValue) -> Option<f64> {
    let n = match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let cleaned: String = s.chars().filter(|&c| c != ',').collect();
            cleaned.trim().parse::<f64>().ok()?
        }
        CellValue::Empty => return None,
    };

    n.is_finite().then_some(n)
}

/// Turns rows into points for one zone
#[derive(Debug, Clone)]
pub struct CoordinateNormalizer {
    resolver: FieldResolver,
    projector: UtmProjector,
    zone: ZoneDescriptor,
}

impl CoordinateNormalizer {
    /// Creates a normaliser with the built-in field synonyms
    pub fn new(zone: ZoneDescriptor) -> Self {
        Self::with_resolver(zone, FieldResolver::new())
    }

    /// Creates a normaliser with a custom field resolver
    pub fn with_resolver(zone: ZoneDescriptor, resolver: FieldResolver) -> Self {
        Self {
            resolver,
            projector: UtmProjector::wgs84(),
            zone,
        }
    }

    /// Returns the zone used for projected rows
    pub fn zone(&self) -> ZoneDescriptor {
        self.zone
    }

    /// Normalises the row at `index` (zero-based) into a point
    pub fn normalize(&self, row: &Row, index: usize) -> Result<Point, Rejection> {
        let (longitude, latitude) = match self.geographic(row) {
            Some(lonlat) => lonlat,
            None => self.projected(row)?,
        };

        let name = self
            .resolver
            .resolve(row, FieldKind::Name)
            .map(|v| v.as_text().into_owned())
            .unwrap_or_else(|| format!("Point {}", index + 1));

        Ok(Point {
            latitude,
            longitude,
            name,
            source_index: index,
        })
    }

    /// Returns true when the row carries both a usable geographic pair and a
    /// usable projected pair. Such rows are normalised from the geographic
    /// pair; callers may want to flag them for review.
    pub fn has_both_coordinate_kinds(&self, row: &Row) -> bool {
        self.geographic(row).is_some() && self.projected_pair(row).is_some()
    }

    fn number(&self, row: &Row, kind: FieldKind) -> Option<f64> {
        self.resolver.resolve(row, kind).and_then(parse_number)
    }

    /// (lon, lat) when both are numeric and inside their valid ranges
    fn geographic(&self, row: &Row) -> Option<(f64, f64)> {
        let lat = self.number(row, FieldKind::Latitude)?;
        let lon = self.number(row, FieldKind::Longitude)?;

        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some((lon, lat))
        } else {
            trace!(lat, lon, "geographic pair out of range, trying projected fields");
            None
        }
    }

    fn projected_pair(&self, row: &Row) -> Option<(f64, f64)> {
        let easting = self.number(row, FieldKind::Easting)?;
        let northing = self.number(row, FieldKind::Northing)?;
        Some((easting, northing))
    }

    fn projected(&self, row: &Row) -> Result<(f64, f64), Rejection> {
        let (easting, northing) = self.projected_pair(row).ok_or(Rejection::MissingCoordinate)?;

        let geographic = self
            .projector
            .inverse(Coordinate::from_easting_northing(easting, northing), self.zone)
            .map_err(|_| Rejection::ProjectionFailure)?;

        Ok((geographic.lon(), geographic.lat()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zone(token: &str) -> ZoneDescriptor {
        ZoneDescriptor::parse(token).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&CellValue::from("9,600,000")), Some(9_600_000.0));
        assert_eq!(parse_number(&CellValue::from(" -6.2 ")), Some(-6.2));
        assert_eq!(parse_number(&CellValue::from("1e3")), Some(1000.0));
        assert_eq!(parse_number(&CellValue::Number(106.8)), Some(106.8));
        assert_eq!(parse_number(&CellValue::from("abc")), None);
        assert_eq!(parse_number(&CellValue::from("inf")), None);
        assert_eq!(parse_number(&CellValue::from("NaN")), None);
        assert_eq!(parse_number(&CellValue::Number(f64::NAN)), None);
        assert_eq!(parse_number(&CellValue::from("")), None);
        assert_eq!(parse_number(&CellValue::Empty), None);
    }

    #[test]
    fn test_geographic_row_passes_through() {
        let row = Row::new().with("lat", "-6.2").with("lon", "106.8").with("name", "Jakarta");
        for z in ["51S", "1N", "60S"] {
            let point = CoordinateNormalizer::new(zone(z)).normalize(&row, 0).unwrap();
            assert_eq!(point.latitude, -6.2);
            assert_eq!(point.longitude, 106.8);
            assert_eq!(point.name, "Jakarta");
            assert_eq!(point.source_index, 0);
        }
    }

    #[test]
    fn test_projected_row() {
        let row = Row::new().with("easting", "500000").with("northing", "9600000");
        let point = CoordinateNormalizer::new(zone("51S")).normalize(&row, 3).unwrap();

        assert!((point.longitude - 123.0).abs() < 1e-4);
        assert!((point.latitude - -3.618_877).abs() < 1e-4);
        assert_eq!(point.name, "Point 4");
        assert_eq!(point.source_index, 3);
    }

    #[test]
    fn test_projected_row_with_separators_and_aliases() {
        let row = Row::new().with("X", "700,000").with("utm_y", "9,300,000").with("Titik", "BM-01");
        let point = CoordinateNormalizer::new(zone("48S")).normalize(&row, 0).unwrap();
        assert!((point.longitude - 106.808_005).abs() < 1e-6);
        assert!((point.latitude - -6.329_713).abs() < 1e-6);
        assert_eq!(point.name, "BM-01");
    }

    #[test]
    fn test_geographic_wins_over_projected() {
        let row = Row::new()
            .with("latitude", "-6.2")
            .with("longitude", "106.8")
            .with("easting", "500000")
            .with("northing", "9600000");
        let normalizer = CoordinateNormalizer::new(zone("51S"));

        let point = normalizer.normalize(&row, 0).unwrap();
        assert_eq!((point.latitude, point.longitude), (-6.2, 106.8));
        assert!(normalizer.has_both_coordinate_kinds(&row));
    }

    #[test]
    fn test_half_geographic_falls_back_to_projected() {
        let row = Row::new()
            .with("lat", "-6.2")
            .with("lon", "n/a")
            .with("easting", "500000")
            .with("northing", "9600000");
        let point = CoordinateNormalizer::new(zone("51S")).normalize(&row, 0).unwrap();
        assert!((point.longitude - 123.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_geographic_is_not_geographic() {
        let row = Row::new().with("lat", "9600000").with("lon", "500000");
        let result = CoordinateNormalizer::new(zone("51S")).normalize(&row, 0);
        assert_eq!(result, Err(Rejection::MissingCoordinate));
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let normalizer = CoordinateNormalizer::new(zone("51S"));

        let row = Row::new().with("name", "A & B");
        assert_eq!(normalizer.normalize(&row, 0), Err(Rejection::MissingCoordinate));

        let row = Row::new().with("easting", "500000").with("northing", "  ");
        assert_eq!(normalizer.normalize(&row, 0), Err(Rejection::MissingCoordinate));

        let row = Row::new().with("easting", "500000").with("northing", "north");
        assert_eq!(normalizer.normalize(&row, 0), Err(Rejection::MissingCoordinate));
    }

    #[test]
    fn test_projection_failure_rejected() {
        let row = Row::new().with("easting", "1e300").with("northing", "0");
        let result = CoordinateNormalizer::new(zone("51N")).normalize(&row, 0);
        assert_eq!(result, Err(Rejection::ProjectionFailure));
    }

    #[test]
    fn test_numeric_name_cell() {
        let row = Row::new().with("id", 17.0).with("lat", 1.5).with("lon", 2.5);
        let point = CoordinateNormalizer::new(zone("51S")).normalize(&row, 0).unwrap();
        assert_eq!(point.name, "17");
    }

    #[test]
    fn test_deterministic() {
        let row = Row::new().with("x", "612345.6").with("y", "9123456.7");
        let normalizer = CoordinateNormalizer::new(zone("50S"));
        assert_eq!(normalizer.normalize(&row, 9), normalizer.normalize(&row, 9));
    }

    proptest! {
        #[test]
        fn prop_valid_geographic_values_are_unchanged(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            easting in 100_000.0f64..900_000.0,
            northing in 0.0f64..10_000_000.0,
            with_projected in any::<bool>(),
            number in 1u8..=60,
        ) {
            let mut row = Row::new().with("lat", lat.to_string()).with("lon", lon.to_string());
            if with_projected {
                row.insert("easting", easting.to_string());
                row.insert("northing", northing.to_string());
            }
            let z = ZoneDescriptor::new(number, crate::projection::Hemisphere::South).unwrap();

            let point = CoordinateNormalizer::new(z).normalize(&row, 0).unwrap();
            prop_assert_eq!(point.latitude, lat);
            prop_assert_eq!(point.longitude, lon);
        }
    }
}

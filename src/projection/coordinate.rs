/// A planar or geographic coordinate pair
///
/// Geographic coordinates are stored longitude first (`x = lon`, `y = lat`),
/// projected ones as easting/northing in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a coordinate from longitude/latitude in degrees (WGS84)
    pub fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat)
    }

    /// Creates a coordinate from a UTM easting/northing in metres
    pub fn from_easting_northing(easting: f64, northing: f64) -> Self {
        Self::new(easting, northing)
    }

    /// Returns true when both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Longitude, for geographic coordinates
    pub fn lon(&self) -> f64 {
        self.x
    }

    /// Latitude, for geographic coordinates
    pub fn lat(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lonlat_order() {
        let c = Coordinate::from_lonlat(106.8, -6.2);
        assert_eq!(c.x, 106.8);
        assert_eq!(c.lat(), -6.2);
    }

    #[test]
    fn test_is_finite() {
        assert!(Coordinate::new(1.0, 2.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 2.0).is_finite());
        assert!(!Coordinate::new(1.0, f64::INFINITY).is_finite());
    }
}

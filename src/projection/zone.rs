//! UTM zone descriptors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest valid UTM zone number
pub const MIN_ZONE: u8 = 1;

/// Highest valid UTM zone number
pub const MAX_ZONE: u8 = 60;

/// Hemisphere of a UTM zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Returns the single-letter form (`N` or `S`)
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }

    /// Returns the false northing for this hemisphere in metres
    pub fn false_northing(&self) -> f64 {
        match self {
            Hemisphere::North => 0.0,
            Hemisphere::South => 10_000_000.0,
        }
    }
}

/// A UTM zone number (1-60) and hemisphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneDescriptor {
    number: u8,
    hemisphere: Hemisphere,
}

impl ZoneDescriptor {
    /// Creates a zone descriptor, validating the zone number
    pub fn new(number: u8, hemisphere: Hemisphere) -> Result<Self> {
        if !(MIN_ZONE..=MAX_ZONE).contains(&number) {
            return Err(Error::ZoneParse(format!("{}{}", number, hemisphere.letter())));
        }
        Ok(Self { number, hemisphere })
    }

    /// Parses a compact token such as `51S` or `48n`.
    ///
    /// Surrounding whitespace is ignored. The zone number is one or two
    /// digits; the hemisphere letter is case-insensitive.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || Error::ZoneParse(token.to_string());
        let trimmed = token.trim();

        let mut chars = trimmed.chars();
        let hemisphere = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('N') => Hemisphere::North,
            Some('S') => Hemisphere::South,
            _ => return Err(invalid()),
        };

        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let number: u8 = digits.parse().map_err(|_| invalid())?;
        Self::new(number, hemisphere).map_err(|_| invalid())
    }

    /// Returns the zone number
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Returns the hemisphere
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Returns the longitude of the zone's central meridian in degrees
    pub fn central_meridian(&self) -> f64 {
        -183.0 + 6.0 * f64::from(self.number)
    }

    /// Returns the zone containing `longitude`, in the given hemisphere.
    ///
    /// Longitudes are wrapped into [-180, 180) first; 180 belongs to zone 1.
    pub fn for_longitude(longitude: f64, hemisphere: Hemisphere) -> Result<Self> {
        if !longitude.is_finite() {
            return Err(Error::Projection(format!("Invalid longitude: {}", longitude)));
        }
        let wrapped = (longitude + 180.0).rem_euclid(360.0);
        let number = (wrapped / 6.0).floor() as u8 + 1;
        Self::new(number.min(MAX_ZONE), hemisphere)
    }
}

impl FromStr for ZoneDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ZoneDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.hemisphere.letter())
    }
}

impl Serialize for ZoneDescriptor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ZoneDescriptor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tokens() {
        let zone = ZoneDescriptor::parse("51S").unwrap();
        assert_eq!(zone.number(), 51);
        assert_eq!(zone.hemisphere(), Hemisphere::South);

        let zone: ZoneDescriptor = " 7n ".parse().unwrap();
        assert_eq!(zone.number(), 7);
        assert_eq!(zone.hemisphere(), Hemisphere::North);

        assert_eq!(ZoneDescriptor::parse("01N").unwrap().number(), 1);
        assert_eq!(ZoneDescriptor::parse("60S").unwrap().number(), 60);
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for token in ["", "S", "51", "0N", "61S", "100N", "5 1S", "51X", "-5N", "51SS", "٥١S"] {
            assert!(
                matches!(ZoneDescriptor::parse(token), Err(Error::ZoneParse(ref t)) if t == token),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_new_validates_range() {
        assert!(ZoneDescriptor::new(0, Hemisphere::North).is_err());
        assert!(ZoneDescriptor::new(61, Hemisphere::South).is_err());
        assert!(ZoneDescriptor::new(60, Hemisphere::South).is_ok());
    }

    #[test]
    fn test_central_meridian() {
        assert_eq!(ZoneDescriptor::parse("1N").unwrap().central_meridian(), -177.0);
        assert_eq!(ZoneDescriptor::parse("31N").unwrap().central_meridian(), 3.0);
        assert_eq!(ZoneDescriptor::parse("51S").unwrap().central_meridian(), 123.0);
        assert_eq!(ZoneDescriptor::parse("60N").unwrap().central_meridian(), 177.0);
    }

    #[test]
    fn test_display_roundtrip() {
        let zone = ZoneDescriptor::parse("48s").unwrap();
        assert_eq!(zone.to_string(), "48S");
        assert_eq!(ZoneDescriptor::parse(&zone.to_string()).unwrap(), zone);
    }

    #[test]
    fn test_for_longitude() {
        assert_eq!(ZoneDescriptor::for_longitude(106.8, Hemisphere::South).unwrap().number(), 48);
        assert_eq!(ZoneDescriptor::for_longitude(-180.0, Hemisphere::North).unwrap().number(), 1);
        assert_eq!(ZoneDescriptor::for_longitude(180.0, Hemisphere::North).unwrap().number(), 1);
        assert_eq!(ZoneDescriptor::for_longitude(179.9, Hemisphere::North).unwrap().number(), 60);
        assert!(ZoneDescriptor::for_longitude(f64::NAN, Hemisphere::North).is_err());
    }

    #[test]
    fn test_serde_as_token() {
        let zone = ZoneDescriptor::parse("50N").unwrap();
        let json = serde_json::to_string(&zone).unwrap();
        assert_eq!(json, "\"50N\"");
        let back: ZoneDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, zone);
        assert!(serde_json::from_str::<ZoneDescriptor>("\"77Q\"").is_err());
    }
}

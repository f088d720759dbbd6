//! Coordinate projection between UTM and WGS84 geographic coordinates

pub mod coordinate;
pub mod ellipsoid;
pub mod utm;
pub mod zone;

pub use coordinate::Coordinate;
pub use ellipsoid::{Ellipsoid, WGS84};
pub use utm::{project, UtmProjector};
pub use zone::{Hemisphere, ZoneDescriptor};

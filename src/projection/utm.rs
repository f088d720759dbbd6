//! Universal Transverse Mercator projection
//!
//! Both directions use Krüger's series in the third flattening `n`, carried
//! to sixth order. Within a UTM zone this is accurate to well under a
//! millimetre, which makes the inverse agree with PROJ's `utm` to about
//! 1e-9 degrees.
//!
//! Inverse outline:
//! 1. Remove false easting/northing and scale, giving the normalised
//!    rectifying coordinates (xi, eta).
//! 2. Undo the Krüger series (`beta` coefficients) to get the spherical
//!    transverse Mercator coordinates (xi', eta').
//! 3. Convert to conformal latitude and longitude offset.
//! 4. Solve for the footpoint geodetic latitude by Newton iteration on
//!    tan(phi).

use crate::error::{Error, Result};
use crate::projection::coordinate::Coordinate;
use crate::projection::ellipsoid::{Ellipsoid, WGS84};
use crate::projection::zone::ZoneDescriptor;

/// UTM central scale factor
pub const SCALE_FACTOR: f64 = 0.9996;

/// UTM false easting in metres
pub const FALSE_EASTING: f64 = 500_000.0;

const SERIES_ORDER: usize = 6;
const MAX_NEWTON_ITERATIONS: usize = 10;

/// Converts between UTM easting/northing and geographic longitude/latitude
#[derive(Debug, Clone)]
pub struct UtmProjector {
    ellipsoid: Ellipsoid,
    eccentricity: f64,
    /// k0 * A
    scaled_radius: f64,
    alpha: [f64; SERIES_ORDER],
    beta: [f64; SERIES_ORDER],
}

impl UtmProjector {
    /// Creates a projector on the WGS84 ellipsoid
    pub fn wgs84() -> Self {
        Self::build(WGS84)
    }

    fn build(ellipsoid: Ellipsoid) -> Self {
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1118711.0 * n6 / 3870720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
            4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
            20648693.0 * n6 / 638668800.0,
        ];

        Self {
            ellipsoid,
            eccentricity: ellipsoid.eccentricity(),
            scaled_radius: SCALE_FACTOR * ellipsoid.rectifying_radius(),
            alpha,
            beta,
        }
    }

    /// Converts an easting/northing in `zone` to longitude/latitude in degrees
    pub fn inverse(&self, projected: Coordinate, zone: ZoneDescriptor) -> Result<Coordinate> {
        if !projected.is_finite() {
            return Err(Error::Projection(format!(
                "Non-finite input: easting={}, northing={}",
                projected.x, projected.y
            )));
        }

        let xi = (projected.y - zone.hemisphere().false_northing()) / self.scaled_radius;
        let eta = (projected.x - FALSE_EASTING) / self.scaled_radius;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_p.sinh();
        let cos_xi = xi_p.cos();
        let tau_p = xi_p.sin() / sinh_eta.hypot(cos_xi);
        let lambda = sinh_eta.atan2(cos_xi);

        let tau = self.tau_from_conformal(tau_p)?;
        let latitude = tau.atan().to_degrees();
        let longitude = wrap_longitude(zone.central_meridian() + lambda.to_degrees());

        let result = Coordinate::from_lonlat(longitude, latitude);
        if !result.is_finite() {
            return Err(Error::Projection(format!(
                "Non-finite result for easting={}, northing={} in zone {}",
                projected.x, projected.y, zone
            )));
        }
        Ok(result)
    }

    /// Converts longitude/latitude in degrees to easting/northing in `zone`
    pub fn forward(&self, geographic: Coordinate, zone: ZoneDescriptor) -> Result<Coordinate> {
        let (lon, lat) = (geographic.lon(), geographic.lat());
        if !geographic.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::Projection(format!(
                "Invalid geographic input: lon={}, lat={}",
                lon, lat
            )));
        }

        let lambda = wrap_longitude(lon - zone.central_meridian()).to_radians();
        let tau = lat.to_radians().tan();
        let tau_p = self.conformal_tau(tau);

        let xi_p = tau_p.atan2(lambda.cos());
        let eta_p = (lambda.sin() / tau_p.hypot(lambda.cos())).asinh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let easting = FALSE_EASTING + self.scaled_radius * eta;
        let northing = zone.hemisphere().false_northing() + self.scaled_radius * xi;

        let result = Coordinate::from_easting_northing(easting, northing);
        if !result.is_finite() {
            return Err(Error::Projection(format!(
                "Non-finite result for lon={}, lat={} in zone {}",
                lon, lat, zone
            )));
        }
        Ok(result)
    }

    /// tan(conformal latitude) from tan(geodetic latitude)
    fn conformal_tau(&self, tau: f64) -> f64 {
        let e = self.eccentricity;
        let tau1 = 1.0_f64.hypot(tau);
        let sigma = (e * (e * tau / tau1).atanh()).sinh();
        tau * 1.0_f64.hypot(sigma) - sigma * tau1
    }

    /// tan(geodetic latitude) from tan(conformal latitude), by Newton's method
    fn tau_from_conformal(&self, tau_p: f64) -> Result<f64> {
        let e2m = 1.0 - self.ellipsoid.eccentricity_squared();
        let tolerance = f64::EPSILON.sqrt() / 10.0 * tau_p.abs().max(1.0);

        let mut tau = tau_p / e2m;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let tau_i = self.conformal_tau(tau);
            let d_tau = (tau_p - tau_i) / 1.0_f64.hypot(tau_i) * (1.0 + e2m * tau * tau)
                / (e2m * 1.0_f64.hypot(tau));
            tau += d_tau;
            if !tau.is_finite() {
                break;
            }
            if d_tau.abs() < tolerance {
                return Ok(tau);
            }
        }

        if tau.is_finite() {
            Ok(tau)
        } else {
            Err(Error::Projection("Footpoint latitude did not converge".to_string()))
        }
    }
}

impl Default for UtmProjector {
    fn default() -> Self {
        Self::wgs84()
    }
}

/// Converts a UTM easting/northing to WGS84 `(longitude, latitude)` in degrees
pub fn project(easting: f64, northing: f64, zone: ZoneDescriptor) -> Result<(f64, f64)> {
    let result = UtmProjector::wgs84().inverse(Coordinate::from_easting_northing(easting, northing), zone)?;
    Ok((result.lon(), result.lat()))
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

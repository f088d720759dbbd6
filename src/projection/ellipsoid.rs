//! Reference ellipsoids

/// An oblate reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis in metres
    pub semi_major_axis: f64,
    /// Flattening
    pub flattening: f64,
}

/// The WGS84 ellipsoid
pub const WGS84: Ellipsoid = Ellipsoid {
    semi_major_axis: 6_378_137.0,
    flattening: 1.0 / 298.257_223_563,
};

impl Ellipsoid {
    /// First eccentricity squared
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    /// First eccentricity
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// Third flattening, n = f / (2 - f)
    pub fn third_flattening(&self) -> f64 {
        self.flattening / (2.0 - self.flattening)
    }

    /// Rectifying radius: the meridian quadrant divided by pi/2
    pub fn rectifying_radius(&self) -> f64 {
        let n = self.third_flattening();
        let n2 = n * n;
        self.semi_major_axis / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0 + n2 * n2 * n2 / 256.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_derived_constants() {
        assert!((WGS84.eccentricity_squared() - 0.006_694_379_990_14).abs() < 1e-14);
        assert!((WGS84.third_flattening() - 0.001_679_220_386_383_705).abs() < 1e-15);
        assert!((WGS84.rectifying_radius() - 6_367_449.145_823_415).abs() < 1e-6);
    }
}

//! Assembles point sequences from row sets

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Rejection;
use crate::fields::FieldResolver;
use crate::pipeline::normalize::CoordinateNormalizer;
use crate::projection::ZoneDescriptor;
use crate::types::{PointSequence, Row};

/// Summary of one build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// Rows examined
    pub total_rows: usize,
    /// Rows that produced a point
    pub accepted: usize,
    /// Rows with no resolvable coordinate pair
    pub missing_coordinate: usize,
    /// Rows whose projected pair could not be transformed
    pub projection_failure: usize,
    /// Source indices of accepted rows that carried both geographic and
    /// projected coordinates (geographic was used)
    pub both_coordinate_kinds: Vec<usize>,
}

impl BuildReport {
    /// Returns the number of rejected rows
    pub fn rejected(&self) -> usize {
        self.missing_coordinate + self.projection_failure
    }

    fn record_rejection(&mut self, reason: Rejection) {
        match reason {
            Rejection::MissingCoordinate => self.missing_coordinate += 1,
            Rejection::ProjectionFailure => self.projection_failure += 1,
        }
    }
}

/// Applies the coordinate normaliser to every row, in order
#[derive(Debug, Clone)]
pub struct PointBuilder {
    normalizer: CoordinateNormalizer,
}

impl PointBuilder {
    /// Creates a builder for `zone` with the built-in field synonyms
    pub fn new(zone: ZoneDescriptor) -> Self {
        Self {
            normalizer: CoordinateNormalizer::new(zone),
        }
    }

    /// Creates a builder for `zone` with a custom field resolver
    pub fn with_resolver(zone: ZoneDescriptor, resolver: FieldResolver) -> Self {
        Self {
            normalizer: CoordinateNormalizer::with_resolver(zone, resolver),
        }
    }

    /// Builds the point sequence. Rejected rows are skipped silently.
    pub fn build(&self, rows: &[Row]) -> PointSequence {
        self.build_with_report(rows).0
    }

    /// Builds the point sequence and a report of what was skipped
    pub fn build_with_report(&self, rows: &[Row]) -> (PointSequence, BuildReport) {
        let mut points = PointSequence::new();
        let mut report = BuildReport {
            total_rows: rows.len(),
            ..Default::default()
        };

        for (index, row) in rows.iter().enumerate() {
            match self.normalizer.normalize(row, index) {
                Ok(point) => {
                    if self.normalizer.has_both_coordinate_kinds(row) {
                        warn!(
                            row = index,
                            "row has both lat/lon and easting/northing; using lat/lon"
                        );
                        report.both_coordinate_kinds.push(index);
                    }
                    points.push(point);
                }
                Err(reason) => {
                    debug!(row = index, %reason, "skipping row");
                    report.record_rejection(reason);
                }
            }
        }

        report.accepted = points.len();
        info!(
            zone = %self.normalizer.zone(),
            total = report.total_rows,
            accepted = report.accepted,
            rejected = report.rejected(),
            "built point sequence"
        );

        (points, report)
    }
}

/// Builds the point sequence for `rows` in `zone`
pub fn build(rows: &[Row], zone: ZoneDescriptor) -> PointSequence {
    PointBuilder::new(zone).build(rows)
}

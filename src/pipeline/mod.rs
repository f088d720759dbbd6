//! Row-to-point extraction pipeline
//!
//! Rows flow through [`CoordinateNormalizer`] (one row at a time) into
//! [`PointBuilder`], which keeps accepted points in input order.

pub mod builder;
pub mod normalize;

pub use builder::{build, BuildReport, PointBuilder};
pub use normalize::{parse_number, CoordinateNormalizer};

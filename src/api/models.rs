use serde::Serialize;

use crate::pipeline::BuildReport;
use crate::types::{Bounds, Point};

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub zone: String,
    pub points: Vec<Point>,
    pub bounds: Option<Bounds>,
    pub report: BuildReport,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Fields collected from a multipart upload
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub file: Option<Vec<u8>>,
    pub zone: Option<String>,
    pub title: Option<String>,
}

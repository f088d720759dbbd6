use std::sync::Arc;

use axum::{
    body::Body,
    extract::{multipart::Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::config::Config;
use crate::convert::{convert, extract, ConvertOptions};
use crate::error::Error;
use crate::formats::kml;
use crate::fields::FieldResolver;
use crate::VERSION;

use super::models::*;

/// Shared state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<FieldResolver>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver = config.resolver();
        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        }
    }
}

/// Error returned by the handlers, rendered as `{ "error": ... }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::UnsupportedFormat(_) | Error::ZoneParse(_) => StatusCode::BAD_REQUEST,
            Error::NoUsablePoints | Error::Csv(_) | Error::Spreadsheet(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;
                form.file = Some(bytes.to_vec());
            }
            "zone" | "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read {}: {}", name, e)))?;
                let text = text.trim();
                if !text.is_empty() {
                    if name == "zone" {
                        form.zone = Some(text.to_string());
                    } else {
                        form.title = Some(text.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Splits a form into (file name, bytes, zone token), applying the configured
/// default zone
fn upload_parts(form: UploadForm, config: &Config) -> Result<(String, Vec<u8>, String), ApiError> {
    let bytes = form.file.ok_or_else(|| ApiError::bad_request("Missing file"))?;
    let file_name = form
        .file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing file name"))?;
    let zone = form.zone.unwrap_or_else(|| config.default_zone.clone());
    Ok((file_name, bytes, zone))
}

pub async fn convert_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;
    let title = form.title.clone();
    let (file_name, bytes, zone) = upload_parts(form, &state.config)?;

    let options = ConvertOptions {
        title,
        resolver: Some(state.resolver.as_ref().clone()),
    };
    let conversion = convert(&file_name, &bytes, &zone, options)?;

    info!(
        file = %file_name,
        points = conversion.points.len(),
        rejected = conversion.report.rejected(),
        "served KML"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, kml::mime_type().as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", conversion.file_name.replace('"', "")),
        )
        .body(Body::from(conversion.document))
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        })
}

pub async fn preview_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PreviewResponse>, ApiError> {
    let form = read_form(multipart).await?;
    let (file_name, bytes, zone) = upload_parts(form, &state.config)?;

    let (zone, points, report) = extract(
        &file_name,
        &bytes,
        &zone,
        Some(state.resolver.as_ref().clone()),
    )?;

    Ok(Json(PreviewResponse {
        zone: zone.to_string(),
        bounds: points.bounds(),
        points: points.into_vec(),
        report,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

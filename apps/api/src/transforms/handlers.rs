//! Axum route handlers for the deterministic transforms.

use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::transforms::featured::tool_of_the_day;
use crate::transforms::presets::Preset;
use crate::transforms::stats::{compute_stats, TextStats};
use crate::transforms::{apply_all, TransformOp};

#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    pub text: String,
    #[serde(default)]
    pub operations: Vec<TransformOp>,
}

#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    pub text: String,
    pub preset: Preset,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub result: String,
    pub stats: TextStats,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub operations: &'static [TransformOp],
    pub presets: &'static [Preset],
}

#[derive(Debug, Serialize)]
pub struct FeaturedToolResponse {
    pub tool: &'static str,
}

fn unreadable(rejection: JsonRejection) -> AppError {
    AppError::invalid_input(rejection.body_text())
}

fn respond(result: String) -> Json<TransformResponse> {
    let stats = compute_stats(&result);
    Json(TransformResponse { result, stats })
}

/// POST /api/transform
///
/// Applies `operations` to `text` in order.
pub async fn handle_transform(
    body: Result<Json<TransformRequest>, JsonRejection>,
) -> Result<Json<TransformResponse>, AppError> {
    let Json(request) = body.map_err(unreadable)?;
    Ok(respond(apply_all(&request.text, &request.operations)))
}

/// POST /api/transform/preset
pub async fn handle_preset(
    body: Result<Json<PresetRequest>, JsonRejection>,
) -> Result<Json<TransformResponse>, AppError> {
    let Json(request) = body.map_err(unreadable)?;
    Ok(respond(request.preset.apply(&request.text)))
}

/// GET /api/transform/operations
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        operations: &TransformOp::ALL,
        presets: &Preset::ALL,
    })
}

/// GET /api/tool-of-the-day
pub async fn handle_tool_of_the_day() -> Json<FeaturedToolResponse> {
    Json(FeaturedToolResponse {
        tool: tool_of_the_day(),
    })
}

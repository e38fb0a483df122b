use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, StatsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use snip_core::ShortCode;

/// Malformed codes can never have been issued, so they are reported as unknown.
fn parse_code(raw: &str) -> Result<ShortCode> {
    ShortCode::new(raw).map_err(|_| AppError::NotFound(format!("short code not found: {raw}")))
}

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("missing required field: url".to_string()))?;

    let record = state.shortener().shorten(&url).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: state.short_url(&record.code),
            short_code: record.code.to_string(),
            original_url: record.original_url,
            created_at: record.created_at,
        }),
    ))
}

pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let code = parse_code(&code)?;
    let url = state.shortener().redirect(&code).await?;
    Ok(Redirect::permanent(&url))
}

pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let code = parse_code(&code)?;
    let record = state.shortener().stats(&code).await?;
    Ok(Json(record.into()))
}

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::dashboard::model::DashboardReport;
use crate::dashboard::DashboardQuery;
use crate::error::AppError;
use crate::http::handlers::validate_coords;
use crate::http::responses::{DashboardParams, ReadingsParams};
use crate::http::state::AppState;
use crate::storage::entity::sensor_reading;
use crate::storage::repository::ReadingRepository;

const DEFAULT_READINGS: u64 = 20;
const MAX_READINGS: u64 = 100;

fn bad_query(e: QueryRejection) -> AppError {
    AppError::BadRequest(e.body_text())
}

/// `GET /api/dashboard`, refreshes and persists a new snapshot.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> Result<Json<DashboardReport>, AppError> {
    let Query(params) = params.map_err(bad_query)?;
    if params.lat.is_some() != params.lon.is_some() {
        return Err(AppError::BadRequest(
            "lat and lon must be given together".into(),
        ));
    }
    validate_coords(params.lat, params.lon)?;

    let report = state
        .dashboard
        .refresh(DashboardQuery {
            field_id: params.field_id,
            lat: params.lat,
            lon: params.lon,
        })
        .await?;
    Ok(Json(report))
}

/// `GET /api/readings`, most recent first.
pub async fn list_readings(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ReadingsParams>, QueryRejection>,
) -> Result<Json<Vec<sensor_reading::Model>>, AppError> {
    let Query(params) = params.map_err(bad_query)?;
    let limit = params.limit.unwrap_or(DEFAULT_READINGS).clamp(1, MAX_READINGS);
    let rows = ReadingRepository::recent_readings(state.db.as_ref(), params.field_id, limit).await?;
    Ok(Json(rows))
}

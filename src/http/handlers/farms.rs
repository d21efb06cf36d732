//! Farm and field CRUD.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;
use crate::http::handlers::validate_coords;
use crate::http::state::AppState;
use crate::storage::entity::{farm, field};
use crate::storage::repository::{FarmRepository, NewFarm, NewField};

pub async fn list_farms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<farm::Model>>, AppError> {
    Ok(Json(FarmRepository::list_farms(state.db.as_ref()).await?))
}

pub async fn create_farm(
    State(state): State<Arc<AppState>>,
    Json(mut new): Json<NewFarm>,
) -> Result<(StatusCode, Json<farm::Model>), AppError> {
    new.name = new.name.trim().to_string();
    if new.name.is_empty() {
        return Err(AppError::BadRequest("Farm name is required".into()));
    }
    validate_coords(new.latitude, new.longitude)?;

    let farm = FarmRepository::create_farm(state.db.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(farm)))
}

pub async fn get_farm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<farm::Model>, AppError> {
    FarmRepository::get_farm(state.db.as_ref(), id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("farm {id} not found")))
}

pub async fn list_fields(
    State(state): State<Arc<AppState>>,
    Path(farm_id): Path<i32>,
) -> Result<Json<Vec<field::Model>>, AppError> {
    if FarmRepository::get_farm(state.db.as_ref(), farm_id).await?.is_none() {
        return Err(AppError::NotFound(format!("farm {farm_id} not found")));
    }
    Ok(Json(FarmRepository::list_fields(state.db.as_ref(), farm_id).await?))
}

pub async fn create_field(
    State(state): State<Arc<AppState>>,
    Path(farm_id): Path<i32>,
    Json(mut new): Json<NewField>,
) -> Result<(StatusCode, Json<field::Model>), AppError> {
    new.name = new.name.trim().to_string();
    if new.name.is_empty() {
        return Err(AppError::BadRequest("Field name is required".into()));
    }
    if matches!(new.area_hectares, Some(a) if a <= 0.0) {
        return Err(AppError::BadRequest("areaHectares must be positive".into()));
    }
    if FarmRepository::get_farm(state.db.as_ref(), farm_id).await?.is_none() {
        return Err(AppError::NotFound(format!("farm {farm_id} not found")));
    }

    let field = FarmRepository::create_field(state.db.as_ref(), farm_id, new).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

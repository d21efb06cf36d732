use crate::dashboard::DashboardError;
use crate::http::responses::{ErrorResponse, InternalErrorResponse};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{context}: {detail}")]
    Internal { context: String, detail: String },
}

impl AppError {
    pub fn internal(context: impl Into<String>, detail: impl ToString) -> Self {
        AppError::Internal {
            context: context.into(),
            detail: detail.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::internal("Database error", e)
    }
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::FieldNotFound(_) => AppError::NotFound(e.to_string()),
            DashboardError::Db(db) => AppError::internal("Failed to refresh dashboard", db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
            }
            AppError::NotFound(error) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error })).into_response()
            }
            AppError::Internal { context, detail } => {
                error!("{}: {}", context, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalErrorResponse {
                        error: context,
                        message: detail,
                    }),
                )
                    .into_response()
            }
        }
    }
}

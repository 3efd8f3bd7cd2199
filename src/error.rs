use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::upload::validator::UploadError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid upload")]
    Upload(#[from] UploadError),

    #[error("products already exist with names: {}", .0.join(","))]
    ProductAlreadyExists(Vec<String>),

    #[error("articles do not exist with ids: {}", join_ids(.0))]
    ArticleDoesNotExist(Vec<i64>),

    #[error("products must contain at least one article: {}", .0.join(","))]
    ProductsWithoutRequirements(Vec<String>),

    #[error("product {0} does not exist")]
    ProductDoesNotExist(i64),

    #[error("product {0} is not available")]
    ProductNotAvailable(i64),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Error body shared by format and business failures: every message the
/// caller needs to act on, in one response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            AppError::Upload(e) => (StatusCode::BAD_REQUEST, e.errors.clone()),
            AppError::ProductAlreadyExists(_)
            | AppError::ArticleDoesNotExist(_)
            | AppError::ProductsWithoutRequirements(_)
            | AppError::ProductNotAvailable(_) => {
                (StatusCode::BAD_REQUEST, vec![self.to_string()])
            }
            AppError::ProductDoesNotExist(_) => (StatusCode::NOT_FOUND, vec![self.to_string()]),
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, vec![self.to_string()])
            }
        };

        (status, axum::Json(ErrorBody { errors })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    error::AppResult,
    models::Article,
    response::ApiResponse,
    services::article_service,
    state::AppState,
    upload,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles))
        .route("/upload", post(upload_articles))
}

#[utoipa::path(
    post,
    path = "/api/articles/upload",
    responses(
        (status = 201, description = "Inventory upload applied"),
        (status = 400, description = "Upload document rejected, every field error listed", body = crate::error::ErrorBody),
    ),
    tag = "Articles"
)]
pub async fn upload_articles(
    State(state): State<AppState>,
    Json(document): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let uploads = upload::articles::parse(&document)?;
    let response = article_service::save_articles(&state, uploads).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/articles",
    responses(
        (status = 200, description = "Current article stocks", body = ApiResponse<Vec<Article>>),
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Article>>>> {
    let response = article_service::list_articles(&state).await?;
    Ok(Json(response))
}

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    error::AppResult,
    models::ProductAvailability,
    response::ApiResponse,
    services::product_service,
    state::AppState,
    upload,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_products))
        .route("/availability", get(products_availability))
        .route("/{id}/sell", post(sell_product))
}

#[utoipa::path(
    post,
    path = "/api/products/upload",
    responses(
        (status = 201, description = "Products created"),
        (status = 400, description = "Upload rejected; format or business errors listed", body = crate::error::ErrorBody),
    ),
    tag = "Products"
)]
pub async fn upload_products(
    State(state): State<AppState>,
    Json(document): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let uploads = upload::products::parse(&document)?;
    let response = product_service::save_products(&state, uploads).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/availability",
    responses(
        (status = 200, description = "Sellable units per product", body = ApiResponse<Vec<ProductAvailability>>),
    ),
    tag = "Products"
)]
pub async fn products_availability(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProductAvailability>>>> {
    let response = product_service::get_products_availability(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/sell",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "One unit sold, article stocks decremented"),
        (status = 400, description = "Product not available", body = crate::error::ErrorBody),
        (status = 404, description = "Product not found", body = crate::error::ErrorBody),
    ),
    tag = "Products"
)]
pub async fn sell_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = product_service::sell_product(&state, id).await?;
    Ok(Json(response))
}

use axum::Router;

use crate::state::AppState;

pub mod articles;
pub mod doc;
pub mod health;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::router())
        .nest("/products", products::router())
}

use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    error::ErrorBody,
    models::{Article, ProductAvailability},
    response::Meta,
    routes::{articles, health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        articles::list_articles,
        articles::upload_articles,
        products::upload_products,
        products::products_availability,
        products::sell_product,
    ),
    components(schemas(Meta, ErrorBody, Article, ProductAvailability)),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Articles", description = "Inventory upload and article stock"),
        (name = "Products", description = "Product upload, availability and sale"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

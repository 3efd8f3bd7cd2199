use std::collections::{BTreeMap, BTreeSet};

use sea_orm::TransactionTrait;

use crate::{
    audit::log_audit,
    dto::products::CreateProductUpload,
    error::{AppError, AppResult},
    models::{ProductAvailability, RequirementDetail},
    response::{ApiResponse, Meta},
    state::AppState,
    store,
};

/// Create a product batch. Validation reports every offender of each kind
/// at once: products without requirements, then names already taken, then
/// referenced articles that do not exist. Creation is all-or-nothing.
pub async fn save_products(
    state: &AppState,
    uploads: Vec<CreateProductUpload>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let without_requirements: Vec<String> = uploads
        .iter()
        .filter(|product| product.requirements.is_empty())
        .map(|product| product.name.clone())
        .collect();
    if !without_requirements.is_empty() {
        return Err(AppError::ProductsWithoutRequirements(without_requirements));
    }

    let names: Vec<String> = uploads.iter().map(|product| product.name.clone()).collect();
    let (existing_names, _) =
        store::products::partition_names_by_existence(&state.orm, &names).await?;
    if !existing_names.is_empty() {
        return Err(AppError::ProductAlreadyExists(existing_names));
    }

    let article_ids: Vec<i64> = uploads
        .iter()
        .flat_map(|product| &product.requirements)
        .map(|requirement| requirement.article_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let (_, missing_ids) =
        store::articles::partition_ids_by_existence(&state.orm, &article_ids).await?;
    if !missing_ids.is_empty() {
        return Err(AppError::ArticleDoesNotExist(missing_ids));
    }

    let txn = state.orm.begin().await?;
    let created_ids = store::products::create_products_with_requirements(&txn, &uploads).await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "products_upload",
        Some("products"),
        Some(serde_json::json!({ "product_ids": created_ids })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Products created",
        serde_json::json!({ "created": created_ids.len() }),
        Some(Meta::empty()),
    ))
}

/// Sellable units given current stocks: the minimum over requirements of
/// floor(article stock / required quantity). None for an empty requirement
/// set, which has no defined availability.
pub fn compute_availability(requirements: &[RequirementDetail]) -> Option<i64> {
    requirements
        .iter()
        .map(|requirement| requirement.article.stock / requirement.quantity)
        .min()
}

pub async fn get_products_availability(
    state: &AppState,
) -> AppResult<ApiResponse<Vec<ProductAvailability>>> {
    let products = store::products::get_products_with_requirement_detail(&state.orm).await?;

    let mut items = Vec::with_capacity(products.len());
    for product in products {
        let availability = compute_availability(&product.requirements).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "product {} has no requirements",
                product.id
            ))
        })?;
        items.push(ProductAvailability {
            id: product.id,
            name: product.name,
            availability,
        });
    }

    let meta = Meta::new(items.len() as i64);
    Ok(ApiResponse::success("Products availability", items, Some(meta)))
}

/// Sell one unit of a product: lock the requirement/stock rows, check
/// availability, then decrement every required article in the same
/// transaction. No stock changes unless the whole set commits.
pub async fn sell_product(
    state: &AppState,
    product_id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if store::products::find_by_id(&txn, product_id).await?.is_none() {
        return Err(AppError::ProductDoesNotExist(product_id));
    }

    let rows = store::products::get_requirement_stocks_for_update(&txn, product_id).await?;
    let availability = rows
        .iter()
        .map(|row| row.stock / row.quantity)
        .min()
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("product {product_id} has no requirements"))
        })?;
    if availability == 0 {
        return Err(AppError::ProductNotAvailable(product_id));
    }

    // merge duplicate article references so each row is decremented once
    let mut deltas: BTreeMap<i64, i64> = BTreeMap::new();
    for row in &rows {
        *deltas.entry(row.article_id).or_insert(0) += row.quantity;
    }
    let deltas: Vec<(i64, i64)> = deltas.into_iter().collect();

    if !store::articles::decrement_stocks(&txn, &deltas).await? {
        return Err(AppError::ProductNotAvailable(product_id));
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_sold",
        Some("products"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product sold",
        serde_json::json!({ "product_id": product_id }),
        Some(Meta::empty()),
    ))
}

use chrono::Utc;
use sea_orm::TransactionTrait;

use crate::{
    audit::log_audit,
    dto::articles::ArticleUpload,
    error::AppResult,
    models::Article,
    response::{ApiResponse, Meta},
    state::AppState,
    store,
};

/// Apply an article upload batch: existing ids are updated, new ids created,
/// all inside one transaction. Re-applying the same batch is a no-op.
pub async fn save_articles(
    state: &AppState,
    uploads: Vec<ArticleUpload>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;
    store::articles::bulk_upsert(&txn, &uploads).await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "articles_upload",
        Some("articles"),
        Some(serde_json::json!({ "count": uploads.len() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Articles saved",
        serde_json::json!({ "count": uploads.len() }),
        Some(Meta::empty()),
    ))
}

pub async fn list_articles(state: &AppState) -> AppResult<ApiResponse<Vec<Article>>> {
    let articles: Vec<Article> = store::articles::list_all(&state.orm)
        .await?
        .into_iter()
        .map(|model| Article {
            id: model.id,
            name: model.name,
            stock: model.stock,
            created_at: model.created_at.with_timezone(&Utc),
        })
        .collect();

    let meta = Meta::new(articles.len() as i64);
    Ok(ApiResponse::success("Articles", articles, Some(meta)))
}

use std::collections::HashSet;

use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::dto::articles::ArticleUpload;
use crate::entity::articles::{ActiveModel, Column, Model};
use crate::entity::Articles;
use crate::store::partition_by_existence;

pub async fn partition_ids_by_existence<C: ConnectionTrait>(
    conn: &C,
    ids: &[i64],
) -> Result<(Vec<i64>, Vec<i64>), DbErr> {
    let existing: HashSet<i64> = Articles::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<i64>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    Ok(partition_by_existence(ids.iter().copied(), &existing))
}

/// Upsert an upload batch: existing ids get their name and stock updated,
/// the rest are created. Idempotent for a repeated batch.
pub async fn bulk_upsert<C: ConnectionTrait>(
    conn: &C,
    uploads: &[ArticleUpload],
) -> Result<(), DbErr> {
    let ids: Vec<i64> = uploads.iter().map(|a| a.id).collect();
    let (existing, _missing) = partition_ids_by_existence(conn, &ids).await?;
    let existing: HashSet<i64> = existing.into_iter().collect();

    let mut to_create = Vec::new();
    for upload in uploads {
        if existing.contains(&upload.id) {
            ActiveModel {
                id: Unchanged(upload.id),
                name: Set(upload.name.clone()),
                stock: Set(upload.stock),
                created_at: NotSet,
            }
            .update(conn)
            .await?;
        } else {
            to_create.push(ActiveModel {
                id: Set(upload.id),
                name: Set(upload.name.clone()),
                stock: Set(upload.stock),
                created_at: NotSet,
            });
        }
    }

    Articles::insert_many(to_create)
        .on_empty_do_nothing()
        .exec(conn)
        .await?;

    Ok(())
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Articles::find().order_by_asc(Column::Id).all(conn).await
}

/// Decrement each article's stock, refusing any row whose stock would go
/// negative. Returns false (caller rolls back) as soon as one row cannot
/// satisfy the `stock >= delta` condition.
pub async fn decrement_stocks<C: ConnectionTrait>(
    conn: &C,
    deltas: &[(i64, i64)],
) -> Result<bool, DbErr> {
    for (article_id, delta) in deltas {
        let result = Articles::update_many()
            .col_expr(Column::Stock, Expr::col(Column::Stock).sub(*delta))
            .filter(Column::Id.eq(*article_id))
            .filter(Column::Stock.gte(*delta))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(false);
        }
    }

    Ok(true)
}

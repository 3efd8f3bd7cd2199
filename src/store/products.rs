use std::collections::{HashMap, HashSet};

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::dto::products::CreateProductUpload;
use crate::entity::{Articles, ProductRequirements, Products, product_requirements, products};
use crate::models::{ArticleStock, ProductDetail, RequirementDetail};
use crate::store::partition_by_existence;

pub async fn partition_names_by_existence<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<(Vec<String>, Vec<String>), DbErr> {
    let existing: HashSet<String> = Products::find()
        .select_only()
        .column(products::Column::Name)
        .filter(products::Column::Name.is_in(names.iter().cloned()))
        .into_tuple::<String>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    Ok(partition_by_existence(names.iter().cloned(), &existing))
}

/// Create every product and its requirement rows. The caller supplies the
/// transaction; nothing here commits.
pub async fn create_products_with_requirements<C: ConnectionTrait>(
    conn: &C,
    uploads: &[CreateProductUpload],
) -> Result<Vec<i64>, DbErr> {
    let mut created_ids = Vec::with_capacity(uploads.len());
    let mut requirement_rows = Vec::new();

    for upload in uploads {
        let created = products::ActiveModel {
            id: NotSet,
            name: Set(upload.name.clone()),
            created_at: NotSet,
        }
        .insert(conn)
        .await?;

        for requirement in &upload.requirements {
            requirement_rows.push(product_requirements::ActiveModel {
                id: NotSet,
                product_id: Set(created.id),
                article_id: Set(requirement.article_id),
                quantity: Set(requirement.quantity),
            });
        }

        created_ids.push(created.id);
    }

    ProductRequirements::insert_many(requirement_rows)
        .on_empty_do_nothing()
        .exec(conn)
        .await?;

    Ok(created_ids)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<products::Model>, DbErr> {
    Products::find_by_id(id).one(conn).await
}

/// Every product with its requirements and the referenced articles' current
/// stock, ordered by product id.
pub async fn get_products_with_requirement_detail<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<ProductDetail>, DbErr> {
    let product_models = Products::find()
        .order_by_asc(products::Column::Id)
        .all(conn)
        .await?;

    let rows = ProductRequirements::find()
        .find_also_related(Articles)
        .order_by_asc(product_requirements::Column::Id)
        .all(conn)
        .await?;

    let mut by_product: HashMap<i64, Vec<RequirementDetail>> = HashMap::new();
    for (requirement, article) in rows {
        let article = article.ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "article {} referenced by requirement {}",
                requirement.article_id, requirement.id
            ))
        })?;
        by_product
            .entry(requirement.product_id)
            .or_default()
            .push(RequirementDetail {
                quantity: requirement.quantity,
                article: ArticleStock {
                    id: article.id,
                    name: article.name,
                    stock: article.stock,
                },
            });
    }

    Ok(product_models
        .into_iter()
        .map(|product| ProductDetail {
            requirements: by_product.remove(&product.id).unwrap_or_default(),
            id: product.id,
            name: product.name,
        })
        .collect())
}

#[derive(Debug, FromQueryResult)]
pub struct RequirementStockRow {
    pub article_id: i64,
    pub quantity: i64,
    pub stock: i64,
}

/// A product's requirement rows joined with article stock, locked
/// `FOR UPDATE` so a concurrent sale of a shared article serializes behind
/// this transaction.
pub async fn get_requirement_stocks_for_update<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
) -> Result<Vec<RequirementStockRow>, DbErr> {
    ProductRequirements::find()
        .select_only()
        .column(product_requirements::Column::ArticleId)
        .column(product_requirements::Column::Quantity)
        .column_as(crate::entity::articles::Column::Stock, "stock")
        .join(
            JoinType::InnerJoin,
            product_requirements::Relation::Articles.def(),
        )
        .filter(product_requirements::Column::ProductId.eq(product_id))
        // ascending article id keeps concurrent sales locking rows in the same order
        .order_by_asc(product_requirements::Column::ArticleId)
        .lock(LockType::Update)
        .into_model::<RequirementStockRow>()
        .all(conn)
        .await
}

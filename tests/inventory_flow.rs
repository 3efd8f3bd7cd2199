use axum_warehouse_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{Articles, Products},
    error::AppError,
    services::{article_service, product_service},
    state::AppState,
    upload,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Statement};
use serde_json::json;

// Integration flow: upload inventory -> create products -> availability ->
// sell -> invalid batches leave the store unchanged -> concurrent sales of
// a shared article never overdraw it.
#[tokio::test]
async fn upload_sell_and_race_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    // Upload articles.
    let inventory = json!({
        "inventory": [
            { "art_id": 1, "name": "bolt", "stock": 10 },
            { "art_id": 2, "name": "plank", "stock": 9 },
        ]
    });
    let uploads = upload::articles::parse(&inventory)?;
    article_service::save_articles(&state, uploads).await?;
    assert_eq!(article_stock(&state, 1).await?, 10);

    // Re-applying the same batch is idempotent.
    let uploads = upload::articles::parse(&inventory)?;
    article_service::save_articles(&state, uploads).await?;
    assert_eq!(article_stock(&state, 1).await?, 10);
    assert_eq!(article_stock(&state, 2).await?, 9);

    // A later upload updates name and stock of an existing id.
    let revised = json!({ "inventory": [ { "art_id": 2, "name": "oak plank", "stock": 9 } ] });
    article_service::save_articles(&state, upload::articles::parse(&revised)?).await?;
    let plank = Articles::find_by_id(2).one(&state.orm).await?.expect("article 2");
    assert_eq!(plank.name, "oak plank");

    // Create a product requiring 2 bolts and 3 planks per unit.
    let products = json!({
        "products": [
            {
                "name": "kit",
                "contain_articles": [
                    { "art_id": 1, "amount_of": 2 },
                    { "art_id": 2, "amount_of": 3 },
                ]
            }
        ]
    });
    product_service::save_products(&state, upload::products::parse(&products)?).await?;

    // availability = min(10/2, 9/3) = 3
    let availability = product_service::get_products_availability(&state).await?;
    let items = availability.data.expect("availability data");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "kit");
    assert_eq!(items[0].availability, 3);
    let kit_id = items[0].id;

    // Duplicate name is rejected naming the product, and nothing is created.
    let before = Products::find().count(&state.orm).await?;
    let duplicate = upload::products::parse(&json!({
        "products": [ { "name": "kit", "contain_articles": [ { "art_id": 1, "amount_of": 1 } ] } ]
    }))?;
    let err = product_service::save_products(&state, duplicate).await.unwrap_err();
    match err {
        AppError::ProductAlreadyExists(names) => assert_eq!(names, vec!["kit".to_string()]),
        other => panic!("expected ProductAlreadyExists, got {other:?}"),
    }
    assert_eq!(Products::find().count(&state.orm).await?, before);

    // Missing article ids are all reported, and nothing is created.
    let missing = upload::products::parse(&json!({
        "products": [ { "name": "gadget", "contain_articles": [
            { "art_id": 98, "amount_of": 1 },
            { "art_id": 99, "amount_of": 1 },
        ] } ]
    }))?;
    let err = product_service::save_products(&state, missing).await.unwrap_err();
    match err {
        AppError::ArticleDoesNotExist(ids) => assert_eq!(ids, vec![98, 99]),
        other => panic!("expected ArticleDoesNotExist, got {other:?}"),
    }
    assert_eq!(Products::find().count(&state.orm).await?, before);

    // Zero-requirement products are rejected by the service.
    let empty = upload::products::parse(&json!({
        "products": [ { "name": "shelf", "contain_articles": [] } ]
    }))?;
    let err = product_service::save_products(&state, empty).await.unwrap_err();
    assert!(matches!(err, AppError::ProductsWithoutRequirements(_)));

    // Selling one kit consumes 2 bolts and 3 planks.
    product_service::sell_product(&state, kit_id).await?;
    assert_eq!(article_stock(&state, 1).await?, 8);
    assert_eq!(article_stock(&state, 2).await?, 6);

    // Selling an unknown product id is a not-found rejection.
    let err = product_service::sell_product(&state, kit_id + 1000).await.unwrap_err();
    assert!(matches!(err, AppError::ProductDoesNotExist(_)));

    // Sell the remaining two kits, then the next attempt is rejected with
    // no stock mutation.
    product_service::sell_product(&state, kit_id).await?;
    product_service::sell_product(&state, kit_id).await?;
    assert_eq!(article_stock(&state, 2).await?, 0);
    let stock_before = article_stock(&state, 1).await?;
    let err = product_service::sell_product(&state, kit_id).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotAvailable(_)));
    assert_eq!(article_stock(&state, 1).await?, stock_before);

    // Two products sharing one article with stock for only one sale: at
    // most one concurrent sale succeeds and stock never goes negative.
    article_service::save_articles(
        &state,
        upload::articles::parse(&json!({
            "inventory": [ { "art_id": 3, "name": "hinge", "stock": 4 } ]
        }))?,
    )
    .await?;
    product_service::save_products(
        &state,
        upload::products::parse(&json!({
            "products": [
                { "name": "door", "contain_articles": [ { "art_id": 3, "amount_of": 3 } ] },
                { "name": "gate", "contain_articles": [ { "art_id": 3, "amount_of": 3 } ] },
            ]
        }))?,
    )
    .await?;
    let door_id = product_id_by_name(&state, "door").await?;
    let gate_id = product_id_by_name(&state, "gate").await?;

    let (first, second) = tokio::join!(
        product_service::sell_product(&state, door_id),
        product_service::sell_product(&state, gate_id),
    );
    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of two contending sales may commit");
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(err, AppError::ProductNotAvailable(_)));
        }
    }
    let hinge = article_stock(&state, 3).await?;
    assert_eq!(hinge, 1);
    assert!(hinge >= 0);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE product_requirements, products, articles, audit_logs RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn article_stock(state: &AppState, id: i64) -> anyhow::Result<i64> {
    let article = Articles::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("article {id} not found"))?;
    Ok(article.stock)
}

async fn product_id_by_name(state: &AppState, name: &str) -> anyhow::Result<i64> {
    use axum_warehouse_api::entity::products::Column;
    let product = Products::find()
        .filter(Column::Name.eq(name))
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("product {name} not found"))?;
    Ok(product.id)
}

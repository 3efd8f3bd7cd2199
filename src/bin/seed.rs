use axum_warehouse_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    services::{article_service, product_service},
    state::AppState,
    upload,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let state = AppState { pool, orm };

    // Sample warehouse content, loaded through the real parsers so the seed
    // exercises the same path as an upload.
    let inventory = json!({
        "inventory": [
            { "art_id": 1, "name": "leg", "stock": 12 },
            { "art_id": 2, "name": "screw", "stock": 17 },
            { "art_id": 3, "name": "seat", "stock": 2 },
            { "art_id": 4, "name": "table top", "stock": 1 },
        ]
    });
    let articles = upload::articles::parse(&inventory)?;
    article_service::save_articles(&state, articles).await?;

    let products = json!({
        "products": [
            {
                "name": "Dining Chair",
                "contain_articles": [
                    { "art_id": 1, "amount_of": 4 },
                    { "art_id": 2, "amount_of": 8 },
                    { "art_id": 3, "amount_of": 1 },
                ]
            },
            {
                "name": "Dining Table",
                "contain_articles": [
                    { "art_id": 1, "amount_of": 4 },
                    { "art_id": 2, "amount_of": 8 },
                    { "art_id": 4, "amount_of": 1 },
                ]
            }
        ]
    });
    let uploads = upload::products::parse(&products)?;
    match product_service::save_products(&state, uploads).await {
        Ok(_) => println!("Seed completed"),
        Err(err) => println!("Seed skipped product creation: {err}"),
    }

    Ok(())
}

pub mod article_service;
pub mod product_service;

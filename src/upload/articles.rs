use serde_json::Value;

use crate::dto::articles::ArticleUpload;
use crate::upload::validator::{self, UploadError, accumulate, attribute_message};

/// Parse an article upload document: `{ "inventory": [ { "art_id", "name", "stock" }, ... ] }`.
pub fn parse(document: &Value) -> Result<Vec<ArticleUpload>, UploadError> {
    let articles = validator::list_field(document, "inventory", "root")?;
    validator::map_items(articles, "inventory", parse_article)
}

fn parse_article(item: &Value, context: &str) -> Result<ArticleUpload, UploadError> {
    let mut errors = Vec::new();
    let id = accumulate(validator::numeric_field(item, "art_id", context), &mut errors);
    let name = accumulate(validator::string_field(item, "name", context), &mut errors);
    let stock = accumulate(validator::numeric_field(item, "stock", context), &mut errors);

    if let Some(stock) = stock {
        if stock < 0 {
            errors.push(attribute_message(
                context,
                "stock",
                "expected value greater than or equal to 0",
            ));
        }
    }

    match (id, name, stock) {
        (Some(id), Some(name), Some(stock)) if errors.is_empty() => {
            Ok(ArticleUpload { id, name, stock })
        }
        _ => Err(UploadError { errors }),
    }
}

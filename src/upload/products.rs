use serde_json::Value;

use crate::dto::products::{CreateProductRequirement, CreateProductUpload};
use crate::upload::validator::{self, UploadError, accumulate, attribute_message};

/// Parse a product upload document:
/// `{ "products": [ { "name", "contain_articles": [ { "art_id", "amount_of" }, ... ] }, ... ] }`.
///
/// A product with an empty `contain_articles` list is structurally valid
/// here; the service layer rejects it.
pub fn parse(document: &Value) -> Result<Vec<CreateProductUpload>, UploadError> {
    let products = validator::list_field(document, "products", "root")?;
    validator::map_items(products, "products", parse_product)
}

fn parse_product(item: &Value, context: &str) -> Result<CreateProductUpload, UploadError> {
    let mut errors = Vec::new();
    let name = accumulate(validator::string_field(item, "name", context), &mut errors);
    let requirements = match validator::list_field(item, "contain_articles", context) {
        Ok(items) => accumulate(
            validator::map_items(
                items,
                &format!("{context}.contain_articles"),
                parse_requirement,
            ),
            &mut errors,
        ),
        Err(failure) => {
            errors.extend(failure.errors);
            None
        }
    };

    match (name, requirements) {
        (Some(name), Some(requirements)) if errors.is_empty() => {
            Ok(CreateProductUpload { name, requirements })
        }
        _ => Err(UploadError { errors }),
    }
}

fn parse_requirement(item: &Value, context: &str) -> Result<CreateProductRequirement, UploadError> {
    let mut errors = Vec::new();
    let article_id = accumulate(validator::numeric_field(item, "art_id", context), &mut errors);
    let quantity = accumulate(
        validator::numeric_field(item, "amount_of", context),
        &mut errors,
    );

    if let Some(quantity) = quantity {
        if quantity <= 0 {
            errors.push(attribute_message(
                context,
                "quantity",
                "expected value greater than 0",
            ));
        }
    }

    match (article_id, quantity) {
        (Some(article_id), Some(quantity)) if errors.is_empty() => Ok(CreateProductRequirement {
            article_id,
            quantity,
        }),
        _ => Err(UploadError { errors }),
    }
}

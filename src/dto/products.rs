#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProductRequirement {
    pub article_id: i64,
    pub quantity: i64,
}

/// One product definition from a product upload, pre-persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProductUpload {
    pub name: String,
    pub requirements: Vec<CreateProductRequirement>,
}

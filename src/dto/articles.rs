/// One article row from an inventory upload, pre-persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUpload {
    pub id: i64,
    pub name: String,
    pub stock: i64,
}

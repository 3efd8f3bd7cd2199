pub mod articles;
pub mod product_requirements;
pub mod products;

pub use articles::Entity as Articles;
pub use product_requirements::Entity as ProductRequirements;
pub use products::Entity as Products;

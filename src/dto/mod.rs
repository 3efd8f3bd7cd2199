pub mod articles;
pub mod products;

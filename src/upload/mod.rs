pub mod articles;
pub mod products;
pub mod validator;

pub mod product;

pub use product::{CreateProductProps, Product, ProductId};

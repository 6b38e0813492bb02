pub mod category;
pub mod color;
pub mod product;
pub mod product_type;
pub mod shape;

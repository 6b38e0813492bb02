use crate::db::{DbConnection, DbPool};
use crate::domain::ReferenceListQuery;
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::color::{Color, NewColor, UpdateColor};
use crate::domain::product::{
    NewProduct, Product, ProductDetails, ProductListQuery, ProductRelation, UpdateProduct,
};
use crate::domain::product_type::{NewProductType, ProductType, UpdateProductType};
use crate::domain::shape::{NewShape, Shape, UpdateShape};

pub mod category;
pub mod color;
pub mod errors;
pub mod product;
pub mod product_type;
pub mod shape;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product types.
pub trait ProductTypeReader {
    fn list_product_types(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<ProductType>>;
    fn get_product_type_by_id(&self, id: i32) -> RepositoryResult<Option<ProductType>>;
    fn get_product_type_by_name(&self, name: &str) -> RepositoryResult<Option<ProductType>>;
}

/// Write operations over product types.
pub trait ProductTypeWriter {
    fn create_product_type(&self, new_type: &NewProductType) -> RepositoryResult<ProductType>;
    fn update_product_type(
        &self,
        id: i32,
        updates: &UpdateProductType,
    ) -> RepositoryResult<ProductType>;
    /// Delete the product type and, through the cascade, its products.
    /// Returns the image paths the cascaded products were holding.
    fn delete_product_type(&self, id: i32) -> RepositoryResult<Vec<String>>;
}

/// Read-only operations over categories.
pub trait CategoryReader {
    fn list_categories(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations over categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(&self, id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
    /// Delete the category and its products; returns the orphaned image paths.
    fn delete_category(&self, id: i32) -> RepositoryResult<Vec<String>>;
}

/// Read-only operations over colors.
pub trait ColorReader {
    fn list_colors(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Color>>;
    fn get_color_by_id(&self, id: i32) -> RepositoryResult<Option<Color>>;
    fn get_color_by_name(&self, name: &str) -> RepositoryResult<Option<Color>>;
}

/// Write operations over colors.
pub trait ColorWriter {
    fn create_color(&self, new_color: &NewColor) -> RepositoryResult<Color>;
    fn update_color(&self, id: i32, updates: &UpdateColor) -> RepositoryResult<Color>;
    /// Delete the color; dependent products keep existing with `color_id` cleared.
    fn delete_color(&self, id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over shapes.
pub trait ShapeReader {
    fn list_shapes(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Shape>>;
    fn get_shape_by_id(&self, id: i32) -> RepositoryResult<Option<Shape>>;
    fn get_shape_by_name(&self, name: &str) -> RepositoryResult<Option<Shape>>;
}

/// Write operations over shapes.
pub trait ShapeWriter {
    fn create_shape(&self, new_shape: &NewShape) -> RepositoryResult<Shape>;
    fn update_shape(&self, id: i32, updates: &UpdateShape) -> RepositoryResult<Shape>;
    /// Delete the shape; dependent products keep existing with `shape_id` cleared.
    fn delete_shape(&self, id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over products. Soft-deleted rows are never returned
/// unless a method says otherwise.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductDetails>)>;
    fn list_products_by_relation(
        &self,
        relation: ProductRelation,
    ) -> RepositoryResult<Vec<Product>>;
    /// Lookup by SKU that also sees soft-deleted rows, matching the unique index.
    fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;
}

/// Write operations over products.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductDetails>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<ProductDetails>;
    fn soft_delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

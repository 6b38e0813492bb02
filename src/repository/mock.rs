use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ColorReader, ColorWriter, ProductReader, ProductTypeReader,
    ProductTypeWriter, ProductWriter, RepositoryResult, ShapeReader, ShapeWriter,
};
use crate::domain::{
    ReferenceListQuery,
    category::{Category, NewCategory, UpdateCategory},
    color::{Color, NewColor, UpdateColor},
    product::{
        NewProduct, Product, ProductDetails, ProductListQuery, ProductRelation, UpdateProduct,
    },
    product_type::{NewProductType, ProductType, UpdateProductType},
    shape::{NewShape, Shape, UpdateShape},
};

mock! {
    pub ProductTypeRepo {}

    impl ProductTypeReader for ProductTypeRepo {
        fn list_product_types(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<ProductType>>;
        fn get_product_type_by_id(&self, id: i32) -> RepositoryResult<Option<ProductType>>;
        fn get_product_type_by_name(&self, name: &str) -> RepositoryResult<Option<ProductType>>;
    }

    impl ProductTypeWriter for ProductTypeRepo {
        fn create_product_type(&self, new_type: &NewProductType) -> RepositoryResult<ProductType>;
        fn update_product_type(&self, id: i32, updates: &UpdateProductType) -> RepositoryResult<ProductType>;
        fn delete_product_type(&self, id: i32) -> RepositoryResult<Vec<String>>;
    }

    impl ProductReader for ProductTypeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<ProductDetails>)>;
        fn list_products_by_relation(&self, relation: ProductRelation) -> RepositoryResult<Vec<Product>>;
        fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub CategoryRepo {}

    impl CategoryReader for CategoryRepo {
        fn list_categories(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    }

    impl CategoryWriter for CategoryRepo {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, id: i32) -> RepositoryResult<Vec<String>>;
    }

    impl ProductReader for CategoryRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<ProductDetails>)>;
        fn list_products_by_relation(&self, relation: ProductRelation) -> RepositoryResult<Vec<Product>>;
        fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub ColorRepo {}

    impl ColorReader for ColorRepo {
        fn list_colors(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Color>>;
        fn get_color_by_id(&self, id: i32) -> RepositoryResult<Option<Color>>;
        fn get_color_by_name(&self, name: &str) -> RepositoryResult<Option<Color>>;
    }

    impl ColorWriter for ColorRepo {
        fn create_color(&self, new_color: &NewColor) -> RepositoryResult<Color>;
        fn update_color(&self, id: i32, updates: &UpdateColor) -> RepositoryResult<Color>;
        fn delete_color(&self, id: i32) -> RepositoryResult<()>;
    }

    impl ProductReader for ColorRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<ProductDetails>)>;
        fn list_products_by_relation(&self, relation: ProductRelation) -> RepositoryResult<Vec<Product>>;
        fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub ShapeRepo {}

    impl ShapeReader for ShapeRepo {
        fn list_shapes(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Shape>>;
        fn get_shape_by_id(&self, id: i32) -> RepositoryResult<Option<Shape>>;
        fn get_shape_by_name(&self, name: &str) -> RepositoryResult<Option<Shape>>;
    }

    impl ShapeWriter for ShapeRepo {
        fn create_shape(&self, new_shape: &NewShape) -> RepositoryResult<Shape>;
        fn update_shape(&self, id: i32, updates: &UpdateShape) -> RepositoryResult<Shape>;
        fn delete_shape(&self, id: i32) -> RepositoryResult<()>;
    }

    impl ProductReader for ShapeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<ProductDetails>)>;
        fn list_products_by_relation(&self, relation: ProductRelation) -> RepositoryResult<Vec<Product>>;
        fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub CatalogRepo {}

    impl ProductReader for CatalogRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<ProductDetails>)>;
        fn list_products_by_relation(&self, relation: ProductRelation) -> RepositoryResult<Vec<Product>>;
        fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;
    }

    impl ProductWriter for CatalogRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductDetails>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<ProductDetails>;
        fn soft_delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }

    impl ProductTypeReader for CatalogRepo {
        fn list_product_types(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<ProductType>>;
        fn get_product_type_by_id(&self, id: i32) -> RepositoryResult<Option<ProductType>>;
        fn get_product_type_by_name(&self, name: &str) -> RepositoryResult<Option<ProductType>>;
    }

    impl CategoryReader for CatalogRepo {
        fn list_categories(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    }

    impl ColorReader for CatalogRepo {
        fn list_colors(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Color>>;
        fn get_color_by_id(&self, id: i32) -> RepositoryResult<Option<Color>>;
        fn get_color_by_name(&self, name: &str) -> RepositoryResult<Option<Color>>;
    }

    impl ShapeReader for CatalogRepo {
        fn list_shapes(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<Shape>>;
        fn get_shape_by_id(&self, id: i32) -> RepositoryResult<Option<Shape>>;
        fn get_shape_by_name(&self, name: &str) -> RepositoryResult<Option<Shape>>;
    }
}

use std::collections::{HashMap, HashSet};

use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::fold_case;
use crate::domain::{
    category::Category as DomainCategory,
    color::Color as DomainColor,
    product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductDetails,
        ProductListQuery, ProductRelation, UpdateProduct as DomainUpdateProduct,
    },
    product_type::ProductType as DomainProductType,
    shape::Shape as DomainShape,
};
use crate::models::{
    category::Category as DbCategory,
    color::Color as DbColor,
    product::{NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct},
    product_type::ProductType as DbProductType,
    shape::Shape as DbShape,
};
use crate::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
};
use crate::schema::products;

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>> {
        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::deleted_at.is_null())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => Ok(attach_relations(&mut conn, vec![db_product])?.pop()),
            None => Ok(None),
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductDetails>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_products(&query).order(products::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        Ok((total, attach_relations(&mut conn, db_products)?))
    }

    fn list_products_by_relation(
        &self,
        relation: ProductRelation,
    ) -> RepositoryResult<Vec<DomainProduct>> {
        let mut conn = self.conn()?;

        let rows = products_for_relation(relation)
            .filter(products::deleted_at.is_null())
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProduct::from).collect())
    }

    fn get_product_by_sku(&self, sku: &str) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::sku.eq(sku))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<ProductDetails> {
        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        attach_relations(&mut conn, vec![created])?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<ProductDetails> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::deleted_at.is_null());

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        attach_relations(&mut conn, vec![updated])?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    fn soft_delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let now = Local::now().naive_utc();

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::deleted_at.is_null());

        let deleted = diesel::update(target)
            .set((
                products::deleted_at.eq(Some(now)),
                products::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Every image path held by products pointing at `relation`, soft-deleted rows included.
pub(crate) fn image_paths_for_relation(
    conn: &mut SqliteConnection,
    relation: ProductRelation,
) -> RepositoryResult<Vec<String>> {
    let rows = products_for_relation(relation)
        .select((products::image_1, products::image_2, products::image_3))
        .load::<(Option<String>, Option<String>, Option<String>)>(conn)?;

    Ok(rows
        .into_iter()
        .flat_map(|(first, second, third)| [first, second, third])
        .flatten()
        .collect())
}

fn products_for_relation(relation: ProductRelation) -> products::BoxedQuery<'static, Sqlite> {
    let query = products::table.into_boxed::<Sqlite>();
    match relation {
        ProductRelation::ProductType(id) => query.filter(products::product_type_id.eq(id)),
        ProductRelation::Category(id) => query.filter(products::category_id.eq(id)),
        ProductRelation::Color(id) => query.filter(products::color_id.eq(id)),
        ProductRelation::Shape(id) => query.filter(products::shape_id.eq(id)),
    }
}

/// Live products matching every filter in `query`, without ordering or paging.
fn filtered_products(query: &ProductListQuery) -> products::BoxedQuery<'static, Sqlite> {
    let mut items = products::table
        .filter(products::deleted_at.is_null())
        .into_boxed::<Sqlite>();

    if let Some(category_id) = query.category_id {
        items = items.filter(products::category_id.eq(category_id));
    }

    if let Some(product_type_id) = query.product_type_id {
        items = items.filter(products::product_type_id.eq(product_type_id));
    }

    if let Some(color_id) = query.color_id {
        items = items.filter(products::color_id.eq(color_id));
    }

    if let Some(shape_id) = query.shape_id {
        items = items.filter(products::shape_id.eq(shape_id));
    }

    if let Some(is_active) = query.is_active {
        items = items.filter(products::is_active.eq(is_active));
    }

    if let Some(is_featured) = query.is_featured {
        items = items.filter(products::is_featured.eq(is_featured));
    }

    if let Some(min) = query.min_price_cents {
        items = items.filter(products::price_cents.ge(min));
    }

    if let Some(max) = query.max_price_cents {
        items = items.filter(products::price_cents.le(max));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        items = items.filter(
            fold_case(products::name.nullable())
                .like(pattern.clone())
                .escape('\\')
                .or(fold_case(products::sku.nullable())
                    .like(pattern.clone())
                    .escape('\\'))
                .or(fold_case(products::description).like(pattern).escape('\\')),
        );
    }

    items
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Load the reference rows for `rows` in one query per table and attach them.
fn attach_relations(
    conn: &mut SqliteConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<ProductDetails>> {
    use crate::schema::{categories, colors, product_types, shapes};

    let type_ids = unique_ids(rows.iter().map(|row| Some(row.product_type_id)));
    let category_ids = unique_ids(rows.iter().map(|row| Some(row.category_id)));
    let color_ids = unique_ids(rows.iter().map(|row| row.color_id));
    let shape_ids = unique_ids(rows.iter().map(|row| row.shape_id));

    let mut types: HashMap<i32, DomainProductType> = HashMap::new();
    if !type_ids.is_empty() {
        for row in product_types::table
            .filter(product_types::id.eq_any(&type_ids))
            .load::<DbProductType>(conn)?
        {
            types.insert(row.id, row.into());
        }
    }

    let mut categories_by_id: HashMap<i32, DomainCategory> = HashMap::new();
    if !category_ids.is_empty() {
        for row in categories::table
            .filter(categories::id.eq_any(&category_ids))
            .load::<DbCategory>(conn)?
        {
            categories_by_id.insert(row.id, row.into());
        }
    }

    let mut colors_by_id: HashMap<i32, DomainColor> = HashMap::new();
    if !color_ids.is_empty() {
        for row in colors::table
            .filter(colors::id.eq_any(&color_ids))
            .load::<DbColor>(conn)?
        {
            colors_by_id.insert(row.id, row.into());
        }
    }

    let mut shapes_by_id: HashMap<i32, DomainShape> = HashMap::new();
    if !shape_ids.is_empty() {
        for row in shapes::table
            .filter(shapes::id.eq_any(&shape_ids))
            .load::<DbShape>(conn)?
        {
            shapes_by_id.insert(row.id, row.into());
        }
    }

    let details = rows
        .into_iter()
        .map(|row| {
            let product: DomainProduct = row.into();
            ProductDetails {
                product_type: types.get(&product.product_type_id).cloned(),
                category: categories_by_id.get(&product.category_id).cloned(),
                color: product
                    .color_id
                    .and_then(|id| colors_by_id.get(&id).cloned()),
                shape: product
                    .shape_id
                    .and_then(|id| shapes_by_id.get(&id).cloned()),
                product,
            }
        })
        .collect();

    Ok(details)
}

fn unique_ids(ids: impl Iterator<Item = Option<i32>>) -> Vec<i32> {
    let set: HashSet<i32> = ids.flatten().collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralises_wildcards() {
        assert_eq!(escape_like("gold"), "gold");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}

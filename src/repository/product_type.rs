use diesel::prelude::*;

use crate::domain::ReferenceListQuery;
use crate::domain::product::ProductRelation;
use crate::domain::product_type::{
    NewProductType as DomainNewProductType, ProductType as DomainProductType,
    UpdateProductType as DomainUpdateProductType,
};
use crate::models::product_type::{
    NewProductType as DbNewProductType, ProductType as DbProductType,
    UpdateProductType as DbUpdateProductType,
};
use crate::repository::product::image_paths_for_relation;
use crate::repository::{
    DieselRepository, ProductTypeReader, ProductTypeWriter, RepositoryError, RepositoryResult,
};

impl ProductTypeReader for DieselRepository {
    fn list_product_types(
        &self,
        query: ReferenceListQuery,
    ) -> RepositoryResult<Vec<DomainProductType>> {
        use crate::schema::product_types;

        let mut conn = self.conn()?;

        let mut items = product_types::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(is_active) = query.is_active {
            items = items.filter(product_types::is_active.eq(is_active));
        }

        let rows = items
            .order(product_types::id.asc())
            .load::<DbProductType>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProductType::from).collect())
    }

    fn get_product_type_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProductType>> {
        use crate::schema::product_types;

        let mut conn = self.conn()?;

        let row = product_types::table
            .filter(product_types::id.eq(id))
            .first::<DbProductType>(&mut conn)
            .optional()?;

        Ok(row.map(DomainProductType::from))
    }

    fn get_product_type_by_name(&self, name: &str) -> RepositoryResult<Option<DomainProductType>> {
        use crate::schema::product_types;

        let mut conn = self.conn()?;

        let row = product_types::table
            .filter(product_types::name.eq(name))
            .first::<DbProductType>(&mut conn)
            .optional()?;

        Ok(row.map(DomainProductType::from))
    }
}

impl ProductTypeWriter for DieselRepository {
    fn create_product_type(
        &self,
        new_type: &DomainNewProductType,
    ) -> RepositoryResult<DomainProductType> {
        use crate::schema::product_types;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(product_types::table)
            .values(&DbNewProductType::from(new_type))
            .get_result::<DbProductType>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product_type(
        &self,
        id: i32,
        updates: &DomainUpdateProductType,
    ) -> RepositoryResult<DomainProductType> {
        use crate::schema::product_types;

        let mut conn = self.conn()?;

        let updated = diesel::update(product_types::table.filter(product_types::id.eq(id)))
            .set(&DbUpdateProductType::from(updates))
            .get_result::<DbProductType>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product_type(&self, id: i32) -> RepositoryResult<Vec<String>> {
        use crate::schema::product_types;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<String>, RepositoryError, _>(|conn| {
            let orphaned = image_paths_for_relation(conn, ProductRelation::ProductType(id))?;

            let deleted = diesel::delete(product_types::table.filter(product_types::id.eq(id)))
                .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(orphaned)
        })
    }
}

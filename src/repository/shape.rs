use diesel::prelude::*;

use crate::domain::ReferenceListQuery;
use crate::domain::shape::{
    NewShape as DomainNewShape, Shape as DomainShape, UpdateShape as DomainUpdateShape,
};
use crate::models::shape::{
    NewShape as DbNewShape, Shape as DbShape, UpdateShape as DbUpdateShape,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, ShapeReader, ShapeWriter,
};

impl ShapeReader for DieselRepository {
    fn list_shapes(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<DomainShape>> {
        use crate::schema::shapes;

        let mut conn = self.conn()?;

        let mut items = shapes::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(is_active) = query.is_active {
            items = items.filter(shapes::is_active.eq(is_active));
        }

        let rows = items.order(shapes::id.asc()).load::<DbShape>(&mut conn)?;

        Ok(rows.into_iter().map(DomainShape::from).collect())
    }

    fn get_shape_by_id(&self, id: i32) -> RepositoryResult<Option<DomainShape>> {
        use crate::schema::shapes;

        let mut conn = self.conn()?;

        let row = shapes::table
            .filter(shapes::id.eq(id))
            .first::<DbShape>(&mut conn)
            .optional()?;

        Ok(row.map(DomainShape::from))
    }

    fn get_shape_by_name(&self, name: &str) -> RepositoryResult<Option<DomainShape>> {
        use crate::schema::shapes;

        let mut conn = self.conn()?;

        let row = shapes::table
            .filter(shapes::name.eq(name))
            .first::<DbShape>(&mut conn)
            .optional()?;

        Ok(row.map(DomainShape::from))
    }
}

impl ShapeWriter for DieselRepository {
    fn create_shape(&self, new_shape: &DomainNewShape) -> RepositoryResult<DomainShape> {
        use crate::schema::shapes;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(shapes::table)
            .values(&DbNewShape::from(new_shape))
            .get_result::<DbShape>(&mut conn)?;

        Ok(created.into())
    }

    fn update_shape(&self, id: i32, updates: &DomainUpdateShape) -> RepositoryResult<DomainShape> {
        use crate::schema::shapes;

        let mut conn = self.conn()?;

        let updated = diesel::update(shapes::table.filter(shapes::id.eq(id)))
            .set(&DbUpdateShape::from(updates))
            .get_result::<DbShape>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_shape(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::shapes;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(shapes::table.filter(shapes::id.eq(id))).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

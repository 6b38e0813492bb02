use diesel::prelude::*;

use crate::domain::ReferenceListQuery;
use crate::domain::color::{
    Color as DomainColor, NewColor as DomainNewColor, UpdateColor as DomainUpdateColor,
};
use crate::models::color::{
    Color as DbColor, NewColor as DbNewColor, UpdateColor as DbUpdateColor,
};
use crate::repository::{
    ColorReader, ColorWriter, DieselRepository, RepositoryError, RepositoryResult,
};

impl ColorReader for DieselRepository {
    fn list_colors(&self, query: ReferenceListQuery) -> RepositoryResult<Vec<DomainColor>> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let mut items = colors::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(is_active) = query.is_active {
            items = items.filter(colors::is_active.eq(is_active));
        }

        let rows = items.order(colors::id.asc()).load::<DbColor>(&mut conn)?;

        Ok(rows.into_iter().map(DomainColor::from).collect())
    }

    fn get_color_by_id(&self, id: i32) -> RepositoryResult<Option<DomainColor>> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let row = colors::table
            .filter(colors::id.eq(id))
            .first::<DbColor>(&mut conn)
            .optional()?;

        Ok(row.map(DomainColor::from))
    }

    fn get_color_by_name(&self, name: &str) -> RepositoryResult<Option<DomainColor>> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let row = colors::table
            .filter(colors::name.eq(name))
            .first::<DbColor>(&mut conn)
            .optional()?;

        Ok(row.map(DomainColor::from))
    }
}

impl ColorWriter for DieselRepository {
    fn create_color(&self, new_color: &DomainNewColor) -> RepositoryResult<DomainColor> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(colors::table)
            .values(&DbNewColor::from(new_color))
            .get_result::<DbColor>(&mut conn)?;

        Ok(created.into())
    }

    fn update_color(&self, id: i32, updates: &DomainUpdateColor) -> RepositoryResult<DomainColor> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let updated = diesel::update(colors::table.filter(colors::id.eq(id)))
            .set(&DbUpdateColor::from(updates))
            .get_result::<DbColor>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_color(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::colors;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(colors::table.filter(colors::id.eq(id))).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

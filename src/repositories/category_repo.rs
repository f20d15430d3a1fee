//! Category repository for async database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory};
use crate::schema::{categories, event_category};

/// Queries on `categories`, run on a connection the caller owns.
pub struct CategoryRepository;

impl CategoryRepository {
    /// Inserts a new category and returns it with its generated id.
    pub async fn insert(conn: &mut AsyncPgConnection, values: &NewCategory) -> AppResult<Category> {
        diesel::insert_into(categories::table)
            .values(values)
            .returning(Category::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites every column of an existing category.
    ///
    /// # Returns
    /// `None` when no category has the given id
    pub async fn update(
        conn: &mut AsyncPgConnection,
        id: i64,
        values: &NewCategory,
    ) -> AppResult<Option<Category>> {
        diesel::update(categories::table.find(id))
            .set(values)
            .returning(Category::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a category by id.
    ///
    /// # Returns
    /// `Some(Category)` if found, `None` otherwise
    pub async fn find_by_id(conn: &mut AsyncPgConnection, id: i64) -> AppResult<Option<Category>> {
        categories::table
            .find(id)
            .select(Category::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists every category ordered by id.
    pub async fn list_all(conn: &mut AsyncPgConnection) -> AppResult<Vec<Category>> {
        categories::table
            .select(Category::as_select())
            .order(categories::category_id.asc())
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    /// Loads the categories whose names appear in `names`.
    pub async fn find_by_names(
        conn: &mut AsyncPgConnection,
        names: &[String],
    ) -> AppResult<Vec<Category>> {
        categories::table
            .filter(categories::category_name.eq_any(names))
            .select(Category::as_select())
            .order(categories::category_id.asc())
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts the events linked to a category.
    pub async fn count_events(conn: &mut AsyncPgConnection, id: i64) -> AppResult<i64> {
        event_category::table
            .filter(event_category::category_id.eq(id))
            .count()
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a category by id, returning the number of rows removed.
    pub async fn delete(conn: &mut AsyncPgConnection, id: i64) -> AppResult<usize> {
        diesel::delete(categories::table.find(id))
            .execute(conn)
            .await
            .map_err(AppError::from)
    }
}

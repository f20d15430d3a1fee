//! Category service for business logic operations.

use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory};
use crate::repositories::CategoryRepository;

/// Category service handling creation, lookup and guarded deletion.
#[derive(Clone)]
pub struct CategoryService {
    pool: AsyncDbPool,
}

impl CategoryService {
    /// Creates a new CategoryService on the shared pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a category when `id` is `None`, otherwise overwrites the stored one.
    ///
    /// # Arguments
    /// * `id` - Category to overwrite, or `None` to create
    /// * `values` - Name and note to store
    ///
    /// # Returns
    /// The stored category with its generated or existing id
    ///
    /// # Errors
    /// `NotFound` when `id` names no category, `Duplicate` when the name is taken
    pub async fn save(&self, id: Option<i64>, values: NewCategory) -> AppResult<Category> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    match id {
                        None => CategoryRepository::insert(conn, &values).await,
                        Some(id) => CategoryRepository::update(conn, id, &values)
                            .await?
                            .ok_or_else(|| AppError::not_found_by_id("Category", id)),
                    }
                }
                .scope_boxed()
            })
            .await
    }

    /// Gets a category by its ID.
    ///
    /// # Returns
    /// The category, or `NotFound`
    pub async fn get(&self, id: i64) -> AppResult<Category> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;
        CategoryRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found_by_id("Category", id))
    }

    /// Lists every category; an empty table is reported as `EmptyResult`.
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;
        let categories = CategoryRepository::list_all(&mut conn).await?;
        non_empty(categories, "No categories found.")
    }

    /// Deletes a category that no event references.
    ///
    /// # Returns
    /// The confirmation message shown to the client
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Unsupported` while events still link it
    ///
    /// The reference count and the delete share one serializable transaction,
    /// so an event linked concurrently makes one of the two requests fail.
    pub async fn delete(&self, id: i64) -> AppResult<String> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    if CategoryRepository::find_by_id(conn, id).await?.is_none() {
                        return Err(AppError::not_found_by_id("Category", id));
                    }
                    if CategoryRepository::count_events(conn, id).await? > 0 {
                        return Err(AppError::unsupported(format!(
                            "Category with ID={} is already associated with one or more events and can not be deleted.",
                            id
                        )));
                    }
                    CategoryRepository::delete(conn, id).await?;
                    Ok(deleted_message("category", id))
                }
                .scope_boxed()
            })
            .await
    }
}

/// Turns an empty listing into `EmptyResult` carrying `message`.
pub(crate) fn non_empty<T>(items: Vec<T>, message: impl Into<String>) -> AppResult<Vec<T>> {
    if items.is_empty() {
        Err(AppError::empty(message))
    } else {
        Ok(items)
    }
}

/// Confirmation returned by every delete operation.
pub(crate) fn deleted_message(resource: &str, id: i64) -> String {
    format!("Deletion of {} with ID={} was successful.", resource, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_empty_listing() {
        let result = non_empty(Vec::<i64>::new(), "No categories found.");
        match result {
            Err(AppError::EmptyResult { message }) => assert_eq!(message, "No categories found."),
            other => panic!("Expected EmptyResult, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_empty_passes_items_through() {
        assert_eq!(non_empty(vec![1, 2], "unused").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_deleted_message() {
        assert_eq!(
            deleted_message("category", 4),
            "Deletion of category with ID=4 was successful."
        );
    }
}

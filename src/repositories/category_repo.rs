//! Category persistence.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::schema::categories;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>>;

    /// All categories, or those whose name or slug contains `search`
    /// (case-insensitive), ordered by name.
    async fn list(&self, search: Option<String>) -> AppResult<Vec<Category>>;

    async fn update(&self, id: Uuid, changes: UpdateCategory) -> AppResult<Category>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: AsyncDbPool,
}

impl PgCategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await?;

        categories::table
            .find(id)
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await?;

        categories::table
            .filter(categories::slug.eq(slug))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<Category>> {
        let mut conn = self.pool.get().await?;

        let mut query = categories::table
            .select(Category::as_select())
            .order(categories::name.asc())
            .into_boxed();

        if let Some(term) = search {
            let pattern = super::contains_pattern(&term);
            query = query.filter(
                categories::name
                    .ilike(pattern.clone())
                    .or(categories::slug.ilike(pattern)),
            );
        }

        query.load(&mut conn).await.map_err(AppError::from)
    }

    async fn update(&self, id: Uuid, changes: UpdateCategory) -> AppResult<Category> {
        let mut conn = self.pool.get().await?;

        diesel::update(categories::table.find(id))
            .set(&changes)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(categories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(deleted > 0)
    }
}

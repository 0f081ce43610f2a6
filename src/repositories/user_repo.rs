//! User and favorite persistence.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Favorite, NewUser, Product, ProductDetails, UpdateUser, User};
use crate::schema::{categories, favorites, products, users};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>>;

    /// All users, or those whose first name, last name or nickname contains
    /// `search` (case-insensitive), ordered by nickname.
    async fn list(&self, search: Option<String>) -> AppResult<Vec<User>>;

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Favorite products of each given user, as `(user_id, product)` pairs
    async fn find_favorites(&self, user_ids: Vec<Uuid>) -> AppResult<Vec<(Uuid, ProductDetails)>>;

    /// Adding an existing edge is a no-op
    async fn add_favorite(&self, favorite: Favorite) -> AppResult<()>;

    /// Removing a missing edge is a no-op
    async fn remove_favorite(&self, favorite: Favorite) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::nickname.eq(nickname))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<User>> {
        let mut conn = self.pool.get().await?;

        let mut query = users::table
            .select(User::as_select())
            .order(users::nickname.asc())
            .into_boxed();

        if let Some(term) = search {
            let pattern = super::contains_pattern(&term);
            query = query.filter(
                users::first_name
                    .ilike(pattern.clone())
                    .or(users::last_name.ilike(pattern.clone()))
                    .or(users::nickname.ilike(pattern)),
            );
        }

        query.load(&mut conn).await.map_err(AppError::from)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.find(id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_favorites(&self, user_ids: Vec<Uuid>) -> AppResult<Vec<(Uuid, ProductDetails)>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        let rows = favorites::table
            .inner_join(products::table.inner_join(categories::table))
            .filter(favorites::user_id.eq_any(user_ids))
            .select((
                favorites::user_id,
                Product::as_select(),
                Category::as_select(),
            ))
            .order(products::name.asc())
            .load::<(Uuid, Product, Category)>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(user_id, product, category)| (user_id, ProductDetails { product, category }))
            .collect())
    }

    async fn add_favorite(&self, favorite: Favorite) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(favorites::table)
            .values(&favorite)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn remove_favorite(&self, favorite: Favorite) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(favorite.user_id))
                .filter(favorites::product_id.eq(favorite.product_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }
}

//! Product persistence. Reads always join the owning category.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewProduct, Product, ProductDetails, UpdateProduct};
use crate::schema::{categories, products};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, new_product: NewProduct) -> AppResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductDetails>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<ProductDetails>>;

    /// All products, or those whose name, slug or description contains
    /// `search` (case-insensitive), ordered by name.
    async fn list(&self, search: Option<String>) -> AppResult<Vec<ProductDetails>>;

    async fn list_by_category_slug(&self, category_slug: &str) -> AppResult<Vec<ProductDetails>>;

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: AsyncDbPool,
}

impl PgProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn into_details(rows: Vec<(Product, Category)>) -> Vec<ProductDetails> {
    rows.into_iter()
        .map(|(product, category)| ProductDetails { product, category })
        .collect()
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(products::table)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductDetails>> {
        let mut conn = self.pool.get().await?;

        products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id))
            .select((Product::as_select(), Category::as_select()))
            .first::<(Product, Category)>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(|(product, category)| ProductDetails { product, category }))
            .map_err(AppError::from)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<ProductDetails>> {
        let mut conn = self.pool.get().await?;

        products::table
            .inner_join(categories::table)
            .filter(products::slug.eq(slug))
            .select((Product::as_select(), Category::as_select()))
            .first::<(Product, Category)>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(|(product, category)| ProductDetails { product, category }))
            .map_err(AppError::from)
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<ProductDetails>> {
        let mut conn = self.pool.get().await?;

        let mut query = products::table
            .inner_join(categories::table)
            .select((Product::as_select(), Category::as_select()))
            .order(products::name.asc())
            .into_boxed();

        if let Some(term) = search {
            let pattern = super::contains_pattern(&term);
            query = query.filter(
                products::name
                    .ilike(pattern.clone())
                    .or(products::slug.ilike(pattern.clone()))
                    .or(products::description.ilike(pattern)),
            );
        }

        let rows = query
            .load::<(Product, Category)>(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(into_details(rows))
    }

    async fn list_by_category_slug(&self, category_slug: &str) -> AppResult<Vec<ProductDetails>> {
        let mut conn = self.pool.get().await?;

        let rows = products::table
            .inner_join(categories::table)
            .filter(categories::slug.eq(category_slug))
            .select((Product::as_select(), Category::as_select()))
            .order(products::name.asc())
            .load::<(Product, Category)>(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(into_details(rows))
    }

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;

        diesel::update(products::table.find(id))
            .set(&changes)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(products::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(deleted > 0)
    }
}

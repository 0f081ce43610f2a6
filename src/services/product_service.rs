//! Product business rules. Every write first resolves the owning category.

use std::sync::Arc;

use uuid::Uuid;

use super::CategoryService;
use super::category_service::{search_scope, slug_for};
use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, ProductDetails, UpdateProduct};
use crate::repositories::ProductRepository;

/// Writable product fields, as accepted by create and update
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub price: i32,
    pub is_available: bool,
    pub category_id: Uuid,
}

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    categories: CategoryService,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>, categories: CategoryService) -> Self {
        Self { repo, categories }
    }

    /// Lists products, optionally filtered by a case-insensitive term over
    /// name, slug and description.
    pub async fn list(&self, search: Option<String>) -> AppResult<Vec<ProductDetails>> {
        let products = self.repo.list(search.clone()).await?;
        if products.is_empty() {
            return Err(AppError::not_found("Product", "search", search_scope(&search)));
        }
        Ok(products)
    }

    pub async fn search(&self, term: &str) -> AppResult<Vec<ProductDetails>> {
        self.list(Some(term.to_string())).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ProductDetails> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product", "id", id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<ProductDetails> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Product", "slug", slug))
    }

    pub async fn get_by_category_slug(&self, category_slug: &str) -> AppResult<Vec<ProductDetails>> {
        let products = self.repo.list_by_category_slug(category_slug).await?;
        if products.is_empty() {
            return Err(AppError::not_found("Product", "category", category_slug));
        }
        Ok(products)
    }

    pub async fn create(&self, input: ProductInput) -> AppResult<ProductDetails> {
        self.categories.get_by_id(input.category_id).await?;

        let slug = slug_for(&input.name)?;
        if self.repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::bad_request("Name already exist"));
        }

        let product = self
            .repo
            .create(NewProduct {
                name: input.name,
                slug,
                description: input.description,
                image: input.image,
                price: input.price,
                is_available: input.is_available,
                category_id: input.category_id,
            })
            .await?;
        tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");

        self.get_by_id(product.id).await
    }

    pub async fn update(&self, id: Uuid, input: ProductInput) -> AppResult<ProductDetails> {
        self.categories.get_by_id(input.category_id).await?;
        let current = self.get_by_id(id).await?;

        let slug = slug_for(&input.name)?;
        let slug = if slug == current.product.slug {
            None
        } else {
            if self.repo.find_by_slug(&slug).await?.is_some() {
                return Err(AppError::bad_request("Slug already exist"));
            }
            Some(slug)
        };

        self.repo
            .update(
                id,
                UpdateProduct {
                    name: input.name,
                    slug,
                    description: input.description,
                    image: input.image,
                    price: input.price,
                    is_available: input.is_available,
                    category_id: input.category_id,
                },
            )
            .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.get_by_id(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(true)
    }
}

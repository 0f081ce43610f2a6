//! Category business rules: slug derivation and uniqueness.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::repositories::CategoryRepository;
use crate::utils::slug::slugify;

/// Width of the `slug` columns of `categories` and `products`
pub(crate) const MAX_SLUG_LEN: usize = 128;

/// Derive a slug from `name`. Names that transliterate to nothing, or to more
/// than [`MAX_SLUG_LEN`] characters, are rejected.
pub(crate) fn slug_for(name: &str) -> AppResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::bad_request(format!(
            "Name '{}' does not produce a usable slug",
            name
        )));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::bad_request(format!(
            "Name '{}' produces a slug longer than {} characters",
            name, MAX_SLUG_LEN
        )));
    }
    Ok(slug)
}

/// Search scope for "nothing found" errors
pub(crate) fn search_scope(search: &Option<String>) -> &str {
    search.as_deref().unwrap_or("*")
}

#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Lists categories, optionally filtered by a case-insensitive term over
    /// name and slug. An empty result is `NotFound`.
    pub async fn list(&self, search: Option<String>) -> AppResult<Vec<Category>> {
        let categories = self.repo.list(search.clone()).await?;
        if categories.is_empty() {
            return Err(AppError::not_found("Category", "search", search_scope(&search)));
        }
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: uuid::Uuid) -> AppResult<Category> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", "id", id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Category> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Category", "slug", slug))
    }

    pub async fn create(&self, name: String, image: Option<String>) -> AppResult<Category> {
        let slug = slug_for(&name)?;
        if self.repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::bad_request("Name already exist"));
        }

        let category = self.repo.create(NewCategory { name, slug, image }).await?;
        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Renames a category. The slug is only rewritten (and re-checked) when
    /// the new name slugifies differently.
    pub async fn update(
        &self,
        id: uuid::Uuid,
        name: String,
        image: Option<String>,
    ) -> AppResult<Category> {
        let current = self.get_by_id(id).await?;
        let slug = slug_for(&name)?;

        let slug = if slug == current.slug {
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
                UpdateCategory {
                    name: Some(name),
                    slug,
                    image,
                },
            )
            .await
    }

    pub async fn delete(&self, id: uuid::Uuid) -> AppResult<bool> {
        self.get_by_id(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(category_id = %id, "Category deleted");
        Ok(true)
    }
}

//! In-memory repositories for service and router tests.
//!
//! One `MemoryStore` backs all three traits so joins and referential rules
//! behave like the PostgreSQL schema: unique email, nickname and slugs,
//! products must reference an existing category, a category with products
//! cannot be deleted, and favorites disappear with their product.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CategoryRepository, ProductRepository, Repositories, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{
    Category, Favorite, NewCategory, NewProduct, NewUser, Product, ProductDetails,
    UpdateCategory, UpdateProduct, UpdateUser, User,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    products: HashMap<Uuid, Product>,
    favorites: BTreeSet<(Uuid, Uuid)>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repositories that all share this store
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            categories: Arc::new(self.clone()),
            products: Arc::new(self.clone()),
        }
    }

    pub async fn favorite_count(&self) -> usize {
        self.tables.read().await.favorites.len()
    }

    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn duplicate(entity: &str, field: &str, value: &str) -> AppError {
    AppError::Duplicate {
        entity: entity.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

impl Tables {
    fn details(&self, product: &Product) -> AppResult<ProductDetails> {
        let category = self
            .categories
            .get(&product.category_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Category", "id", product.category_id))?;
        Ok(ProductDetails {
            product: product.clone(),
            category,
        })
    }

    fn sorted_details<'a>(
        &self,
        products: impl Iterator<Item = &'a Product>,
    ) -> AppResult<Vec<ProductDetails>> {
        let mut details = products
            .map(|p| self.details(p))
            .collect::<AppResult<Vec<_>>>()?;
        details.sort_by(|a, b| a.product.name.cmp(&b.product.name));
        Ok(details)
    }

    fn check_category_slug(&self, slug: &str, except: Option<Uuid>) -> AppResult<()> {
        if self
            .categories
            .values()
            .any(|c| c.slug == slug && Some(c.id) != except)
        {
            return Err(duplicate("categories", "slug", slug));
        }
        Ok(())
    }

    fn check_product_refs(&self, slug: &str, category_id: Uuid, except: Option<Uuid>) -> AppResult<()> {
        if self
            .products
            .values()
            .any(|p| p.slug == slug && Some(p.id) != except)
        {
            return Err(duplicate("products", "slug", slug));
        }
        if !self.categories.contains_key(&category_id) {
            return Err(AppError::Validation {
                field: "category_id".to_string(),
                reason: format!("Referenced record '{}' does not exist", category_id),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut tables = self.tables.write().await;
        tables.check_category_slug(&new_category.slug, None)?;

        let category = Category {
            id: Uuid::new_v4(),
            name: new_category.name,
            slug: new_category.slug,
            image: new_category.image,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut found: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| match &search {
                Some(term) => contains(&c.name, term) || contains(&c.slug, term),
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn update(&self, id: Uuid, changes: UpdateCategory) -> AppResult<Category> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = &changes.slug {
            tables.check_category_slug(slug, Some(id))?;
        }

        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Category", "id", id))?;
        if let Some(name) = changes.name {
            category.name = name;
        }
        if let Some(slug) = changes.slug {
            category.slug = slug;
        }
        if let Some(image) = changes.image {
            category.image = Some(image);
        }
        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.products.values().any(|p| p.category_id == id) {
            return Err(AppError::Validation {
                field: "category_id".to_string(),
                reason: "Record is still referenced from products".to_string(),
            });
        }
        Ok(tables.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut tables = self.tables.write().await;
        tables.check_product_refs(&new_product.slug, new_product.category_id, None)?;

        let product = Product {
            id: Uuid::new_v4(),
            name: new_product.name,
            slug: new_product.slug,
            description: new_product.description,
            image: new_product.image,
            price: new_product.price,
            is_available: new_product.is_available,
            category_id: new_product.category_id,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductDetails>> {
        let tables = self.tables.read().await;
        tables.products.get(&id).map(|p| tables.details(p)).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<ProductDetails>> {
        let tables = self.tables.read().await;
        tables
            .products
            .values()
            .find(|p| p.slug == slug)
            .map(|p| tables.details(p))
            .transpose()
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<ProductDetails>> {
        let tables = self.tables.read().await;
        tables.sorted_details(tables.products.values().filter(|p| match &search {
            Some(term) => {
                contains(&p.name, term) || contains(&p.slug, term) || contains(&p.description, term)
            }
            None => true,
        }))
    }

    async fn list_by_category_slug(&self, category_slug: &str) -> AppResult<Vec<ProductDetails>> {
        let tables = self.tables.read().await;
        tables.sorted_details(tables.products.values().filter(|p| {
            tables
                .categories
                .get(&p.category_id)
                .is_some_and(|c| c.slug == category_slug)
        }))
    }

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        let mut tables = self.tables.write().await;
        let current_slug = tables
            .products
            .get(&id)
            .map(|p| p.slug.clone())
            .ok_or_else(|| AppError::not_found("Product", "id", id))?;
        let slug = changes.slug.clone().unwrap_or(current_slug);
        tables.check_product_refs(&slug, changes.category_id, Some(id))?;

        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Product", "id", id))?;
        product.name = changes.name;
        product.slug = slug;
        product.description = changes.description;
        if let Some(image) = changes.image {
            product.image = Some(image);
        }
        product.price = changes.price;
        product.is_available = changes.is_available;
        product.category_id = changes.category_id;
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        tables.favorites.retain(|(_, product_id)| *product_id != id);
        Ok(tables.products.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(duplicate("users", "email", &new_user.email));
        }
        if tables.users.values().any(|u| u.nickname == new_user.nickname) {
            return Err(duplicate("users", "nickname", &new_user.nickname));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password: new_user.password,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            nickname: new_user.nickname,
            avatar: None,
            created_at: jiff_diesel::Timestamp::from(jiff::Timestamp::now()),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.nickname == nickname).cloned())
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut found: Vec<User> = tables
            .users
            .values()
            .filter(|u| match &search {
                Some(term) => {
                    contains(&u.first_name, term)
                        || contains(&u.last_name, term)
                        || contains(&u.nickname, term)
                }
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        Ok(found)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.nickname == changes.nickname && u.id != id)
        {
            return Err(duplicate("users", "nickname", &changes.nickname));
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User", "id", id))?;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        user.nickname = changes.nickname;
        Ok(user.clone())
    }

    async fn find_favorites(&self, user_ids: Vec<Uuid>) -> AppResult<Vec<(Uuid, ProductDetails)>> {
        let tables = self.tables.read().await;
        let mut found = Vec::new();
        for (user_id, product_id) in &tables.favorites {
            if !user_ids.contains(user_id) {
                continue;
            }
            if let Some(product) = tables.products.get(product_id) {
                found.push((*user_id, tables.details(product)?));
            }
        }
        found.sort_by(|a, b| a.1.product.name.cmp(&b.1.product.name));
        Ok(found)
    }

    async fn add_favorite(&self, favorite: Favorite) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&favorite.user_id)
            || !tables.products.contains_key(&favorite.product_id)
        {
            return Err(AppError::Validation {
                field: "favorite".to_string(),
                reason: "Referenced record does not exist".to_string(),
            });
        }
        tables
            .favorites
            .insert((favorite.user_id, favorite.product_id));
        Ok(())
    }

    async fn remove_favorite(&self, favorite: Favorite) -> AppResult<()> {
        self.tables
            .write()
            .await
            .favorites
            .remove(&(favorite.user_id, favorite.product_id));
        Ok(())
    }
}

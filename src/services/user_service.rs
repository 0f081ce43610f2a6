//! User profiles and favorites.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::ProductService;
use super::category_service::search_scope;
use crate::error::{AppError, AppResult};
use crate::models::{Favorite, UpdateUser, User, UserDetails};
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    products: ProductService,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, products: ProductService) -> Self {
        Self { repo, products }
    }

    /// Attach favorite products to each user, keeping the input order.
    async fn with_favorites(&self, users: Vec<User>) -> AppResult<Vec<UserDetails>> {
        let ids = users.iter().map(|u| u.id).collect();
        let mut favorites: HashMap<Uuid, Vec<_>> = HashMap::new();
        for (user_id, product) in self.repo.find_favorites(ids).await? {
            favorites.entry(user_id).or_default().push(product);
        }

        Ok(users
            .into_iter()
            .map(|user| UserDetails {
                favorites: favorites.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect())
    }

    async fn details(&self, user: User) -> AppResult<UserDetails> {
        let mut details = self.with_favorites(vec![user]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal {
                source: anyhow::anyhow!("favorites lookup dropped the user"),
            })
    }

    async fn find(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", "id", id))
    }

    /// Lists users, optionally filtered by a case-insensitive term over first
    /// name, last name and nickname.
    pub async fn list(&self, search: Option<String>) -> AppResult<Vec<UserDetails>> {
        let users = self.repo.list(search.clone()).await?;
        if users.is_empty() {
            return Err(AppError::not_found("User", "search", search_scope(&search)));
        }
        self.with_favorites(users).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UserDetails> {
        let user = self.find(id).await?;
        self.details(user).await
    }

    pub async fn get_by_nickname(&self, nickname: &str) -> AppResult<UserDetails> {
        let user = self
            .repo
            .find_by_nickname(nickname)
            .await?
            .ok_or_else(|| AppError::not_found("User", "nickname", nickname))?;
        self.details(user).await
    }

    pub async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<UserDetails> {
        let current = self.find(id).await?;

        if current.nickname != changes.nickname
            && self.repo.find_by_nickname(&changes.nickname).await?.is_some()
        {
            return Err(AppError::bad_request("Nickname is exist"));
        }

        let user = self.repo.update(id, changes).await?;
        self.details(user).await
    }

    /// Marks a product as favorite. Adding it twice keeps a single edge.
    pub async fn add_favorite(&self, favorite: Favorite) -> AppResult<UserDetails> {
        let user = self.find(favorite.user_id).await?;
        self.products.get_by_id(favorite.product_id).await?;

        self.repo.add_favorite(favorite).await?;
        tracing::debug!(user_id = %favorite.user_id, product_id = %favorite.product_id, "Favorite added");
        self.details(user).await
    }

    /// Only the product is checked; an unknown user is a silent no-op.
    pub async fn remove_favorite(&self, favorite: Favorite) -> AppResult<bool> {
        self.products.get_by_id(favorite.product_id).await?;
        self.repo.remove_favorite(favorite).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, ProductDetails};
    use crate::repositories::memory::MemoryStore;
    use crate::services::{CategoryService, ProductInput};

    struct Fixture {
        store: MemoryStore,
        users: UserService,
        products: ProductService,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let categories = CategoryService::new(Arc::new(store.clone()));
        let products = ProductService::new(Arc::new(store.clone()), categories);
        let users = UserService::new(Arc::new(store.clone()), products.clone());
        Fixture {
            store,
            users,
            products,
        }
    }

    async fn user(f: &Fixture, nickname: &str, first_name: &str) -> User {
        UserRepository::create(
            &f.store,
            NewUser {
                email: format!("{}@example.com", nickname),
                password: "hash".to_string(),
                first_name: first_name.to_string(),
                last_name: "Smith".to_string(),
                nickname: nickname.to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn product(f: &Fixture, name: &str) -> ProductDetails {
        let category = match crate::repositories::CategoryRepository::find_by_slug(&f.store, "drinks")
            .await
            .unwrap()
        {
            Some(category) => category,
            None => CategoryService::new(Arc::new(f.store.clone()))
                .create("Drinks".to_string(), None)
                .await
                .unwrap(),
        };
        f.products
            .create(ProductInput {
                name: name.to_string(),
                description: "fizzy".to_string(),
                image: None,
                price: 99,
                is_available: true,
                category_id: category.id,
            })
            .await
            .unwrap()
    }

    fn changes(first_name: &str, nickname: &str) -> UpdateUser {
        UpdateUser {
            first_name: first_name.to_string(),
            last_name: "Smith".to_string(),
            nickname: nickname.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let f = fixture();
        user(&f, "alice_w", "Alice").await;
        user(&f, "bobby_t", "Bobby").await;

        let all = f.users.list(None).await.unwrap();
        let nicknames: Vec<_> = all.iter().map(|d| d.user.nickname.as_str()).collect();
        assert_eq!(nicknames, ["alice_w", "bobby_t"]);

        let found = f.users.list(Some("BOB".to_string())).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].user.first_name, "Bobby");

        let err = f.users.list(Some("carol".to_string())).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_by_nickname() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;

        let found = f.users.get_by_nickname("alice_w").await.unwrap();
        assert_eq!(found.user.id, alice.id);
        assert!(found.favorites.is_empty());

        let err = f.users.get_by_nickname("nobody").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_nickname_rules() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;
        user(&f, "bobby_t", "Bobby").await;

        // keeping your own nickname is fine
        let updated = f
            .users
            .update(alice.id, changes("Alicia", "alice_w"))
            .await
            .unwrap();
        assert_eq!(updated.user.first_name, "Alicia");

        let err = f
            .users
            .update(alice.id, changes("Alicia", "bobby_t"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err = f
            .users
            .update(Uuid::new_v4(), changes("Carol", "carol_x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;
        let cola = product(&f, "Cola").await;
        let favorite = Favorite {
            user_id: alice.id,
            product_id: cola.product.id,
        };

        f.users.add_favorite(favorite).await.unwrap();
        let details = f.users.add_favorite(favorite).await.unwrap();

        assert_eq!(f.store.favorite_count().await, 1);
        assert_eq!(details.favorites, vec![cola]);
    }

    #[tokio::test]
    async fn test_add_favorite_requires_user_and_product() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;
        let cola = product(&f, "Cola").await;

        let err = f
            .users
            .add_favorite(Favorite {
                user_id: Uuid::new_v4(),
                product_id: cola.product.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref entity, .. } if entity == "User"));

        let err = f
            .users
            .add_favorite(Favorite {
                user_id: alice.id,
                product_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref entity, .. } if entity == "Product"));
        assert_eq!(f.store.favorite_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;
        let cola = product(&f, "Cola").await;
        let favorite = Favorite {
            user_id: alice.id,
            product_id: cola.product.id,
        };

        // never added
        assert!(f.users.remove_favorite(favorite).await.unwrap());

        f.users.add_favorite(favorite).await.unwrap();
        assert!(f.users.remove_favorite(favorite).await.unwrap());
        assert_eq!(f.store.favorite_count().await, 0);

        let err = f
            .users
            .remove_favorite(Favorite {
                user_id: alice.id,
                product_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_product_drops_favorites() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;
        let cola = product(&f, "Cola").await;
        let water = product(&f, "Water").await;
        for product_id in [cola.product.id, water.product.id] {
            f.users
                .add_favorite(Favorite {
                    user_id: alice.id,
                    product_id,
                })
                .await
                .unwrap();
        }

        assert!(f.products.delete(cola.product.id).await.unwrap());

        assert_eq!(f.store.favorite_count().await, 1);
        let details = f.users.get_by_id(alice.id).await.unwrap();
        assert_eq!(details.favorites, vec![water]);
    }

    #[tokio::test]
    async fn test_favorites_listed_per_user() {
        let f = fixture();
        let alice = user(&f, "alice_w", "Alice").await;
        let bobby = user(&f, "bobby_t", "Bobby").await;
        let cola = product(&f, "Cola").await;
        let water = product(&f, "Water").await;

        for (user_id, product_id) in [
            (alice.id, water.product.id),
            (alice.id, cola.product.id),
            (bobby.id, water.product.id),
        ] {
            f.users
                .add_favorite(Favorite { user_id, product_id })
                .await
                .unwrap();
        }

        let all = f.users.list(None).await.unwrap();
        let names = |d: &UserDetails| -> Vec<String> {
            d.favorites.iter().map(|p| p.product.name.clone()).collect()
        };
        assert_eq!(names(&all[0]), ["Cola", "Water"]);
        assert_eq!(names(&all[1]), ["Water"]);
    }
}

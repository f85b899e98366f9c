//! Shared fixtures: in-memory repositories behind the real services and router.
//!
//! Every repository shares one `Store`, so cascades and cross-entity lookups
//! behave like the database schema does.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

use poem_collection::domain::{
    Category, InsertReview, NewUser, PasswordManager, Poem, PoemDraft, Review, RuleViolation,
    UpdateReview, UpdateUser, User, UserDto, UserRole,
};
use poem_collection::errors::{AppError, AppResult};
use poem_collection::infra::{
    CategoryRepository, Persistence, PoemRepository, ReviewRepository, UserRepository,
};
use poem_collection::services::{AuthService, ServiceContainer, Services};
use poem_collection::{create_router, AppState, Config};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const PASSWORD: &str = "Str0ng!Pass";

// =============================================================================
// In-memory storage
// =============================================================================

#[derive(Debug, Clone)]
pub struct PoemRow {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub writer_id: i32,
    pub category_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub poems: Vec<PoemRow>,
    pub reviews: Vec<Review>,
    next_id: i32,
}

impl Store {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn hydrate(&self, row: &PoemRow) -> Option<Poem> {
        let writer = self.users.iter().find(|u| u.id == row.writer_id)?.clone();
        let categories = self
            .categories
            .iter()
            .filter(|c| row.category_ids.contains(&c.id))
            .cloned()
            .collect();

        Some(Poem {
            id: row.id,
            title: row.title.clone(),
            body: row.body.clone(),
            writer: UserDto::from(writer),
            categories,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone, Default)]
pub struct SharedStore(Arc<Mutex<Store>>);

impl SharedStore {
    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct MemoryUsers(SharedStore);
pub struct MemoryPoems(SharedStore);
pub struct MemoryCategories(SharedStore);
pub struct MemoryReviews(SharedStore);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.0.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.0.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.0.lock().users.iter().any(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> AppResult<Option<User>> {
        let mut store = self.0.lock();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(RuleViolation::EmailTaken.into());
        }
        let id = store.next_id();
        let user = User {
            id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.users.push(user.clone());
        Ok(Some(user))
    }

    async fn update(&self, id: i32, update: UpdateUser) -> AppResult<Option<User>> {
        let mut store = self.0.lock();
        let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<Option<User>> {
        let mut store = self.0.lock();
        let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.password_hash = password_hash;
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut store = self.0.lock();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        if store.users.len() == before {
            return Ok(false);
        }

        let poem_ids: Vec<i32> = store
            .poems
            .iter()
            .filter(|p| p.writer_id == id)
            .map(|p| p.id)
            .collect();
        store.poems.retain(|p| p.writer_id != id);
        store
            .reviews
            .retain(|r| r.user_id != id && !poem_ids.contains(&r.poem_id));
        Ok(true)
    }
}

#[async_trait]
impl PoemRepository for MemoryPoems {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Poem>> {
        let store = self.0.lock();
        Ok(store
            .poems
            .iter()
            .find(|p| p.id == id)
            .and_then(|row| store.hydrate(row)))
    }

    async fn list(&self, category_id: Option<i32>) -> AppResult<Vec<Poem>> {
        let store = self.0.lock();
        Ok(store
            .poems
            .iter()
            .filter(|p| category_id.map_or(true, |c| p.category_ids.contains(&c)))
            .filter_map(|row| store.hydrate(row))
            .collect())
    }

    async fn create(&self, writer_id: i32, draft: PoemDraft) -> AppResult<Option<Poem>> {
        let mut store = self.0.lock();
        let id = store.next_id();
        let row = PoemRow {
            id,
            title: draft.title,
            body: draft.body,
            writer_id,
            category_ids: draft.category_ids,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.poems.push(row.clone());
        Ok(store.hydrate(&row))
    }

    async fn update(&self, id: i32, draft: PoemDraft) -> AppResult<Option<Poem>> {
        let mut store = self.0.lock();
        let Some(row) = store.poems.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.title = draft.title;
        row.body = draft.body;
        row.category_ids = draft.category_ids;
        row.updated_at = Utc::now();
        let row = row.clone();
        Ok(store.hydrate(&row))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut store = self.0.lock();
        let before = store.poems.len();
        store.poems.retain(|p| p.id != id);
        store.reviews.retain(|r| r.poem_id != id);
        Ok(store.poems.len() < before)
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategories {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        Ok(self.0.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        Ok(self
            .0
            .lock()
            .categories
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        Ok(self.0.lock().categories.clone())
    }

    async fn existing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        Ok(self
            .0
            .lock()
            .categories
            .iter()
            .map(|c| c.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn create(&self, name: String) -> AppResult<Option<Category>> {
        let mut store = self.0.lock();
        if store.categories.iter().any(|c| c.name == name) {
            return Err(AppError::conflict(format!("Category '{}'", name)));
        }
        let id = store.next_id();
        let category = Category {
            id,
            name,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.categories.push(category.clone());
        Ok(Some(category))
    }

    async fn update(&self, id: i32, name: String) -> AppResult<Option<Category>> {
        let mut store = self.0.lock();
        if store.categories.iter().any(|c| c.name == name && c.id != id) {
            return Err(AppError::conflict(format!("Category '{}'", name)));
        }
        let Some(category) = store.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = name;
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut store = self.0.lock();
        let before = store.categories.len();
        store.categories.retain(|c| c.id != id);
        for poem in store.poems.iter_mut() {
            poem.category_ids.retain(|c| *c != id);
        }
        Ok(store.categories.len() < before)
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviews {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        Ok(self.0.lock().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_poem(&self, poem_id: i32) -> AppResult<Vec<Review>> {
        Ok(self
            .0
            .lock()
            .reviews
            .iter()
            .filter(|r| r.poem_id == poem_id)
            .cloned()
            .collect())
    }

    async fn ratings_for_poem(&self, poem_id: i32) -> AppResult<Vec<i32>> {
        Ok(self
            .0
            .lock()
            .reviews
            .iter()
            .filter(|r| r.poem_id == poem_id)
            .map(|r| r.rating)
            .collect())
    }

    async fn create(
        &self,
        poem_id: i32,
        user_id: i32,
        review: InsertReview,
    ) -> AppResult<Option<Review>> {
        let mut store = self.0.lock();
        let id = store.next_id();
        let review = Review {
            id,
            body: review.body,
            rating: review.rating,
            user_id,
            poem_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.reviews.push(review.clone());
        Ok(Some(review))
    }

    async fn update(&self, id: i32, review: UpdateReview) -> AppResult<Option<Review>> {
        let mut store = self.0.lock();
        let Some(stored) = store.reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        stored.body = review.body;
        stored.rating = review.rating;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut store = self.0.lock();
        let before = store.reviews.len();
        store.reviews.retain(|r| r.id != id);
        Ok(store.reviews.len() < before)
    }
}

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainPasswords;

#[async_trait]
impl PasswordManager for PlainPasswords {
    async fn encrypt(&self, plain_text: &str) -> AppResult<String> {
        Ok(format!("plain:{plain_text}"))
    }

    async fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("plain:") == Some(plain_text))
    }
}

// =============================================================================
// Application harness
// =============================================================================

pub struct TestApp {
    pub store: SharedStore,
    pub services: Services,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_passwords(Arc::new(PlainPasswords))
    }

    pub fn with_passwords(passwords: Arc<dyn PasswordManager>) -> Self {
        let store = SharedStore::default();
        let uow = Persistence::from_parts(
            Arc::new(MemoryUsers(store.clone())),
            Arc::new(MemoryPoems(store.clone())),
            Arc::new(MemoryCategories(store.clone())),
            Arc::new(MemoryReviews(store.clone())),
        );
        let services = Services::new(Arc::new(uow), passwords, Config::with_secret(TEST_SECRET));
        let router = create_router(AppState::from_container(&services));

        Self {
            store,
            services,
            router,
        }
    }

    /// Insert a user directly; the password is always [`PASSWORD`].
    pub fn seed_user(&self, email: &str, role: UserRole) -> User {
        let mut store = self.store.lock();
        let id = store.next_id();
        let user = User {
            id,
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: format!("plain:{PASSWORD}"),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.users.push(user.clone());
        user
    }

    pub fn seed_category(&self, name: &str) -> Category {
        let mut store = self.store.lock();
        let id = store.next_id();
        let category = Category {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.categories.push(category.clone());
        category
    }

    pub fn seed_poem(&self, writer: &User, category_ids: &[i32]) -> i32 {
        let mut store = self.store.lock();
        let id = store.next_id();
        store.poems.push(PoemRow {
            id,
            title: "Hope".to_string(),
            body: "is the thing with feathers".to_string(),
            writer_id: writer.id,
            category_ids: category_ids.to_vec(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn seed_review(&self, author: &User, poem_id: i32, rating: i32) -> i32 {
        let mut store = self.store.lock();
        let id = store.next_id();
        store.reviews.push(Review {
            id,
            body: "Lovely".to_string(),
            rating,
            user_id: author.id,
            poem_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn token_for(&self, user: &User) -> String {
        match self.services.auth().issue_token(user) {
            Ok(token) => token.access_token,
            Err(e) => panic!("token issuance failed: {e}"),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn parse<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

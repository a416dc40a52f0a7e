#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::Utc;
use serde_json::{Value, json};
use tower::{Service, ServiceExt};
use tower_http::normalize_path::NormalizePath;
use uuid::Uuid;

use book_api::application::ports::book_repository::{BookChanges, BookDraft, BookRepository};
use book_api::application::ports::library_repository::LibraryRepository;
use book_api::application::ports::storage_session::{SessionFactory, StorageSession};
use book_api::application::ports::user_repository::{
    DuplicateEmail, NewUser, UserChanges, UserRepository,
};
use book_api::bootstrap::app_context::{AppContext, AppServices};
use book_api::bootstrap::config::{Config, PasswordScheme};
use book_api::domain::books::book::{Book, LibraryEntry};
use book_api::domain::users::user::{User, UserCredentials};
use book_api::infrastructure::auth::jwt::JwtTokenService;
use book_api::infrastructure::crypto::Sha256PasswordHasher;

pub const SECRET: &str = "integration-test-secret";

#[derive(Default)]
struct Db {
    users: HashMap<Uuid, UserCredentials>,
    books: HashMap<Uuid, Book>,
    library: Vec<(Uuid, Uuid, chrono::DateTime<Utc>)>,
}

/// In-memory store that counts how many sessions were opened and released.
#[derive(Clone, Default)]
pub struct MemoryStore {
    db: Arc<Mutex<Db>>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    refuse_open: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn refuse_sessions(&self) {
        self.refuse_open.store(true, Ordering::SeqCst);
    }

    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        let db = self.db.lock().unwrap();
        db.users
            .values()
            .find(|c| c.user.email == email)
            .map(|c| c.password_hash.clone())
    }
}

#[async_trait]
impl SessionFactory for MemoryStore {
    async fn open(&self) -> anyhow::Result<Box<dyn StorageSession>> {
        if self.refuse_open.load(Ordering::SeqCst) {
            anyhow::bail!("pool exhausted");
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            db: self.db.clone(),
            released: self.released.clone(),
        }))
    }
}

pub struct MemorySession {
    db: Arc<Mutex<Db>>,
    released: Arc<AtomicUsize>,
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageSession for MemorySession {
    async fn ping(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn release(self: Box<Self>) {}
}

#[async_trait]
impl UserRepository for MemorySession {
    async fn create_user(&mut self, user: &NewUser) -> anyhow::Result<User> {
        let mut db = self.db.lock().unwrap();
        if db.users.values().any(|c| c.user.email == user.email) {
            return Err(DuplicateEmail.into());
        }
        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: now,
            updated_at: now,
        };
        db.users.insert(
            row.id,
            UserCredentials {
                user: row.clone(),
                password_hash: user.password_hash().to_string(),
            },
        );
        Ok(row)
    }

    async fn find_by_email(&mut self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let db = self.db.lock().unwrap();
        Ok(db.users.values().find(|c| c.user.email == email).cloned())
    }

    async fn find_by_id(&mut self, id: Uuid) -> anyhow::Result<Option<User>> {
        let db = self.db.lock().unwrap();
        Ok(db.users.get(&id).map(|c| c.user.clone()))
    }

    async fn list_users(&mut self) -> anyhow::Result<Vec<User>> {
        let db = self.db.lock().unwrap();
        let mut users: Vec<User> = db.users.values().map(|c| c.user.clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update_user(
        &mut self,
        id: Uuid,
        changes: &UserChanges,
    ) -> anyhow::Result<Option<User>> {
        let mut db = self.db.lock().unwrap();
        if let Some(email) = &changes.email {
            if db.users.values().any(|c| c.user.email == *email && c.user.id != id) {
                return Err(DuplicateEmail.into());
            }
        }
        let Some(creds) = db.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.email {
            creds.user.email = v.clone();
        }
        if let Some(v) = &changes.first_name {
            creds.user.first_name = v.clone();
        }
        if let Some(v) = &changes.last_name {
            creds.user.last_name = v.clone();
        }
        if let Some(v) = changes.password_hash() {
            creds.password_hash = v.to_string();
        }
        creds.user.updated_at = Utc::now();
        Ok(Some(creds.user.clone()))
    }

    async fn delete_user(&mut self, id: Uuid) -> anyhow::Result<bool> {
        let mut db = self.db.lock().unwrap();
        db.library.retain(|(user_id, _, _)| *user_id != id);
        Ok(db.users.remove(&id).is_some())
    }
}

#[async_trait]
impl BookRepository for MemorySession {
    async fn create_book(&mut self, draft: &BookDraft) -> anyhow::Result<Book> {
        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            isbn: draft.isbn.clone(),
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.db.lock().unwrap().books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_book(&mut self, id: Uuid) -> anyhow::Result<Option<Book>> {
        Ok(self.db.lock().unwrap().books.get(&id).cloned())
    }

    async fn list_books(&mut self, filter: Option<&str>) -> anyhow::Result<Vec<Book>> {
        let db = self.db.lock().unwrap();
        let needle = filter.map(str::to_lowercase);
        let mut books: Vec<Book> = db
            .books
            .values()
            .filter(|b| match &needle {
                Some(n) => {
                    b.title.to_lowercase().contains(n) || b.author.to_lowercase().contains(n)
                }
                None => true,
            })
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn update_book(
        &mut self,
        id: Uuid,
        changes: &BookChanges,
    ) -> anyhow::Result<Option<Book>> {
        let mut db = self.db.lock().unwrap();
        let Some(book) = db.books.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.title {
            book.title = v.clone();
        }
        if let Some(v) = &changes.author {
            book.author = v.clone();
        }
        if let Some(v) = &changes.isbn {
            book.isbn = v.clone();
        }
        if let Some(v) = &changes.description {
            book.description = v.clone();
        }
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete_book(&mut self, id: Uuid) -> anyhow::Result<bool> {
        let mut db = self.db.lock().unwrap();
        db.library.retain(|(_, book_id, _)| *book_id != id);
        Ok(db.books.remove(&id).is_some())
    }
}

#[async_trait]
impl LibraryRepository for MemorySession {
    async fn list_library(&mut self, user_id: Uuid) -> anyhow::Result<Vec<LibraryEntry>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .library
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .filter_map(|(_, b, added_at)| {
                db.books.get(b).map(|book| LibraryEntry {
                    book: book.clone(),
                    added_at: *added_at,
                })
            })
            .collect())
    }

    async fn add_to_library(&mut self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool> {
        let mut db = self.db.lock().unwrap();
        if db
            .library
            .iter()
            .any(|(u, b, _)| *u == user_id && *b == book_id)
        {
            return Ok(false);
        }
        db.library.push((user_id, book_id, Utc::now()));
        Ok(true)
    }

    async fn remove_from_library(
        &mut self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> anyhow::Result<bool> {
        let mut db = self.db.lock().unwrap();
        let before = db.library.len();
        db.library
            .retain(|(u, b, _)| !(*u == user_id && *b == book_id));
        Ok(db.library.len() != before)
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        database_max_connections: 1,
        jwt_secret: SECRET.into(),
        password_scheme: PasswordScheme::Sha256,
        cors_origin: None,
        is_production: false,
    }
}

pub fn context(store: &MemoryStore) -> AppContext {
    let services = AppServices::new(
        Arc::new(store.clone()),
        Arc::new(JwtTokenService::new(SECRET)),
        Arc::new(Sha256PasswordHasher),
    );
    AppContext::new(test_config(), services)
}

pub fn app(store: &MemoryStore) -> NormalizePath<Router> {
    book_api::presentation::http::app(context(store))
}

pub async fn send<S>(app: &S, req: Request<Body>) -> (StatusCode, Value)
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone,
{
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Registers a user and logs in, returning the access token and user body.
pub async fn sign_up<S>(app: &S, email: &str, password: &str) -> (String, Value)
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone,
{
    let (status, user) = send(
        app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": email,
                "password": password,
                "first_name": "Test",
                "last_name": "User"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {user}");

    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["access_token"].as_str().unwrap().to_string();
    (token, user)
}

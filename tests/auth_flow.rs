mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use book_api::application::ports::password_hasher::PasswordHasher;
use book_api::infrastructure::auth::jwt::JwtTokenService;
use book_api::infrastructure::crypto::Sha256PasswordHasher;
use common::{MemoryStore, SECRET, app, request, send, sign_up};

#[tokio::test]
async fn register_login_and_me() {
    let store = MemoryStore::default();
    let app = app(&store);

    let (token, user) = sign_up(&app, "ada@example.com", "analytical").await;
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["first_name"], "Test");
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let (status, me) = send(&app, request("GET", "/api/v1/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user["id"]);
}

#[tokio::test]
async fn login_response_describes_the_token() {
    let store = MemoryStore::default();
    let app = app(&store);
    sign_up(&app, "grace@example.com", "cobol").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "grace@example.com", "password": "cobol" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 86400);
    assert_eq!(body["user"]["email"], "grace@example.com");
}

#[tokio::test]
async fn password_is_stored_as_digest() {
    let store = MemoryStore::default();
    let app = app(&store);
    sign_up(&app, "alan@example.com", "enigma").await;

    let stored = store.password_hash_of("alan@example.com").unwrap();
    assert_ne!(stored, "enigma");
    assert_eq!(stored, Sha256PasswordHasher.hash("enigma").unwrap());
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let store = MemoryStore::default();
    let app = app(&store);
    sign_up(&app, "ada@example.com", "analytical").await;

    for (email, password) in [
        ("ada@example.com", "wrong"),
        ("nobody@example.com", "analytical"),
    ] {
        let (status, body) = send(
            &app,
            request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid email or password" }));
    }
}

#[tokio::test]
async fn duplicate_and_incomplete_registrations() {
    let store = MemoryStore::default();
    let app = app(&store);
    sign_up(&app, "ada@example.com", "analytical").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "ada@example.com",
                "password": "other",
                "first_name": "Ada",
                "last_name": "Byron"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "new@example.com",
                "password": "",
                "first_name": "New",
                "last_name": "User"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "password is required" }));

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "new@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens() {
    let store = MemoryStore::default();
    let app = app(&store);
    let (_, user) = sign_up(&app, "ada@example.com", "analytical").await;
    let user_id = Uuid::parse_str(user["id"].as_str().unwrap()).unwrap();

    let (status, body) = send(&app, request("GET", "/api/v1/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Missing Authorization header" }));

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/auth/me", Some("definitely-not-a-jwt"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Malformed token" }));

    let expired = JwtTokenService::new(SECRET)
        .issue_at(user_id, Utc::now() - Duration::hours(25))
        .unwrap();
    let (status, body) = send(&app, request("GET", "/api/v1/auth/me", Some(&expired), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Token has expired" }));

    let forged = JwtTokenService::new("some-other-secret")
        .issue_at(user_id, Utc::now())
        .unwrap();
    let (status, body) = send(&app, request("GET", "/api/v1/auth/me", Some(&forged), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Signature verification failed" }));
}

#[tokio::test]
async fn profile_update_and_account_removal() {
    let store = MemoryStore::default();
    let app = app(&store);
    let (token, user) = sign_up(&app, "ada@example.com", "analytical").await;
    let (other_token, _) = sign_up(&app, "charles@example.com", "difference").await;
    let path = format!("/api/v1/users/{}", user["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        request("PUT", &path, Some(&other_token), Some(json!({ "first_name": "Eve" }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &path,
            Some(&token),
            Some(json!({ "first_name": "Augusta", "password": "engine" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Augusta");
    assert_eq!(
        store.password_hash_of("ada@example.com").unwrap(),
        Sha256PasswordHasher.hash("engine").unwrap()
    );

    let (status, users) = send(&app, request("GET", "/api/v1/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, request("DELETE", &path, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("GET", &path, Some(&other_token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The token is still validly signed, but it names nobody now.
    let (status, body) = send(&app, request("GET", "/api/v1/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "User no longer exists" }));
}

#[tokio::test]
async fn deleted_account_token_is_refused_everywhere() {
    let store = MemoryStore::default();
    let app = app(&store);
    let (token, user) = sign_up(&app, "ada@example.com", "analytical").await;
    let (status, book) = send(
        &app,
        request(
            "POST",
            "/api/v1/books",
            Some(&token),
            Some(json!({ "title": "Flatland", "author": "Edwin Abbott" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let path = format!("/api/v1/users/{}", user["id"].as_str().unwrap());
    let (status, _) = send(&app, request("DELETE", &path, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let attempts = [
        request(
            "POST",
            "/api/v1/me/books",
            Some(&token),
            Some(json!({ "book_id": book["id"] })),
        ),
        request(
            "POST",
            "/api/v1/books",
            Some(&token),
            Some(json!({ "title": "Sphereland", "author": "Dionys Burger" })),
        ),
        request("GET", "/api/v1/me/books", Some(&token), None),
        request("GET", "/api/v1/users", Some(&token), None),
    ];
    for req in attempts {
        let uri = req.uri().to_string();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body, json!({ "error": "User no longer exists" }), "{uri}");
    }

    let (_, books) = send(&app, request("GET", "/api/v1/books", None, None)).await;
    assert_eq!(books.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fields_wider_than_their_columns_are_rejected() {
    let store = MemoryStore::default();
    let app = app(&store);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "long@example.com",
                "password": "pw",
                "first_name": "N".repeat(200),
                "last_name": "User"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "first_name must be at most 128 characters" }));

    let (token, user) = sign_up(&app, "ada@example.com", "analytical").await;
    let path = format!("/api/v1/users/{}", user["id"].as_str().unwrap());
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &path,
            Some(&token),
            Some(json!({ "email": format!("{}@example.com", "a".repeat(130)) })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn changing_email_to_a_taken_one_conflicts() {
    let store = MemoryStore::default();
    let app = app(&store);
    let (token, user) = sign_up(&app, "ada@example.com", "analytical").await;
    sign_up(&app, "charles@example.com", "difference").await;

    let path = format!("/api/v1/users/{}", user["id"].as_str().unwrap());
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &path,
            Some(&token),
            Some(json!({ "email": "charles@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

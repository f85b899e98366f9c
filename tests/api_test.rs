//! Integration tests for API endpoints.
//!
//! The full router runs against in-memory repositories, so these exercise
//! extractors, middleware, services and error rendering together.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{parse, TestApp, PASSWORD};
use poem_collection::domain::{Poem, Ratings, Review, UserDto, UserRole};
use poem_collection::services::TokenResponse;

// =============================================================================
// Infrastructure Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_without_database_is_degraded() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Poem Collection API");
}

// =============================================================================
// Registration & Login
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({
                "email": "a@b.com",
                "password": PASSWORD,
                "repeatPassword": PASSWORD,
                "firstName": "Emily",
                "lastName": "Dickinson"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let user: UserDto = parse(body.clone());
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.role, UserRole::User);
    assert!(body.get("passwordHash").is_none());

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "a@b.com", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let token: TokenResponse = parse(body);
    assert_eq!(token.token_type, "Bearer");

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/api/v1/users/{}", user.id),
            Some(&token.access_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_mismatched_passwords_creates_nothing() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({
                "email": "a@b.com",
                "password": PASSWORD,
                "repeatPassword": "Str0ng!Pas",
                "firstName": "Emily",
                "lastName": "Dickinson"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Passwords do not match");
    assert!(app.store.lock().users.is_empty());
}

#[tokio::test]
async fn test_register_missing_field_names_it() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({ "email": "a@b.com", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "repeatPassword is required");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    app.seed_user("a@b.com", UserRole::User);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "a@b.com", "password": "nope" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(Method::POST, "/api/v1/auth/login", None, Some(json!("not an object")))
        .await;

    assert_eq!(response.0, StatusCode::BAD_REQUEST);
    assert_eq!(response.1["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Authentication Boundary
// =============================================================================

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/poems",
            None,
            Some(json!({ "title": "Hope", "body": "feathers" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let (status, _) = app
        .request(Method::GET, "/api/v1/users/1", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_deleted_user_is_unauthorized() {
    let app = TestApp::new();
    let user = app.seed_user("gone@b.com", UserRole::User);
    let token = app.token_for(&user);
    app.store.lock().users.clear();

    let (status, _) = app
        .request(Method::GET, "/api/v1/users/1", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_demoted_admin_loses_admin_routes_immediately() {
    let app = TestApp::new();
    let admin = app.seed_user("admin@b.com", UserRole::Admin);
    let token = app.token_for(&admin);
    app.store.lock().users[0].role = UserRole::User;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(json!({ "name": "Nature" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Poems
// =============================================================================

#[tokio::test]
async fn test_create_poem_with_categories() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let nature = app.seed_category("Nature");
    let token = app.token_for(&writer);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/poems",
            Some(&token),
            Some(json!({
                "title": "Hope",
                "body": "is the thing with feathers",
                "categoryIds": [nature.id]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let poem: Poem = parse(body);
    assert_eq!(poem.writer.id, writer.id);
    assert_eq!(poem.categories, vec![nature]);
}

#[tokio::test]
async fn test_create_poem_with_unknown_category_lists_it() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let first = app.seed_category("Nature");
    let second = app.seed_category("Love");
    let token = app.token_for(&writer);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/poems",
            Some(&token),
            Some(json!({
                "title": "Hope",
                "body": "feathers",
                "categoryIds": [first.id, second.id, 999]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "The following categories do not exist: 999"
    );
    assert_eq!(body["error"]["details"]["invalidCategoryIds"], json!([999]));
    assert!(app.store.lock().poems.is_empty());
}

#[tokio::test]
async fn test_stranger_cannot_delete_poem() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let stranger = app.seed_user("s@b.com", UserRole::User);
    let poem_id = app.seed_poem(&writer, &[]);

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/poems/{poem_id}"),
            Some(&app.token_for(&stranger)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/poems/{poem_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_can_update_any_poem() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let admin = app.seed_user("admin@b.com", UserRole::Admin);
    let poem_id = app.seed_poem(&writer, &[]);

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/poems/{poem_id}"),
            Some(&app.token_for(&admin)),
            Some(json!({ "title": "Edited", "body": "by an admin" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let poem: Poem = parse(body);
    assert_eq!(poem.title, "Edited");
    assert_eq!(poem.writer.id, writer.id);
}

#[tokio::test]
async fn test_update_missing_poem_is_not_found() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);

    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/v1/poems/4242",
            Some(&app.token_for(&writer)),
            Some(json!({ "title": "Edited", "body": "text" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let poem_id = app.seed_poem(&writer, &[]);
    let uri = format!("/api/v1/poems/{poem_id}");

    let (status, first) = app.request(Method::GET, &uri, None, None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, second) = app.request(Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_poems_by_category() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let nature = app.seed_category("Nature");
    let tagged = app.seed_poem(&writer, &[nature.id]);
    app.seed_poem(&writer, &[]);

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/poems?categoryId={}", nature.id),
            None,
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let poems: Vec<Poem> = parse(body);
    assert_eq!(poems.len(), 1);
    assert_eq!(poems[0].id, tagged);
}

#[tokio::test]
async fn test_non_numeric_ids_are_bad_requests() {
    let app = TestApp::new();

    let (status, _) = app
        .request(Method::GET, "/api/v1/poems/abc", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unparseable_category_filter_lists_all_poems() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let nature = app.seed_category("Nature");
    app.seed_poem(&writer, &[nature.id]);
    app.seed_poem(&writer, &[]);

    let (status, body) = app
        .request(Method::GET, "/api/v1/poems?categoryId=abc", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let poems: Vec<Poem> = parse(body);
    assert_eq!(poems.len(), 2);
}

// =============================================================================
// Reviews & Ratings
// =============================================================================

#[tokio::test]
async fn test_ratings_average() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let poem_id = app.seed_poem(&writer, &[]);
    for rating in [3, 4, 5] {
        app.seed_review(&writer, poem_id, rating);
    }

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/poems/{poem_id}/ratings"),
            None,
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let ratings: Ratings = parse(body);
    assert_eq!(ratings.total, 3);
    assert!((ratings.average - 4.0).abs() < f64::EPSILON);
    assert_eq!(ratings.five_stars, 1);
}

#[tokio::test]
async fn test_ratings_for_unknown_poem_are_zero() {
    let app = TestApp::new();

    let (status, body) = app
        .request(Method::GET, "/api/v1/poems/42/ratings", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let ratings: Ratings = parse(body);
    assert_eq!(ratings.total, 0);
    assert_eq!(ratings.average, 0.0);
    assert_eq!(ratings.five_stars, 0);
}

#[tokio::test]
async fn test_review_lifecycle() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let reader = app.seed_user("r@b.com", UserRole::User);
    let poem_id = app.seed_poem(&writer, &[]);
    let token = app.token_for(&reader);

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/poems/{poem_id}/reviews"),
            Some(&token),
            Some(json!({ "body": "Lovely", "rating": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let review: Review = parse(body);
    assert_eq!(review.user_id, reader.id);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/reviews/{}", review.id),
            Some(&app.token_for(&writer)),
            Some(json!({ "body": "Hijacked", "rating": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/reviews/{}", review.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.store.lock().reviews.is_empty());
}

#[tokio::test]
async fn test_rating_out_of_range() {
    let app = TestApp::new();
    let writer = app.seed_user("w@b.com", UserRole::User);
    let poem_id = app.seed_poem(&writer, &[]);

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/poems/{poem_id}/reviews"),
            Some(&app.token_for(&writer)),
            Some(json!({ "body": "Too much", "rating": 6 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_mutations_require_admin() {
    let app = TestApp::new();
    let user = app.seed_user("u@b.com", UserRole::User);
    let admin = app.seed_user("admin@b.com", UserRole::Admin);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(&app.token_for(&user)),
            Some(json!({ "name": "Nature" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(&app.token_for(&admin)),
            Some(json!({ "name": "Nature" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(&app.token_for(&admin)),
            Some(json!({ "name": "Nature" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .request(Method::GET, "/api/v1/categories", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_deleting_category_keeps_poems() {
    let app = TestApp::new();
    let admin = app.seed_user("admin@b.com", UserRole::Admin);
    let nature = app.seed_category("Nature");
    let poem_id = app.seed_poem(&admin, &[nature.id]);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/categories/{}", nature.id),
            Some(&app.token_for(&admin)),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(Method::GET, &format!("/api/v1/poems/{poem_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let poem: Poem = parse(body);
    assert!(poem.categories.is_empty());
}

// =============================================================================
// Account Management
// =============================================================================

#[tokio::test]
async fn test_user_cannot_edit_someone_else() {
    let app = TestApp::new();
    let owner = app.seed_user("o@b.com", UserRole::User);
    let other = app.seed_user("x@b.com", UserRole::User);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/users/{}", owner.id),
            Some(&app.token_for(&other)),
            Some(json!({ "firstName": "Mallory" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.lock().users[0].first_name, "Test");
}

#[tokio::test]
async fn test_wrong_old_password_keeps_hash() {
    let app = TestApp::new();
    let user = app.seed_user("u@b.com", UserRole::User);
    let original_hash = user.password_hash.clone();

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/users/{}/password", user.id),
            Some(&app.token_for(&user)),
            Some(json!({
                "oldPassword": "Wrong!Pass1",
                "password": "New!Pass123",
                "repeatPassword": "New!Pass123"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Old password is incorrect");
    assert_eq!(app.store.lock().users[0].password_hash, original_hash);
}

#[tokio::test]
async fn test_deleting_account_removes_its_poems() {
    let app = TestApp::new();
    let user = app.seed_user("u@b.com", UserRole::User);
    let poem_id = app.seed_poem(&user, &[]);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/users/{}", user.id),
            Some(&app.token_for(&user)),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/poems/{poem_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

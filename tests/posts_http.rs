//! Posts HTTP Contract Tests
//!
//! Drives the full router against a SQLite database file:
//! - Listing an empty table returns an empty array
//! - Create then read returns exactly the submitted fields
//! - Missing or empty create fields are rejected with 400
//! - Unknown identifiers yield 404 for read, update and delete
//! - Empty updates are rejected without side effects
//! - Partial updates touch only the named fields
//! - Storage failures and an unconfigured database yield 500

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use posts_api::db::{Database, DatabaseConfig};
use posts_api::http_server::{HttpServer, HttpServerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

const CREATE_TABLE_SQL: &str = "CREATE TABLE posts (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    title TEXT NOT NULL, \
    body TEXT NOT NULL, \
    image TEXT NOT NULL)";

struct TestApp {
    _tmp: TempDir,
    db: Database,
    router: Router,
}

async fn setup_app() -> TestApp {
    let tmp = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", tmp.path().join("posts.db").display());
    let config = DatabaseConfig {
        max_connections: 4,
        ..DatabaseConfig::with_url(url)
    };

    let db = Database::connect(&config).await.unwrap();
    sqlx::query(CREATE_TABLE_SQL).execute(db.pool().unwrap()).await.unwrap();

    let router = HttpServer::new(HttpServerConfig::default(), db.clone()).router();
    TestApp {
        _tmp: tmp,
        db,
        router,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(&self, title: &str, body: &str, image: &str) -> i64 {
        let (status, value) = self
            .send(
                Method::POST,
                "/posts/",
                Some(json!({"title": title, "body": body, "image": image})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        value["id"].as_i64().unwrap()
    }

    async fn row_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.db.pool().unwrap())
            .await
            .unwrap();
        count
    }
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_empty_table_returns_empty_array() {
    let app = setup_app().await;

    let (status, value) = app.send(Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_list_returns_every_row() {
    let app = setup_app().await;
    let first = app.create("A", "B", "C").await;
    let second = app.create("D", "E", "F").await;

    let (status, value) = app.send(Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut ids: Vec<i64> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![first, second]);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_then_read_back() {
    let app = setup_app().await;

    for (title, body, image) in [
        ("A", "B", "C"),
        ("Hello", "World with spaces", "https://example.com/x.png"),
        ("ünïcødé", "línea\nnueva", "/static/img.jpg"),
    ] {
        let id = app.create(title, body, image).await;
        let (status, value) = app.send(Method::GET, &format!("/posts/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            value,
            json!({"id": id, "title": title, "body": body, "image": image})
        );
    }
}

#[tokio::test]
async fn test_create_response_shape() {
    let app = setup_app().await;

    let (status, value) = app
        .send(
            Method::POST,
            "/posts/",
            Some(json!({"title": "A", "body": "B", "image": "C"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(value["message"].is_string());
    assert!(value["id"].is_i64());
}

#[tokio::test]
async fn test_create_without_trailing_slash() {
    let app = setup_app().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/posts",
            Some(json!({"title": "A", "body": "B", "image": "C"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_created_id_matches_stored_row() {
    let app = setup_app().await;
    let first = app.create("A", "B", "C").await;
    let second = app.create("D", "E", "F").await;
    assert_eq!(second, first + 1);

    let (max,): (i64,) = sqlx::query_as("SELECT MAX(id) FROM posts")
        .fetch_one(app.db.pool().unwrap())
        .await
        .unwrap();
    assert_eq!(max, second);

    let (_, value) = app.send(Method::GET, &format!("/posts/{}", second), None).await;
    assert_eq!(value["title"], "D");
}

#[tokio::test]
async fn test_create_rejects_empty_or_missing_fields() {
    let app = setup_app().await;

    for payload in [
        json!({"title": "", "body": "B", "image": "C"}),
        json!({"title": "A", "body": "", "image": "C"}),
        json!({"title": "A", "body": "B", "image": ""}),
        json!({"title": "A", "body": "B"}),
        json!({}),
    ] {
        let (status, value) = app.send(Method::POST, "/posts/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["detail"], "all fields required");
    }

    assert_eq!(app.row_count().await, 0);
}

#[tokio::test]
async fn test_create_rejects_wrong_types() {
    let app = setup_app().await;

    let (status, value) = app
        .send(
            Method::POST,
            "/posts/",
            Some(json!({"title": 1, "body": "B", "image": "C"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["detail"].is_string());
    assert_eq!(value["code"], 400);
    assert_eq!(app.row_count().await, 0);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_read_unknown_id_is_not_found() {
    let app = setup_app().await;
    app.create("A", "B", "C").await;

    let (status, value) = app.send(Method::GET, "/posts/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["detail"], "post not found");
}

#[tokio::test]
async fn test_non_integer_id_is_rejected() {
    let app = setup_app().await;

    let (status, _) = app.send(Method::GET, "/posts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_empty_update_is_rejected_without_side_effects() {
    let app = setup_app().await;
    let id = app.create("A", "B", "C").await;

    for payload in [json!({}), json!({"title": null})] {
        let (status, value) = app
            .send(Method::PUT, &format!("/posts/{}", id), Some(payload))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["detail"], "no data to update");
    }

    // Rejected before storage: even an unknown id reports validation
    let (status, _) = app
        .send(Method::PUT, "/posts/9999", Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, value) = app.send(Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(value, json!({"id": id, "title": "A", "body": "B", "image": "C"}));
}

#[tokio::test]
async fn test_partial_update_changes_only_named_fields() {
    let app = setup_app().await;
    let id = app.create("A", "B", "C").await;
    let other = app.create("X", "Y", "Z").await;

    let (status, value) = app
        .send(
            Method::PUT,
            &format!("/posts/{}", id),
            Some(json!({"body": "B2", "image": "C2"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(value["message"].is_string());

    let (_, value) = app.send(Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(value, json!({"id": id, "title": "A", "body": "B2", "image": "C2"}));

    let (_, value) = app.send(Method::GET, &format!("/posts/{}", other), None).await;
    assert_eq!(value, json!({"id": other, "title": "X", "body": "Y", "image": "Z"}));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = setup_app().await;
    let id = app.create("A", "B", "C").await;

    let (status, _) = app
        .send(Method::PUT, "/posts/9999", Some(json!({"title": "T"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(app.row_count().await, 1);
    let (_, value) = app.send(Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(value["title"], "A");
}

#[tokio::test]
async fn test_update_to_same_value_succeeds() {
    let app = setup_app().await;
    let id = app.create("A", "B", "C").await;

    let (status, _) = app
        .send(Method::PUT, &format!("/posts/{}", id), Some(json!({"title": "A"})))
        .await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_removes_exactly_one_row() {
    let app = setup_app().await;
    let id = app.create("A", "B", "C").await;
    let other = app.create("D", "E", "F").await;

    let (status, value) = app.send(Method::DELETE, &format!("/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(value["message"].is_string());

    let (status, _) = app.send(Method::GET, &format!("/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::GET, &format!("/posts/{}", other), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.row_count().await, 1);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let app = setup_app().await;
    app.create("A", "B", "C").await;

    let (status, value) = app.send(Method::DELETE, "/posts/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["code"], 404);
    assert_eq!(app.row_count().await, 1);
}

// =============================================================================
// Storage failures and full lifecycle
// =============================================================================

#[tokio::test]
async fn test_storage_failure_maps_to_500() {
    let app = setup_app().await;
    sqlx::query("DROP TABLE posts").execute(app.db.pool().unwrap()).await.unwrap();

    let (status, value) = app.send(Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["code"], 500);

    let (status, _) = app.send(Method::DELETE, "/posts/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = app
        .send(
            Method::POST,
            "/posts/",
            Some(json!({"title": "A", "body": "B", "image": "C"})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, value) = app
        .send(Method::PUT, "/posts/1", Some(json!({"title": "A2"})))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["code"], 500);
}

#[tokio::test]
async fn test_unconfigured_database_keeps_serving() {
    let db = Database::connect_lazy(&DatabaseConfig::from_lookup(|_| None));
    assert!(!db.is_available());
    let router = HttpServer::new(HttpServerConfig::default(), db.clone()).router();
    let app = TestApp {
        _tmp: TempDir::new().unwrap(),
        db,
        router,
    };

    let (status, value) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["status"], "ok");

    let (status, value) = app.send(Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["code"], 500);

    let (status, _) = app
        .send(Method::PUT, "/posts/1", Some(json!({"title": "A2"})))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, value) = app.send(Method::POST, "/posts/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["detail"], "all fields required");
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;

    let (status, value) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["status"], "ok");
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = setup_app().await;

    let (status, created) = app
        .send(
            Method::POST,
            "/posts/",
            Some(json!({"title": "A", "body": "B", "image": "C"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    let path = format!("/posts/{}", id);

    let (_, value) = app.send(Method::GET, &path, None).await;
    assert_eq!(value, json!({"id": id, "title": "A", "body": "B", "image": "C"}));

    let (status, _) = app.send(Method::PUT, &path, Some(json!({"title": "A2"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, value) = app.send(Method::GET, &path, None).await;
    assert_eq!(value, json!({"id": id, "title": "A2", "body": "B", "image": "C"}));

    let (status, _) = app.send(Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::GET, &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_creates_release_connections() {
    let app = setup_app().await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let router = app.router.clone();
        tasks.push(tokio::spawn(async move {
            let body = json!({"title": format!("t{}", i), "body": "b", "image": "i"});
            let request = Request::builder()
                .method(Method::POST)
                .uri("/posts/")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            router.oneshot(request).await.unwrap().status()
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(app.row_count().await, 16);
}

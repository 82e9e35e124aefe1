use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{db, routes, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app(dir: &TempDir) -> Router {
    let connection_string = dir.path().join("test.sqlite").to_string_lossy().into_owned();
    db::run_migrations(&connection_string).unwrap();
    let pool = db::create_pool(&connection_string).unwrap();
    routes::router(AppState { pool }, dir.path())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) =
        post_json(app, "/api/exercise/new-user", json!({ "username": username })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], username);
    body["_id"].as_str().expect("_id should be a string").to_owned()
}

#[tokio::test]
async fn registration_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let first = register(&app, "alice").await;
    let second = register(&app, "alice").await;
    assert_eq!(first, second);

    let (status, body) = get(&app, "/api/exercise/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "username": "alice", "_id": first }]));
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let alice = register(&app, "alice").await;
    let alice_caps = register(&app, "Alice").await;
    assert_ne!(alice, alice_caps);

    let (_, body) = get(&app, "/api/exercise/users").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_store_lists_no_users() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = get(&app, "/api/exercise/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn add_normalizes_the_date() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let id = register(&app, "alice").await;

    let (status, body) = post_json(
        &app,
        "/api/exercise/add",
        json!({
            "userId": id,
            "description": "run",
            "duration": 30,
            "date": "2023-1-5",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "username": "alice",
            "_id": id,
            "description": "run",
            "duration": 30,
            "date": "Thu Jan 05 2023",
        })
    );
}

#[tokio::test]
async fn add_falls_back_to_today_for_missing_or_invalid_dates() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let id = register(&app, "alice").await;
    let today = chrono::Utc::now().date_naive().format("%a %b %d %Y").to_string();

    let (status, body) = post_json(
        &app,
        "/api/exercise/add",
        json!({ "userId": id, "description": "walk", "duration": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], today);

    let (status, body) = post_json(
        &app,
        "/api/exercise/add",
        json!({
            "userId": id,
            "description": "swim",
            "duration": 20,
            "date": "not-a-date",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], today);
}

#[tokio::test]
async fn add_rejects_bad_durations() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let id = register(&app, "alice").await;

    for duration in [json!("abc"), json!(0), json!(-5), json!(30.5)] {
        let (status, body) = post_json(
            &app,
            "/api/exercise/add",
            json!({ "userId": id, "description": "run", "duration": duration }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "duration {duration} should be rejected");
        assert!(body["error"].is_string());
    }

    // Nothing was appended
    let (status, body) = get(&app, &format!("/api/exercise/log?userId={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn add_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    register(&app, "alice").await;

    for user_id in ["00000000-0000-0000-0000-000000000000", "not-a-uuid"] {
        let (status, _) = post_json(
            &app,
            "/api/exercise/add",
            json!({ "userId": user_id, "description": "run", "duration": 30 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn log_filters_and_counts() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let id = register(&app, "alice").await;

    for (description, date) in
        [("run", "2023-01-05"), ("swim", "2023-02-10"), ("walk", "2023-01-20")]
    {
        let (status, _) = post_json(
            &app,
            "/api/exercise/add",
            json!({ "userId": id, "description": description, "duration": 30, "date": date }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Unfiltered: everything, in submission order
    let (status, body) = get(&app, &format!("/api/exercise/log?userId={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["count"], 3);
    let descriptions: Vec<_> = body["log"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["description"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(descriptions, ["run", "swim", "walk"]);

    // January only, inclusive bounds
    let (status, body) = get(
        &app,
        &format!("/api/exercise/log?userId={id}&from=2023-01-01&to=2023-01-31"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["log"][0]["description"], "run");
    assert_eq!(body["log"][0]["date"], "Thu Jan 05 2023");
    assert_eq!(body["log"][1]["description"], "walk");

    // Limit applies after filtering
    let (status, body) = get(
        &app,
        &format!("/api/exercise/log?userId={id}&from=2023-01-06&limit=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["log"][0]["description"], "swim");
}

#[tokio::test]
async fn log_rejects_invalid_bounds() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let id = register(&app, "alice").await;

    for query in ["from=2023-13-01", "to=junk", "from=2023-02-30"] {
        let (status, body) =
            get(&app, &format!("/api/exercise/log?userId={id}&{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query} should be rejected");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn log_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) =
        get(&app, "/api/exercise/log?userId=00000000-0000-0000-0000-000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn form_encoded_bodies_are_accepted() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = post_form(&app, "/api/exercise/new-user", "username=bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");
    let id = body["_id"].as_str().unwrap().to_owned();

    let (status, body) = post_form(
        &app,
        "/api/exercise/add",
        &format!("userId={id}&description=row&duration=25&date=2023-01-05"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "row");
    assert_eq!(body["duration"], 25);
    assert_eq!(body["date"], "Thu Jan 05 2023");
}

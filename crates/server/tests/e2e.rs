use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::{build_router, AppState};
use service::media::mock::StaticUploader;

struct TestApp {
    base_url: String,
    db: DatabaseConnection,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let state = AppState::new(db.clone(), Arc::new(StaticUploader::default()));
    let app = build_router(state, 50 * 1024 * 1024);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum_serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, db })
}

async fn axum_serve(listener: TcpListener, app: axum::Router) -> anyhow::Result<()> {
    server::startup::serve(listener, app, std::future::pending()).await
}

async fn register(c: &reqwest::Client, app: &TestApp, email: &str) -> anyhow::Result<Value> {
    let res = c.post(app.url("/api/v1/users"))
        .json(&json!({"name": "Owner", "email": email, "avatar": "https://img.test/a.png"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json().await?)
}

async fn create_property(c: &reqwest::Client, app: &TestApp, email: &str, title: &str, kind: &str) -> anyhow::Result<reqwest::Response> {
    Ok(c.post(app.url("/api/v1/properties"))
        .json(&json!({
            "title": title,
            "description": "Quiet and bright",
            "propertyType": kind,
            "location": "North shore",
            "price": 120000,
            "photo": "data:image/png;base64,iVBORw0KGgo=",
            "email": email,
        }))
        .send().await?)
}

#[tokio::test]
async fn e2e_public_health_and_welcome() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");

    let res = c.get(app.url("/")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.json::<Value>().await?["message"].is_string());

    let res = c.get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.json::<Value>().await?["paths"]["/api/v1/properties"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_create_then_detail_shows_creator() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let owner = register(&c, &app, "owner@example.com").await?;

    let res = create_property(&c, &app, "owner@example.com", "Lake house", "House").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<Value>().await?;
    let id = created["_id"].as_str().expect("id").to_string();
    assert_eq!(created["creator"], owner["_id"]);
    assert_eq!(created["photo"], "https://media.test/photos/1.jpg");

    let detail = c.get(app.url(&format!("/api/v1/properties/{id}"))).send().await?;
    assert_eq!(detail.status(), HttpStatusCode::OK);
    let detail = detail.json::<Value>().await?;
    assert_eq!(detail["creator"]["email"], "owner@example.com");
    assert_eq!(detail["creator"]["allProperties"], json!([id]));
    assert_eq!(detail["propertyType"], "House");

    let user = c.get(app.url(&format!("/api/v1/users/{}", owner["_id"].as_str().expect("id")))).send().await?;
    assert_eq!(user.status(), HttpStatusCode::OK);
    let user = user.json::<Value>().await?;
    assert_eq!(user["allProperties"][0]["title"], "Lake house");
    Ok(())
}

#[tokio::test]
async fn e2e_create_for_unknown_owner_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = create_property(&c, &app, "ghost@example.com", "Nope", "House").await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.json::<Value>().await?["message"].is_string());

    let list = c.get(app.url("/api/v1/properties")).send().await?;
    assert_eq!(list.headers()["x-total-count"], "0");
    Ok(())
}

#[tokio::test]
async fn e2e_create_store_failure_is_generic_500() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    register(&c, &app, "broken@example.com").await?;
    app.db
        .execute_unprepared(
            "CREATE TRIGGER reject_owner_update BEFORE UPDATE ON \"user\" \
             BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
        )
        .await?;

    let res = create_property(&c, &app, "broken@example.com", "Lake house", "House").await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Failed to create property, please try again later");

    let list = c.get(app.url("/api/v1/properties")).send().await?;
    assert_eq!(list.headers()["x-total-count"], "0");
    Ok(())
}

#[tokio::test]
async fn e2e_list_filters_and_reports_total() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    register(&c, &app, "owner@example.com").await?;
    for (title, kind) in [("Lake view", "House"), ("Big lake", "House"), ("Lake flat", "Apartment"), ("Hilltop", "House")] {
        let res = create_property(&c, &app, "owner@example.com", title, kind).await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    let res = c.get(app.url("/api/v1/properties?propertyType=House&title_like=LAKE&_start=0&_end=1&_sort=title&_order=asc"))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["x-total-count"], "2");
    let items = res.json::<Vec<Value>>().await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Big lake");

    let res = c.get(app.url("/api/v1/properties?_start=18446744073709551615&_end=18446744073709551615")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["x-total-count"], "4");
    assert!(res.json::<Vec<Value>>().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_update_keeps_photo_and_delete_unlinks() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let owner = register(&c, &app, "owner@example.com").await?;
    let created = create_property(&c, &app, "owner@example.com", "Old", "House").await?.json::<Value>().await?;
    let id = created["_id"].as_str().expect("id").to_string();

    let res = c.patch(app.url(&format!("/api/v1/properties/{id}")))
        .json(&json!({"title": "New", "price": 99.5}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["title"], "New");
    assert_eq!(updated["photo"], created["photo"]);

    let res = c.delete(app.url(&format!("/api/v1/properties/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Property deleted successfully");

    let res = c.get(app.url(&format!("/api/v1/properties/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let user = c.get(app.url(&format!("/api/v1/users/{}", owner["_id"].as_str().expect("id")))).send().await?
        .json::<Value>().await?;
    assert_eq!(user["allProperties"], json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_and_malformed_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let missing = Uuid::new_v4();

    let res = c.delete(app.url(&format!("/api/v1/properties/{missing}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.put(app.url(&format!("/api/v1/properties/{missing}"))).json(&json!({"title": "x"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(app.url("/api/v1/properties/not-a-uuid")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_register_is_idempotent_per_email() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let first = register(&c, &app, "same@example.com").await?;
    let second = register(&c, &app, "same@example.com").await?;
    assert_eq!(first["_id"], second["_id"]);

    let users = c.get(app.url("/api/v1/users")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(users.len(), 1);
    Ok(())
}

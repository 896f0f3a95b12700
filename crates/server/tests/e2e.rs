use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use service::product::repo::{InMemoryProductRepository, JsonFileProductRepository};
use service::ProductRepository;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, state::ServerState};

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn products(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    fn product(&self, id: &str) -> String {
        format!("{}/api/products/{}", self.base_url, id)
    }
}

async fn start_server_with(repo: Arc<dyn ProductRepository>) -> anyhow::Result<TestApp> {
    common::utils::logging::init_logging_default();

    let app: Router = routes::build_router(ServerState::new(repo), cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(Arc::new(InMemoryProductRepository::new())).await
}

fn dec(v: &serde_json::Value) -> Decimal {
    Decimal::from_str(v.as_str().expect("price as string")).expect("decimal")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_product_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // Create
    let res = c
        .post(app.products())
        .json(&json!({"name": "Widget", "price": 9.99, "stock": 5}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().expect("id").to_string();
    assert!(Uuid::parse_str(&id).is_ok());

    // Read back
    let res = c.get(app.product(&id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["name"], "Widget");
    assert_eq!(dec(&fetched["price"]), Decimal::from_str("9.99")?);
    assert_eq!(fetched["stock"], 5);

    // Replace
    let res = c
        .put(app.product(&id))
        .json(&json!({"name": "Widget", "price": "12.50", "stock": 3}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(dec(&updated["price"]), Decimal::from_str("12.50")?);
    assert_eq!(updated["stock"], 3);

    // Delete
    let res = c.delete(app.product(&id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], routes::products::DELETED_MESSAGE);

    // Gone
    let res = c.get(app.product(&id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_create_leaves_list_unchanged() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    c.post(app.products())
        .json(&json!({"name": "Existing", "price": 1, "stock": 1}))
        .send()
        .await?;
    let before = c
        .get(app.products())
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;

    let res = c
        .post(app.products())
        .json(&json!({"name": "", "price": 1, "stock": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["details"][0]["message"], "name required");

    let after = c
        .get(app.products())
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(before.len(), after.len());
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_update_does_not_mutate() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let created = c
        .post(app.products())
        .json(&json!({"name": "Widget", "price": "2.00", "stock": 4}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = created["id"].as_str().expect("id").to_string();

    let res = c
        .put(app.product(&id))
        .json(&json!({"name": "Widget", "price": "-5", "stock": -1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let fetched = c
        .get(app.product(&id))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn e2e_file_backend_persists_across_restart() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("e2e_products_{}.json", Uuid::new_v4()));
    let c = reqwest::Client::new();

    let first = start_server_with(Arc::new(JsonFileProductRepository::open(&path).await?)).await?;
    let created = c
        .post(first.products())
        .json(&json!({"name": "Durable", "price": "3.25", "stock": 8}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = created["id"].as_str().expect("id").to_string();

    let second = start_server_with(Arc::new(JsonFileProductRepository::open(&path).await?)).await?;
    let res = c.get(second.product(&id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["name"], "Durable");

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

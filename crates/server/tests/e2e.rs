use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::{http::HeaderMap, routing::post, Json, Router};
use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
}

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gift_e2e_{tag}_{}", Uuid::new_v4()))
}

fn memory_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::Memory;
    cfg.storage.data_dir = scratch_dir("data").to_string_lossy().to_string();
    cfg.server.frontend_dir = scratch_dir("frontend").to_string_lossy().to_string();
    cfg.search.api_key = None;
    cfg
}

async fn serve(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

async fn start_server(cfg: AppConfig) -> anyhow::Result<TestApp> {
    let app = server::build_app(&cfg).await?;
    Ok(TestApp { base_url: serve(app).await? })
}

async fn fake_exa(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let key = headers.get("x-api-key").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    Json(json!({
        "requestId": "r-1",
        "key": key,
        "query": body["query"],
        "numResults": body["numResults"],
        "results": [{"title": "Cozy socks", "url": "https://example.com/socks"}],
    }))
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(memory_config()).await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_add_update_delete_scenario() -> anyhow::Result<()> {
    let app = start_server(memory_config()).await?;
    let c = client();
    let gifts = format!("{}/gifts", app.base_url);

    let res = c.get(&gifts).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let res = c.post(&gifts).json(&json!({"id": "1", "name": "Alice", "gift": "Book"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": "1", "name": "Alice", "gift": "Book", "purchased": false}));

    let res = c.get(&gifts).send().await?;
    assert_eq!(
        res.json::<Value>().await?,
        json!([{"id": "1", "name": "Alice", "gift": "Book", "purchased": false}])
    );

    let res = c.put(format!("{gifts}/1")).json(&json!({"purchased": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": "1", "name": "Alice", "gift": "Book", "purchased": true}));

    let res = c.delete(format!("{gifts}/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Gift item deleted"}));

    let res = c.get(&gifts).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_add_is_400_with_details_and_no_write() -> anyhow::Result<()> {
    let app = start_server(memory_config()).await?;
    let c = client();
    let gifts = format!("{}/gifts", app.base_url);

    let res = c.post(&gifts).json(&json!({"id": "1", "name": "", "gift": "Book"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Invalid gift item");
    assert_eq!(body["details"][0]["field"], "name");
    assert_eq!(body["details"][0]["message"], "Name is required");

    let res = c.post(&gifts).json(&json!({"id": 1, "name": "A", "gift": "B"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["details"][0]["code"], "invalid_type");

    let res = c.get(&gifts).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_update_errors() -> anyhow::Result<()> {
    let app = start_server(memory_config()).await?;
    let c = client();
    let gifts = format!("{}/gifts", app.base_url);

    let res = c.put(format!("{gifts}/ghost")).json(&json!({"purchased": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"error": "Gift not found"}));

    // an unknown id is reported before a malformed body
    let res = c
        .put(format!("{gifts}/ghost"))
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Gift not found"}));

    let res = c.put(format!("{gifts}/")).json(&json!({"purchased": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Gift ID is required");

    c.post(&gifts).json(&json!({"id": "1", "name": "Alice", "gift": "Book"})).send().await?;
    let res = c.put(format!("{gifts}/1")).json(&json!({"gift": ""})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Invalid gift update");
    assert_eq!(body["details"][0]["message"], "Gift description is required");

    let res = c
        .put(format!("{gifts}/1"))
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Invalid JSON body");
    assert!(body["details"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_delete_is_idempotent_and_requires_id() -> anyhow::Result<()> {
    let app = start_server(memory_config()).await?;
    let c = client();
    let gifts = format!("{}/gifts", app.base_url);

    let res = c.delete(format!("{gifts}/never-existed")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Gift item deleted");

    let res = c.delete(format!("{gifts}/")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Gift ID is required"}));
    Ok(())
}

#[tokio::test]
async fn e2e_storage_failure_is_500() -> anyhow::Result<()> {
    let mut cfg = memory_config();
    let data_dir = scratch_dir("failing");
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.data_dir = data_dir.to_string_lossy().to_string();
    let app = start_server(cfg).await?;

    // pull the directory out from under the open store
    tokio::fs::remove_dir_all(&data_dir).await?;

    let res = client()
        .post(format!("{}/gifts", app.base_url))
        .json(&json!({"id": "1", "name": "Alice", "gift": "Book"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Internal Server Error"}));

    let res = client().get(format!("{}/gifts", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_file_backend_persists_between_servers() -> anyhow::Result<()> {
    let mut cfg = memory_config();
    let data_dir = scratch_dir("persist");
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.data_dir = data_dir.to_string_lossy().to_string();
    cfg.storage.list_name = "family".into();

    let first = start_server(cfg.clone()).await?;
    client()
        .post(format!("{}/gifts", first.base_url))
        .json(&json!({"id": "1", "name": "Alice", "gift": "Book"}))
        .send()
        .await?;
    assert!(tokio::fs::metadata(data_dir.join("family.json")).await.is_ok());

    let second = start_server(cfg).await?;
    let res = client().get(format!("{}/gifts", second.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?[0]["name"], "Alice");

    let _ = tokio::fs::remove_dir_all(&data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_search_without_key_is_500() -> anyhow::Result<()> {
    let app = start_server(memory_config()).await?;
    let res = client().get(format!("{}/search/socks", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Missing API key"}));
    Ok(())
}

#[tokio::test]
async fn e2e_search_wraps_upstream_result() -> anyhow::Result<()> {
    let upstream = serve(Router::new().route("/search", post(fake_exa))).await?;
    let mut cfg = memory_config();
    cfg.search.base_url = upstream;
    cfg.search.api_key = Some("secret".into());
    cfg.search.num_results = 3;
    let app = start_server(cfg).await?;

    let res = client().get(format!("{}/search/gifts%20for%20dad", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["result"]["query"], "gifts for dad");
    assert_eq!(body["result"]["numResults"], 3);
    assert_eq!(body["result"]["key"], "secret");
    assert_eq!(body["result"]["results"][0]["title"], "Cozy socks");
    Ok(())
}

#[tokio::test]
async fn e2e_search_upstream_down_is_500_with_details() -> anyhow::Result<()> {
    let mut cfg = memory_config();
    // nothing listens on the discard port
    cfg.search.base_url = "http://127.0.0.1:9".into();
    cfg.search.api_key = Some("secret".into());
    cfg.search.timeout_secs = 2;
    let app = start_server(cfg).await?;

    let res = client().get(format!("{}/search/socks", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Search failed");
    assert!(body["details"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_static_fallback_and_metrics() -> anyhow::Result<()> {
    let mut cfg = memory_config();
    let frontend = scratch_dir("static");
    tokio::fs::create_dir_all(&frontend).await?;
    tokio::fs::write(frontend.join("index.html"), "<h1>Holiday Gift List</h1>").await?;
    cfg.server.frontend_dir = frontend.to_string_lossy().to_string();
    let app = start_server(cfg).await?;
    let c = client();

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.contains("Holiday Gift List"));

    c.get(format!("{}/gifts", app.base_url)).send().await?;
    let res = c.get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.contains("gift_list_operations_total"));

    let _ = tokio::fs::remove_dir_all(&frontend).await;
    Ok(())
}

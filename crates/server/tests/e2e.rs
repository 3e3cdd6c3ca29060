use std::net::SocketAddr;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use uuid::Uuid;

use configs::{AppConfig, StoreBackend};

struct TestApp {
    base_url: String,
}

/// Full server over Postgres; `None` when no database is available.
async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Ok(None);
    }

    let root = std::env::temp_dir().join(format!("pets_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StoreBackend::Postgres;
    cfg.storage.blob_root = root.join("public").join("pets").display().to_string();
    cfg.database.min_connections = 1;
    cfg.database.max_connections = 5;
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(Some(TestApp { base_url }))
}

fn pet_form(name: &str, breed: &str, file_name: &str) -> anyhow::Result<Form> {
    let image = Part::bytes(b"\x89PNG".to_vec()).file_name(file_name.to_string()).mime_str("image/png")?;
    Ok(Form::new()
        .text("petname", name.to_string())
        .text("pettype", "Dog")
        .text("petbreed", breed.to_string())
        .text("petage", "2")
        .text("location", "Porto")
        .part("image", image))
}

#[tokio::test]
async fn e2e_pet_lifecycle_over_postgres() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = reqwest::Client::new();
    let marker = Uuid::new_v4().simple().to_string();

    // Create
    let res = c
        .post(format!("{}/pets", app.base_url))
        .multipart(pet_form(&format!("Rex{marker}"), "Labrador", "rex.png")?)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: serde_json::Value = res.json().await?;
    assert_eq!(created["status"], "available");
    let id = created["_id"].as_str().unwrap().to_string();

    // Search by the unique marker, upper-cased
    let hits: serde_json::Value = c
        .get(format!("{}/pets/search/{}", app.base_url, marker.to_uppercase()))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    // Update: empty name ignored, location changed
    let res = c
        .put(format!("{}/pets/{}", app.base_url, id))
        .multipart(Form::new().text("petname", "").text("location", "Braga"))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: serde_json::Value = res.json().await?;
    assert_eq!(updated["petname"], format!("Rex{marker}"));
    assert_eq!(updated["location"], "Braga");

    // Delete twice
    let res = c.delete(format!("{}/pets/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(format!("{}/pets/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, serde_json::Value::Null);
    Ok(())
}

#[tokio::test]
async fn e2e_update_unknown_pet_is_404() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = reqwest::Client::new()
        .put(format!("{}/pets/{}", app.base_url, Uuid::new_v4()))
        .multipart(Form::new().text("petname", "Ghost"))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

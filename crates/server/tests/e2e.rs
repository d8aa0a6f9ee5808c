//! End-to-end checks against a live server and a real database.
//! Skipped unless `DATABASE_URL` is set (and `SKIP_DB_TESTS` is not).

use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::domain::ROLE_ADMIN;
use service::users::service::NewUser;
use tokio::net::TcpListener;
use tokio::sync::OnceCell;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{build_router, ServerState};

// Migrations run once per test binary
static MIGRATED: OnceCell<()> = OnceCell::const_new();

struct TestApp {
    base_url: String,
    admin: (String, String),
}

async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing or SKIP_DB_TESTS set; skipping e2e tests");
        return Ok(None);
    }

    let db = models::db::connect().await?;
    MIGRATED
        .get_or_try_init(|| async { migration::Migrator::up(&db, None).await })
        .await?;

    let state = ServerState::from_db(db);
    let admin = (format!("admin_{}", Uuid::new_v4().simple()), "admin-pass".to_string());
    state
        .users
        .create_user(NewUser { name: admin.0.clone(), password: admin.1.clone(), role: ROLE_ADMIN.into() })
        .await?;

    let app: Router = build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(Some(TestApp { base_url: format!("http://{addr}"), admin }))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_film_and_actor_lifecycle() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = reqwest::Client::new();
    let (user, pass) = (&app.admin.0, &app.admin.1);

    let res = c
        .post(format!("{}/films", app.base_url))
        .basic_auth(user, Some(pass))
        .json(&json!({"name": "Solaris", "description": "d", "date": "1972-03-20", "rating": 8.1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let film_id = res.json::<Value>().await?["id"].as_str().unwrap_or_default().to_string();

    let res = c
        .post(format!("{}/actors", app.base_url))
        .basic_auth(user, Some(pass))
        .json(&json!({
            "name": "Донатас",
            "second_name": "Банионис",
            "sex": "Мужчина",
            "date_of_birth": "1924-04-28",
            "films": [film_id]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let actor_id = res.json::<Value>().await?["id"].as_str().unwrap_or_default().to_string();

    let res = c
        .get(format!("{}/films/{film_id}", app.base_url))
        .basic_auth(user, Some(pass))
        .send()
        .await?;
    let film = res.json::<Value>().await?;
    assert_eq!(film["actors"][0]["id"], actor_id.as_str());

    let res = c
        .patch(format!("{}/films/{film_id}", app.base_url))
        .basic_auth(user, Some(pass))
        .json(&json!({"rating": 9.0, "actors_to_del": [actor_id]}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let film = res.json::<Value>().await?;
    assert_eq!(film["rating"], 9.0);
    assert!(film["actors"].as_array().map(|a| a.is_empty()).unwrap_or(false));

    for path in [format!("/films/{film_id}"), format!("/actors/{actor_id}")] {
        let res = c.delete(format!("{}{path}", app.base_url)).basic_auth(user, Some(pass)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
        let res = c.delete(format!("{}{path}", app.base_url)).basic_auth(user, Some(pass)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_protected_without_credentials_denied() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = reqwest::get(format!("{}/actors", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key("www-authenticate"));
    Ok(())
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use server::startup;

async fn build_app() -> anyhow::Result<Router> {
    let mut cfg = AppConfig::default();
    let db_path = std::env::temp_dir().join(format!("cafe-router-{}.db", Uuid::new_v4()));
    cfg.database.url = format!("sqlite://{}?mode=rwc", db_path.display());
    cfg.server.static_dir = "/nonexistent-static-dir".into();
    let state = startup::prepare_state(&cfg.database, "router-secret").await?;
    Ok(startup::build_app(&cfg, state))
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, body))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn empty_store_responses() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, get("/all")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cafes"], serde_json::json!([]));

    let (status, body) = send(&app, get("/search/?loc=Nowhere")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"]["Not Found"].is_string());

    // missing loc behaves like a location nobody is at
    let (status, body) = send(&app, get("/search/")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"]["Not Found"].is_string());

    let (status, _) = send(&app, get("/random")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn urlencoded_post_then_search() -> anyhow::Result<()> {
    let app = build_app().await?;
    let form = "name=Corner&map_url=m&img_url=i&loc=Soho&seats=5-10&toilet=on&calls=on";
    let req = Request::builder()
        .method("POST")
        .uri("/add/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form))?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/search/?loc=Soho")).await?;
    let hits = body["cafe"].as_array().cloned().unwrap_or_default();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["has_toilet"], true);
    assert_eq!(hits[0]["has_wifi"], false);
    assert_eq!(hits[0]["can_take_calls"], true);

    let (_, body) = send(&app, get("/search/?loc=soho")).await?;
    assert!(body.get("cafe").is_none());
    Ok(())
}

#[tokio::test]
async fn delete_requires_secret() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method("DELETE")
        .uri("/report-closed/1?api_key=nope")
        .body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    let req = Request::builder()
        .method("DELETE")
        .uri("/report-closed/1?api_key=router-secret")
        .body(Body::empty())?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_requests_get_json_errors() -> anyhow::Result<()> {
    let app = build_app().await?;

    for uri in ["/update-price/abc?new_price=1", "/update-price/99999999999"] {
        let req = Request::builder().method("PATCH").uri(uri).body(Body::empty())?;
        let (status, body) = send(&app, req).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"]["Not Found"].is_string(), "{uri}");
    }

    // the key is judged before the id, even when the id cannot be parsed
    let req = Request::builder()
        .method("DELETE")
        .uri("/report-closed/abc?api_key=WRONG")
        .body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    let req = Request::builder()
        .method("DELETE")
        .uri("/report-closed/abc?api_key=router-secret")
        .body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["Not Found"].is_string());

    let req = Request::builder()
        .method("DELETE")
        .uri("/report-closed/1?api_key=router-secret&api_key=router-secret")
        .body(Body::empty())?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = Request::builder()
        .method("POST")
        .uri("/add/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("name=A&name=B&map_url=m&img_url=i&loc=x&seats=1"))?;
    let (status, body) = send(&app, req).await?;
    assert!(status.is_client_error());
    assert!(body["error"].is_object(), "{body}");

    let req = Request::builder()
        .method("POST")
        .uri("/add/")
        .header("content-type", "application/json")
        .body(Body::from("{}"))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_object());
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, get("/api-docs/openapi.json")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/all"].is_object());
    Ok(())
}

#[tokio::test]
async fn landing_page_missing_is_404() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, _) = send(&app, get("/")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use tourney::server::router::routes;
use tower::ServiceExt;

use super::*;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Expect the generate route to accept JSON and report the created matches
#[tokio::test]
async fn generates_schedule_over_http() -> Result<(), TestError> {
    let test = TestBuilder::new().with_season("league", 3).build().await?;
    let app = routes().with_state(test.app_state(None));

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!(
            "/api/seasons/{}/matches/generate",
            test.season(0).season.id
        ))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"shuffle":false}"#))
        .unwrap();

    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["matches"].as_array().map(Vec::len), Some(3));

    Ok(())
}

/// Expect an error body with 404 Not Found for an unknown season
#[tokio::test]
async fn unknown_season_has_error_body() -> Result<(), TestError> {
    let test = test_setup_with_tournament_tables!()?;
    let app = routes().with_state(test.app_state(None));

    let resp = app.oneshot(get("/api/seasons/99/standings")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());

    Ok(())
}

/// Expect 400 Bad Request for an unknown hall kind in the query string
#[tokio::test]
async fn rejects_unknown_hall_kind() -> Result<(), TestError> {
    let test = test_setup_with_tournament_tables!()?;
    let app = routes().with_state(test.app_state(None));

    let resp = app
        .oneshot(get("/api/hall-of-fame?kind=bogus"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the OpenAPI document to be served
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_tournament_tables!()?;
    let app = routes().with_state(test.app_state(None));

    let resp = app.oneshot(get("/api/docs/openapi.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

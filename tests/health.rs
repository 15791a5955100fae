use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use eureka_roles::authz::AuthzMode;
use eureka_roles::{create_app, AppConfig};

#[tokio::test]
async fn health_endpoint_reports_registry() -> Result<()> {
    let app = create_app(AppConfig::default().with_authz_mode(AuthzMode::Advisory)).await?;

    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())?;

    let resp: Response = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK, "health endpoint did not return 200");

    let body_bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let v: Value = serde_json::from_slice(&body_bytes)?;
    assert_eq!(v["status"], "ok");
    // 26 canonical roles plus the three legacy aliases
    assert_eq!(v["roles"], 29, "unexpected registry size: {}", v);
    assert_eq!(v["authz_mode"], "advisory");

    Ok(())
}

use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use eureka_roles::{create_app, AppConfig};

async fn app() -> Result<Router> {
    Ok(create_app(AppConfig::default()).await?)
}

async fn send(app: &Router, req: Request<Body>) -> Result<(StatusCode, Value)> {
    let resp: Response = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

fn get(uri: &str) -> Result<Request<Body>> {
    Ok(Request::builder().method("GET").uri(uri).body(Body::empty())?)
}

fn post(uri: &str, body: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}

#[tokio::test]
async fn list_roles_with_filters() -> Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, get("/roles")?).await?;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().expect("array of roles");
    assert_eq!(all.len(), 26, "legacy aliases are hidden by default");
    let first = &all[0];
    assert_eq!(first["role"], "super_admin");
    assert_eq!(first["portal"], "ADMIN");
    assert_eq!(first["category"], "SUPER_ADMIN");
    assert_eq!(first["canDelete"], true);
    assert_eq!(first["level"], 100);

    let (_, body) = send(&app, get("/roles?portal=BRAND")?).await?;
    let brand = body.as_array().expect("array of roles");
    assert_eq!(brand.len(), 6);
    assert!(brand.iter().all(|row| row["portal"] == "BRAND"));

    let (_, body) = send(&app, get("/roles?category=SUPPORT")?).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(4));

    let (_, body) = send(&app, get("/roles?include_legacy=true")?).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(29));

    let (status, body) = send(&app, get("/roles?portal=MOON")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().is_some_and(|m| m.contains("MOON")));
    Ok(())
}

#[tokio::test]
async fn role_detail_and_permissions() -> Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, get("/roles/support_2_brand")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["supportTier"], "tier2");
    assert_eq!(body["level"], 30);

    let (status, body) = send(&app, get("/roles/campaign_manager/permissions")?).await?;
    assert_eq!(status, StatusCode::OK);
    let perms: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(perms.contains(&"CREATE_CAMPAIGN"));
    assert!(!perms.contains(&"APPROVE_CAMPAIGN"));

    let (status, body) = send(&app, get("/roles/wizard/permissions")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "unknown_role");
    Ok(())
}

#[tokio::test]
async fn escalation_targets_endpoint() -> Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, get("/roles/support_1_brand/escalation-targets")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["support_2_brand", "admin_brand"]));

    let (_, body) = send(&app, get("/roles/brand_viewer/escalation-targets")?).await?;
    assert_eq!(body, json!(["super_admin"]));

    let (status, _) = send(&app, get("/roles/nobody/escalation-targets")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn validate_change_endpoint() -> Result<()> {
    let app = app().await?;

    let (status, body) = send(
        &app,
        post(
            "/roles/validate-change",
            json!({"currentRole": "brand_viewer", "targetRole": "super_admin", "assignerRole": "admin_brand"}),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["reason"], "cannot assign super admin role");

    let (_, body) = send(
        &app,
        post(
            "/roles/validate-change",
            json!({"currentRole": "brand_viewer", "targetRole": "brand_owner", "assignerRole": "admin_brand"}),
        )?,
    )
    .await?;
    assert_eq!(body["valid"], true);
    assert!(body.get("reason").is_none());
    Ok(())
}

#[tokio::test]
async fn authorize_endpoint_renders_typed_denials() -> Result<()> {
    let app = app().await?;

    let (status, body) = send(
        &app,
        post(
            "/authorize",
            json!({"rawRole": "campaign_manager", "requirement": {"required": ["APPROVE_CAMPAIGN", "READ_CAMPAIGN"]}}),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "missing-permissions");
    assert_eq!(body["missing"], json!(["APPROVE_CAMPAIGN"]));

    let (_, body) = send(
        &app,
        post(
            "/authorize",
            json!({"rawRole": "streamer_individual", "requirement": {"requiredPortal": ["ADMIN"]}}),
        )?,
    )
    .await?;
    assert_eq!(body["reason"], "portal-mismatch");
    assert_eq!(body["actualPortal"], "PUBLISHER");
    assert_eq!(body["requiredPortal"], json!(["ADMIN"]));

    let (_, body) = send(
        &app,
        post(
            "/authorize",
            json!({"rawRole": "validator_approver", "requirement": {"required": ["APPROVE_CAMPAIGN", "READ_CAMPAIGN"]}}),
        )?,
    )
    .await?;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["access"]["role"], "validator_approver");
    assert_eq!(body["access"]["portal"], "ADMIN");

    let (status, body) = send(&app, post("/authorize", json!({"requirement": {}}))?).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unprocessable");
    assert!(body["message"].as_str().is_some_and(|m| m.contains("rawRole")));
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_render_error_json() -> Result<()> {
    let app = app().await?;

    let req = Request::builder()
        .method("POST")
        .uri("/roles/validate-change")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = send(
        &app,
        post(
            "/authorize",
            json!({"rawRole": "brand_owner", "requirement": {"required": ["FLY_TO_MOON"]}}),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unprocessable");

    let req = Request::builder()
        .method("POST")
        .uri("/roles/normalize")
        .body(Body::from(r#"{"rawRole": "brand"}"#))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "missing content-type");
    assert_eq!(body["error"], "bad_request");
    Ok(())
}

#[tokio::test]
async fn normalize_endpoint_exposes_fallback() -> Result<()> {
    let app = app().await?;

    let (_, body) = send(&app, post("/roles/normalize", json!({"rawRole": "brand"}))?).await?;
    assert_eq!(body["role"], "campaign_manager");
    assert_eq!(body["fallbackUsed"], false);
    assert_eq!(body["outcome"]["kind"], "legacy");

    let (_, body) = send(&app, post("/roles/normalize", json!({"rawRole": "totally-unknown-role"}))?).await?;
    assert_eq!(body["role"], "streamer_individual");
    assert_eq!(body["fallbackUsed"], true);
    assert_eq!(body["outcome"]["original"], "totally-unknown-role");
    Ok(())
}

#[tokio::test]
async fn my_access_reads_identity_header() -> Result<()> {
    let app = app().await?;

    let req = Request::builder()
        .method("GET")
        .uri("/me/access")
        .header("x-eureka-role", "admin")
        .body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin_exchange");
    assert_eq!(body["portal"], "ADMIN");
    assert_eq!(body["normalization"]["kind"], "legacy");

    let (status, body) = send(&app, get("/me/access")?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    Ok(())
}

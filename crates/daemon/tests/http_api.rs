use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use url::{form_urlencoded, Url};

use common::prelude::Passphrase;
use wichtel_daemon::http_server::api::v0::santas::{CheckResponse, ComputeResponse};
use wichtel_daemon::http_server::{router, Config};
use wichtel_daemon::ServiceState;

const PASSPHRASE: &str = "secret";

fn app(public_url: Option<&str>) -> Router {
    let state = ServiceState::new(
        Passphrase::new(PASSPHRASE),
        public_url.map(|u| Url::parse(u).unwrap()),
    );
    let config = Config::new("127.0.0.1:0".parse().unwrap(), tracing::Level::DEBUG);
    router(&config, state)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn compute(app: &Router, participants: &[&str]) -> ComputeResponse {
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/v0/santas/compute",
            serde_json::json!({
                "admin_passphrase": PASSPHRASE,
                "participants": participants,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    serde_json::from_str(&body_string(response).await).unwrap()
}

async fn check(app: &Router, name: &str, token: &str) -> Option<String> {
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/v0/santas/check",
            serde_json::json!({ "name": name, "token": token }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: CheckResponse = serde_json::from_str(&body_string(response).await).unwrap();
    body.recipient
}

#[tokio::test]
async fn test_compute_then_check_every_giver() {
    let app = app(None);
    let result = compute(&app, &["Alice", "Bob", "Carol", "Bob"]).await;

    let givers: Vec<&str> = result.matching.iter().map(|m| m.giver.as_str()).collect();
    assert_eq!(givers, vec!["Alice", "Bob", "Carol"]);

    let mut recipients = Vec::new();
    for entry in &result.matching {
        assert!(entry.link.is_none());
        let recipient = check(&app, &entry.giver, &entry.token).await.unwrap();
        assert_ne!(recipient, entry.giver);
        recipients.push(recipient);
    }
    recipients.sort();
    assert_eq!(recipients, vec!["Alice", "Bob", "Carol"]);
}

#[tokio::test]
async fn test_compute_with_public_url_adds_links() {
    let app = app(Some("https://wichtel.example.com/"));
    let result = compute(&app, &["Alice", "Bob"]).await;

    for entry in &result.matching {
        let link = entry.link.as_ref().unwrap();
        assert_eq!(link.host_str(), Some("wichtel.example.com"));
        let query: Vec<(String, String)> = link.query_pairs().into_owned().collect();
        assert_eq!(query[0], ("name".to_string(), entry.giver.clone()));
        assert_eq!(query[1].0, "password");
    }
}

#[tokio::test]
async fn test_compute_rejects_wrong_admin_passphrase() {
    let response = app(None)
        .oneshot(json_post(
            "/api/v0/santas/compute",
            serde_json::json!({
                "admin_passphrase": "guess",
                "participants": ["Alice", "Bob"],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(response).await, "Invalid admin password");
}

#[tokio::test]
async fn test_compute_rejects_too_few_participants() {
    let response = app(None)
        .oneshot(json_post(
            "/api/v0/santas/compute",
            serde_json::json!({
                "admin_passphrase": PASSPHRASE,
                "participants": ["Alice", " Alice "],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_failures_are_indistinguishable() {
    let app = app(None);
    let result = compute(&app, &["Alice", "Bob"]).await;
    let alice = &result.matching[0];

    assert_eq!(check(&app, "Bob", &alice.token).await, None);
    assert_eq!(check(&app, "Alice", "not-a-token").await, None);
    assert_eq!(check(&app, "Alice", "").await, None);
}

#[tokio::test]
async fn test_token_from_other_passphrase_is_rejected() {
    let result = compute(&app(None), &["Alice", "Bob"]).await;

    let other = router(
        &Config::new("127.0.0.1:0".parse().unwrap(), tracing::Level::DEBUG),
        ServiceState::new(Passphrase::new("other"), None),
    );
    assert_eq!(check(&other, "Alice", &result.matching[0].token).await, None);
}

#[tokio::test]
async fn test_index_prefills_from_share_link() {
    let response = app(None)
        .oneshot(
            Request::builder()
                .uri("/?name=Alice&password=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"value="Alice""#));
    assert!(body.contains(r#"value="abc123""#));
}

#[tokio::test]
async fn test_reveal_form() {
    let app = app(None);
    let result = compute(&app, &["Alice", "Bob"]).await;
    let alice = &result.matching[0];

    let response = app
        .clone()
        .oneshot(form_post(
            "/reveal",
            &[("name", "Alice"), ("password", alice.token.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("<strong>Bob</strong>"));

    let response = app
        .oneshot(form_post(
            "/reveal",
            &[("name", "Bob"), ("password", alice.token.as_str())],
        ))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("do not belong together"));
    assert!(!body.contains("<strong>"));
}

#[tokio::test]
async fn test_admin_form() {
    let app = app(None);

    let response = app
        .clone()
        .oneshot(form_post(
            "/admin",
            &[("adminPwd", PASSPHRASE), ("participants", "Alice\nBob\nCarol")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    for name in ["Alice", "Bob", "Carol"] {
        assert!(body.contains(&format!("<td>{}</td>", name)));
    }

    let response = app
        .oneshot(form_post(
            "/admin",
            &[("adminPwd", "guess"), ("participants", "Alice\nBob")],
        ))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Invalid admin password"));
    assert!(!body.contains("<td>Alice</td>"));
}

#[tokio::test]
async fn test_status_endpoints() {
    let app = app(None);

    for path in ["/_status/livez", "/_status/readyz", "/_status/version"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = app(None)
        .oneshot(
            Request::builder()
                .uri("/nope")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, r#"{"msg":"not found"}"#);
}

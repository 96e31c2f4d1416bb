//! End-to-end tests of the sample application over real sockets.

use reqwest::StatusCode;
use trellis::config::AppConfig;
use trellis::demo::sample_tree;
use trellis::prelude::*;

mod common;

fn agents() -> StaticUsers {
    StaticUsers::new().with_user("Bond", "007", Vec::new())
}

#[tokio::test]
async fn test_hello_world() {
    let server = common::start_server(sample_tree(agents())).await;
    let response = common::client().get(server.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "Hello World!");
}

#[tokio::test]
async fn test_unmatched_requests_fall_through_to_404() {
    let server = common::start_server(sample_tree(agents())).await;
    let client = common::client();

    let missing = client.get(server.url("/missing")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.text().await.unwrap(), "No matching route found");

    let wrong_method = client.post(server.url("/test")).send().await.unwrap();
    assert_eq!(wrong_method.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_requires_credentials() {
    let server = common::start_server(sample_tree(agents())).await;
    let client = common::client();

    let anonymous = client.get(server.url("/protected")).send().await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.headers()["www-authenticate"], "Basic");
    assert!(anonymous.text().await.unwrap().is_empty());

    let impostor = client
        .get(server.url("/protected"))
        .basic_auth("Goldeneye", Some("big-laser"))
        .send()
        .await
        .unwrap();
    assert_eq!(impostor.status(), StatusCode::UNAUTHORIZED);

    let agent = client
        .get(server.url("/protected"))
        .basic_auth("Bond", Some("007"))
        .send()
        .await
        .unwrap();
    assert_eq!(agent.status(), StatusCode::OK);
    assert_eq!(
        agent.text().await.unwrap(),
        "Super Secret!\nWelcome Agent Bond!"
    );
}

#[tokio::test]
async fn test_body_limit_is_enforced() {
    let mut config = AppConfig::default();
    config.limits.max_body_size = 8;
    let server = common::start_server_with(config, sample_tree(agents())).await;

    let response = common::client()
        .get(server.url("/"))
        .body("far more than eight bytes")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_json_leaf_over_the_wire() {
    #[derive(serde::Serialize)]
    struct Agent {
        name: &'static str,
        code: u32,
    }

    let tree = get()
        .and(route("/agent"))
        .then(json(Agent {
            name: "Bond",
            code: 7,
        }))
        .shared();
    let server = common::start_server(tree).await;

    let response = common::client().get(server.url("/agent")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"name": "Bond", "code": 7}));
}

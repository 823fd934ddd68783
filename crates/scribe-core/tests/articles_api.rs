//! End-to-end tests of the API client against a mock articles service.

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scribe_core::api::{unauthorized, ApiClient, ApiError};
use scribe_core::auth::{MemoryTokenStore, Session};
use scribe_core::models::ArticleDraft;

const TOKEN: &str = "ed-0123-4567";

fn draft() -> ArticleDraft {
    ArticleDraft {
        title: "Async Rust".to_string(),
        text: "Futures are lazy".to_string(),
        topic: "Node".to_string(),
    }
}

#[tokio::test]
async fn login_stores_token_and_list_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "ed", "password": "hunter22"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "token": TOKEN,
                "message": "ed is back!"
            })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Here are your articles, ed",
            "articles": [
                {"article_id": 1, "title": "HTML", "text": "is cool", "topic": "React"}
            ]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let login = client.login("ed", "hunter22").await.expect("login");
    assert_eq!(login.message, "ed is back!");

    let mut session = Session::new(Box::new(MemoryTokenStore::new()));
    session.login(login.token);
    assert!(session.is_logged_in());

    let authed = client.with_token(session.token().expect("token"));
    let resp = authed.fetch_articles().await.expect("fetch");
    assert_eq!(resp.articles.len(), 1);
    assert_eq!(resp.articles[0].title, "HTML");
    assert_eq!(resp.message, "Here are your articles, ed");
}

#[tokio::test]
async fn bad_credentials_map_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let err = client.login("ed", "wrong").await.expect_err("should fail");
    assert!(unauthorized(&err));
}

#[tokio::test]
async fn unauthorized_list_clears_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token invalid"})),
        )
        .mount(&server)
        .await;

    let mut session = Session::new(Box::new(MemoryTokenStore::new()));
    session.login("stale-token".to_string());

    let client = ApiClient::new(server.uri()).expect("client");
    let authed = client.with_token(session.token().expect("token"));
    let err = authed.fetch_articles().await.expect_err("should fail");

    // The caller-side transition: unauthorized means log out and drop the token
    assert!(unauthorized(&err));
    assert!(session.logout());
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn request_without_token_sends_no_authorization_header() {
    let server = MockServer::start().await;

    // Any request that does carry the header trips this guard
    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "unexpected Authorization header"
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "anonymous ok",
            "articles": []
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let resp = client.fetch_articles().await.expect("fetch");
    assert_eq!(resp.message, "anonymous ok");
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let server = MockServer::start().await;
    let draft = draft();

    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(header("Authorization", TOKEN))
        .and(body_json(&draft))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Well done, ed. Great article!",
            "article": {"article_id": 7, "title": draft.title.clone(), "text": draft.text.clone(), "topic": draft.topic.clone()}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/articles/7"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Nice update, ed!",
            "article": {"article_id": 7, "title": "Async Rust, revised", "text": draft.text.clone(), "topic": draft.topic.clone()}
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/articles/7"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Article 7 was deleted, ed!"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client").with_token(TOKEN);

    let created = client.create_article(&draft).await.expect("create");
    assert_eq!(created.article.article_id, 7);
    assert_eq!(created.message, "Well done, ed. Great article!");

    let mut revised = draft.clone();
    revised.title = "Async Rust, revised".to_string();
    let updated = client.update_article(7, &revised).await.expect("update");
    assert_eq!(updated.article.title, "Async Rust, revised");

    let deleted = client.delete_article(7).await.expect("delete");
    assert_eq!(deleted.message, "Article 7 was deleted, ed!");
}

#[tokio::test]
async fn validation_error_surfaces_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "title is required"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client").with_token(TOKEN);
    let err = client.create_article(&draft()).await.expect_err("should fail");

    let api_err = err.downcast_ref::<ApiError>().expect("api error");
    assert!(matches!(api_err, ApiError::Validation(_)));
    assert_eq!(api_err.to_string(), "title is required");
}

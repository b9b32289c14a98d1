mod common;

use auth::Claims;
use auth::JwtHandler;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let body = app.register("a@x.com", "A", "pw").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["userName"], "A");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_token_carries_email_and_user_name() {
    let app = TestApp::spawn().await;

    let body = app.register("a@x.com", "A", "pw").await;
    let token = body["data"]["token"].as_str().unwrap();

    let claims: Claims = app.jwt_handler.decode(token).expect("Token should verify");
    assert_eq!(claims.email(), Some("a@x.com".to_string()));
    assert_eq!(claims.user_name(), Some("A".to_string()));
    assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 3600);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "a@x.com",
            "userName": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert!(body["message"].as_str().unwrap().contains("userName"));
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "not-an-email",
            "userName": "A",
            "password": "pw"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("a@x.com", "A", "pw").await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "a@x.com",
            "userName": "Other",
            "password": "other"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The original credentials still work
    app.login_token("a@x.com", "pw").await;
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "A", "pw").await;

    let response = app
        .post("/login")
        .json(&json!({
            "email": "a@x.com",
            "password": "pw"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["userName"], "A");

    let claims: Claims = app
        .jwt_handler
        .decode(body["data"]["token"].as_str().unwrap())
        .expect("Token should verify");
    assert_eq!(claims.email(), Some("a@x.com".to_string()));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "A", "pw").await;

    let response = app
        .post("/login")
        .json(&json!({
            "email": "a@x.com",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({
            "email": "nobody@x.com",
            "password": "pw"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refresh_token_success() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "A", "pw").await;

    let response = app
        .post("/refresh-token")
        .json(&json!({ "email": "a@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Token refreshed successfully");
    assert_eq!(body["data"].as_object().unwrap().len(), 1);

    let claims: Claims = app
        .jwt_handler
        .decode(body["data"]["token"].as_str().unwrap())
        .expect("Token should verify");
    assert_eq!(claims.email(), Some("a@x.com".to_string()));
}

#[tokio::test]
async fn test_refresh_token_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/refresh-token")
        .json(&json!({ "email": "nobody@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_hides_password() {
    let app = TestApp::spawn().await;
    app.register("b@x.com", "B", "pw-b").await;
    app.register("a@x.com", "A", "pw-a").await;
    let token = app.login_token("a@x.com", "pw-a").await;

    let response = app
        .get_authenticated("/users", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.expect("Failed to read response");
    assert!(!text.contains("password"));
    assert!(!text.contains("argon2"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["message"], "Users retrieved successfully");
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0], json!({ "email": "a@x.com", "userName": "A" }));
    assert_eq!(users[1], json!({ "email": "b@x.com", "userName": "B" }));
}

#[tokio::test]
async fn test_get_current_user() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "A", "pw").await;
    let token = app.login_token("a@x.com", "pw").await;

    let response = app
        .get_authenticated("/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Current user retrieved successfully");
    assert_eq!(body["data"], json!({ "email": "a@x.com", "userName": "A" }));
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::spawn().await;

    for path in ["/users", "/user"] {
        let response = app
            .get(path)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_profile_rejects_token_from_other_secret() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "A", "pw").await;

    let forged = JwtHandler::new(b"some-other-secret-that-is-32-bytes-long")
        .encode(
            &Claims::for_account("a@x.com")
                .with_expiration(chrono::Utc::now().timestamp() + 3600),
        )
        .unwrap();

    let response = app
        .get_authenticated("/user", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_profile_rejects_expired_token() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "A", "pw").await;

    let now = chrono::Utc::now().timestamp();
    let expired = app
        .jwt_handler
        .encode(
            &Claims::for_account("a@x.com")
                .with_issued_at(now - 3601)
                .with_expiration(now - 1),
        )
        .unwrap();

    let response = app
        .get_authenticated("/users", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_then_login_flow() {
    let app = TestApp::spawn().await;

    let registered = app.register("a@x.com", "A", "pw").await;
    assert!(!registered["data"]["token"].as_str().unwrap().is_empty());

    let wrong = app
        .post("/login")
        .json(&json!({ "email": "a@x.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong.status(), StatusCode::FORBIDDEN);

    let token = app.login_token("a@x.com", "pw").await;
    let claims: Claims = app.jwt_handler.decode(&token).unwrap();
    assert_eq!(claims.email(), Some("a@x.com".to_string()));
}

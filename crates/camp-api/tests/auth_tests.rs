use axum::http::StatusCode;
use camp_db::models::UserRole;
use serde_json::{Value, json};

use crate::common::{
    TestClient, TestStateBuilder,
    db::{self, TEST_PASSWORD},
};

#[tokio::test]
#[ignore]
async fn test_login_issues_tokens_and_cookies() {
    let state = TestStateBuilder::new().build().await.unwrap();
    let client = TestClient::for_state(&state);
    let user = db::create_user(&state.pool, UserRole::User).await.unwrap();

    let response = client
        .post_json(
            "/api/auth/login",
            &json!({ "username": user.username, "password": TEST_PASSWORD }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["username"], user.username.as_str());
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refreshToken"].as_str().is_some_and(|t| !t.is_empty()));

    let auth_cookie = response.set_cookie("auth_token").expect("auth cookie");
    assert!(auth_cookie.contains("HttpOnly"));
    assert!(response.set_cookie("refresh_token").is_some());

    db::delete_user(&state.pool, &user).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let state = TestStateBuilder::new().build().await.unwrap();
    let client = TestClient::for_state(&state);
    let user = db::create_user(&state.pool, UserRole::User).await.unwrap();

    let wrong_password = client
        .post_json(
            "/api/auth/login",
            &json!({ "username": user.username, "password": "not-the-password" }),
        )
        .await;
    let unknown_user = client
        .post_json(
            "/api/auth/login",
            &json!({ "username": "nobody_by_that_name", "password": TEST_PASSWORD }),
        )
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>(), unknown_user.json::<Value>());

    db::delete_user(&state.pool, &user).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_current_user_via_bearer_and_cookie() {
    let state = TestStateBuilder::new().build().await.unwrap();
    let client = TestClient::for_state(&state);
    let user = db::create_user(&state.pool, UserRole::Admin).await.unwrap();
    let token = crate::common::jwt::token_for(&state, &user);

    let via_bearer = client.get_with_bearer("/api/user", &token).await;
    via_bearer.assert_status(StatusCode::OK);
    assert_eq!(via_bearer.json::<Value>()["id"], user.id.to_string());

    let via_cookie = client
        .get_with_auth_cookie("/api/user", &token, &state.cookie_key)
        .await;
    via_cookie.assert_status(StatusCode::OK);
    assert_eq!(via_cookie.json::<Value>()["username"], user.username.as_str());

    db::delete_user(&state.pool, &user).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_deleted_user_token_is_rejected() {
    let state = TestStateBuilder::new().build().await.unwrap();
    let client = TestClient::for_state(&state);
    let user = db::create_user(&state.pool, UserRole::User).await.unwrap();
    let token = crate::common::jwt::token_for(&state, &user);
    db::delete_user(&state.pool, &user).await.unwrap();

    let response = client.get_with_bearer("/api/user", &token).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_refresh_rotates_and_old_token_dies() {
    let state = TestStateBuilder::new().build().await.unwrap();
    let client = TestClient::for_state(&state);
    let user = db::create_user(&state.pool, UserRole::User).await.unwrap();

    let login: Value = client
        .post_json(
            "/api/auth/login",
            &json!({ "username": user.username, "password": TEST_PASSWORD }),
        )
        .await
        .json();
    let first = login["refreshToken"].as_str().unwrap().to_string();

    let rotated = client
        .post_json("/api/refresh", &json!({ "refreshToken": first }))
        .await;
    rotated.assert_status(StatusCode::OK);
    let second = rotated.json::<Value>()["refreshToken"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first, second);

    // The first token was consumed by the rotation
    client
        .post_json("/api/refresh", &json!({ "refreshToken": first }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // The replacement works from the cookie too
    client
        .post_with_refresh_cookie("/api/refresh", &second, &state.cookie_key)
        .await
        .assert_status(StatusCode::OK);

    db::delete_user(&state.pool, &user).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_logout_revokes_refresh_token() {
    let state = TestStateBuilder::new().build().await.unwrap();
    let client = TestClient::for_state(&state);
    let user = db::create_user(&state.pool, UserRole::User).await.unwrap();

    let login: Value = client
        .post_json(
            "/api/auth/login",
            &json!({ "username": user.username, "password": TEST_PASSWORD }),
        )
        .await
        .json();
    let refresh_token = login["refreshToken"].as_str().unwrap().to_string();

    let logout = client
        .post_json("/api/auth/logout", &json!({ "refreshToken": refresh_token }))
        .await;
    logout.assert_status(StatusCode::OK);
    assert_eq!(logout.json::<Value>()["message"], "Logged out successfully");

    // Logging out again is harmless
    client
        .post_json("/api/auth/logout", &json!({ "refreshToken": refresh_token }))
        .await
        .assert_status(StatusCode::OK);

    client
        .post_json("/api/refresh", &json!({ "refreshToken": refresh_token }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    db::delete_user(&state.pool, &user).await.unwrap();
}

use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn profile_update_requires_a_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .patch(format!("{}/api/users/profile", app.address))
        .json(&json!({ "name": "New Name" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn a_garbage_bearer_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .patch_profile("not-a-token", &json!({ "name": "New Name" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn profile_name_and_email_can_be_updated() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    let response = app
        .patch_profile(
            &token,
            &json!({ "name": "Alicia", "email": "alicia@example.com" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Profile updated successfully");

    // The new email works for login, the old one does not.
    let old = app
        .post_login(&json!({ "email": "alice@example.com", "password": "ValidPass1" }))
        .await;
    assert_eq!(old.status().as_u16(), 401);
    let new = app
        .post_login(&json!({ "email": "alicia@example.com", "password": "ValidPass1" }))
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn mobile_cannot_be_updated_through_the_profile() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    let response = app
        .patch_profile(
            &token,
            &json!({ "name": "Alicia", "mobile": "+4787654321" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Validation failed");

    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| {
        e["path"] == "" && e["message"] == "Only 'name' and 'email' can be updated."
    }));
}

#[tokio::test]
async fn profile_email_collision_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_register(&json!({
            "name": "Bob",
            "email": "bob@example.com",
            "mobile": "+4787654321",
            "password": "ValidPass1",
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let (_, alice_token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    let response = app
        .patch_profile(&alice_token, &json!({ "email": "bob@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email or mobile already in use");
}

#[tokio::test]
async fn password_change_requires_a_fresh_code() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    let response = app.post_request_password_change(&token).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Verification code sent");

    let code = app.last_sms_code().await;
    let response = app
        .patch_change_password(
            &token,
            &json!({ "code": code, "newPassword": "NewValidPass1" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password updated successfully");

    // The old password is dead, the new one authenticates.
    let old = app
        .post_login(&json!({ "email": "alice@example.com", "password": "ValidPass1" }))
        .await;
    assert_eq!(old.status().as_u16(), 401);
    let new = app
        .post_login(&json!({ "email": "alice@example.com", "password": "NewValidPass1" }))
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn password_change_rejects_a_wrong_code() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    app.post_request_password_change(&token).await;
    let code = app.last_sms_code().await;
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let response = app
        .patch_change_password(
            &token,
            &json!({ "code": wrong, "newPassword": "NewValidPass1" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid or expired code");
}

#[tokio::test]
async fn password_change_without_a_code_request_fails() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    // The login code was already consumed at verify-2fa; nothing is live.
    let response = app
        .patch_change_password(
            &token,
            &json!({ "code": "123456", "newPassword": "NewValidPass1" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn a_weak_new_password_is_rejected_without_burning_the_code() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_authenticate("alice@example.com", "+4712345678")
        .await;

    app.post_request_password_change(&token).await;
    let code = app.last_sms_code().await;

    let rejected = app
        .patch_change_password(&token, &json!({ "code": code, "newPassword": "weak" }))
        .await;
    assert_eq!(rejected.status().as_u16(), 400);

    // Same code is still valid afterwards.
    let accepted = app
        .patch_change_password(
            &token,
            &json!({ "code": code, "newPassword": "NewValidPass1" }),
        )
        .await;
    assert_eq!(accepted.status().as_u16(), 200);
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login-lookup endpoint tests.

use axum::http::StatusCode;
use common::{body_json, build_app, json_request, FakeIdentity, MemoryStore, TestDeps};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_register_creates_identity_and_profile() {
    let store = Arc::new(MemoryStore::default());
    let (app, state) = build_app(TestDeps {
        store: store.clone(),
        ..Default::default()
    });

    let response = app
        .oneshot(json_request(
            "/register",
            r#"{"email":"a@b.com","password":"secret1","name":"Ann"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User registered successfully");
    let uid = body["uid"].as_str().unwrap().to_string();
    assert!(!uid.is_empty());

    let profile = state.store.get_profile(&uid).await.unwrap().unwrap();
    assert_eq!(profile.name, "Ann");
    assert_eq!(profile.email, "a@b.com");
    assert!(chrono::DateTime::parse_from_rfc3339(&profile.created_at).is_ok());
    assert_eq!(store.profiles.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_existing_email_conflicts() {
    let store = Arc::new(MemoryStore::default());
    let (app, _state) = build_app(TestDeps {
        identity: Arc::new(FakeIdentity::with_account("a@b.com", "uid-existing")),
        store: store.clone(),
        ..Default::default()
    });

    let response = app
        .oneshot(json_request(
            "/register",
            r#"{"email":"a@b.com","password":"secret1","name":"Ann"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "conflict");
    assert_eq!(
        body["details"],
        "Email already registered. Please use a different email or log in."
    );
    assert!(store.profiles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_short_password_rejected_before_identity_call() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/register",
            r#"{"email":"a@b.com","password":"123","name":"Ann"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_identity_rejection_is_bad_request() {
    let store = Arc::new(MemoryStore::default());
    let (app, _state) = build_app(TestDeps {
        store: store.clone(),
        ..Default::default()
    });

    let response = app
        .oneshot(json_request(
            "/register",
            r#"{"email":"not-an-email","password":"secret1","name":"Ann"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Registration failed:"));
    assert!(store.profiles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_missing_field_is_unprocessable() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/register",
            r#"{"email":"a@b.com","password":"secret1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_register_syntax_error_is_bad_request() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(json_request("/register", r#"{"email":"a@b.com","#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_login_known_email() {
    let (app, _state) = build_app(TestDeps {
        identity: Arc::new(FakeIdentity::with_account("a@b.com", "uid-42")),
        ..Default::default()
    });

    let response = app
        .oneshot(json_request(
            "/login",
            r#"{"email":"a@b.com","password":"anything"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "User found (client handles actual authentication)"
    );
    assert_eq!(body["uid"], "uid-42");
    assert_eq!(body["email"], "a@b.com");
}

#[tokio::test]
async fn test_login_password_is_not_checked() {
    let (app, _state) = build_app(TestDeps {
        identity: Arc::new(FakeIdentity::with_account("a@b.com", "uid-42")),
        ..Default::default()
    });

    let response = app
        .oneshot(json_request("/login", r#"{"email":"a@b.com","password":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_unknown_email_not_found() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/login",
            r#"{"email":"nobody@b.com","password":"secret1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["details"], "User not found with this email.");
}

#[tokio::test]
async fn test_register_then_login_returns_same_uid() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "/register",
            r#"{"email":"c@d.com","password":"secret1","name":"Cy"}"#,
        ))
        .await
        .unwrap();
    let registered = body_json(response).await;

    let response = app
        .oneshot(json_request(
            "/login",
            r#"{"email":"c@d.com","password":"secret1"}"#,
        ))
        .await
        .unwrap();
    let found = body_json(response).await;

    assert_eq!(registered["uid"], found["uid"]);
}

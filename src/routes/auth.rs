// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login-lookup routes.
//!
//! Password verification happens client-side with the Firebase SDK; `/login`
//! only confirms that an account exists for the email.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::ValidatedJson;
use crate::models::UserProfile;
use crate::services::IdentityError;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    pub name: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub message: String,
    pub uid: String,
}

/// Create the identity record, then the profile document keyed by its uid.
async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let record = state
        .identity
        .create_user(&request.email, &request.password)
        .await
        .map_err(|e| match e {
            IdentityError::EmailExists => AppError::Conflict(
                "Email already registered. Please use a different email or log in.".to_string(),
            ),
            other => {
                tracing::warn!(error = %other, "Identity record creation failed");
                AppError::BadRequest(format!("Registration failed: {}", other))
            }
        })?;

    let profile = UserProfile {
        name: request.name,
        email: request.email,
        created_at: now_rfc3339(),
    };
    state.store.create_profile(&record.uid, &profile).await?;

    tracing::info!(uid = %record.uid, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            uid: record.uid,
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    /// Accepted for client compatibility; never checked here.
    #[allow(dead_code)]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub message: String,
    pub uid: String,
    pub email: String,
}

/// Confirm an account exists for the email. Not an authentication step.
async fn login(
    State(state): State<Arc<AppState>>,
    crate::middleware::JsonBody(request): crate::middleware::JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let record = state
        .identity
        .get_user_by_email(&request.email)
        .await
        .map_err(|e| match e {
            IdentityError::UserNotFound => {
                AppError::NotFound("User not found with this email.".to_string())
            }
            other => AppError::BadRequest(format!("Login verification failed: {}", other)),
        })?;

    Ok(Json(LoginResponse {
        message: "User found (client handles actual authentication)".to_string(),
        uid: record.uid,
        email: record.email.unwrap_or(request.email),
    }))
}

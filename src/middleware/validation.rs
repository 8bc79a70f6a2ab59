// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON body extractors that reject bad input before any upstream call.

use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` with rejections reported as [`AppError`]s.
///
/// Well-formed JSON of the wrong shape (missing or mistyped fields) is a 422;
/// anything else (syntax errors, wrong content type) is a 400.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
                other => AppError::BadRequest(other.body_text()),
            })?;
        Ok(Self(value))
    }
}

/// JSON body that must also pass its `validator` rules.
///
/// Malformed JSON is a 400; wrong shape and constraint violations are a 422.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| AppError::Validation(errors.to_string()))?;
        Ok(Self(value))
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors the query API surfaces as HTTP responses.
///
/// `InvalidData` always maps to 400 with the fixed body
/// `invalid data in request body`; `Store` maps to 500 with the underlying
/// error's message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid data in request body")]
    InvalidData,

    #[error("{0}")]
    Store(#[from] dvln_store::StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidData => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

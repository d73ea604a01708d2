//! Application routes exercising each problem path

use std::io;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use errata_core::{ClassifiedError, ErrorKind, wrap};
use errata_server::{ApiError, ValidationErrors};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Routes used by the problem tests
pub fn app() -> Router {
    Router::new()
        .route("/kinds/{suffix}", get(classified))
        .route("/users/{id}", get(find_user))
        .route("/users", post(create_user))
}

/// Fail with the category whose type suffix matches the path
async fn classified(Path(suffix): Path<String>) -> Result<(), ApiError> {
    let kind = ErrorKind::iter()
        .find(|kind| kind.type_suffix() == suffix)
        .ok_or_else(|| io::Error::other(format!("unknown kind {suffix}")))?;

    Err(ClassifiedError::new(kind, format!("forced {suffix}")).into())
}

async fn find_user(Path(id): Path<u64>) -> Result<Json<serde_json::Value>, ApiError> {
    match id {
        1 => Ok(Json(serde_json::json!({ "id": 1, "name": "ada" }))),
        7 => Err(wrap("load user", ClassifiedError::not_found("user 7 missing")).into()),
        _ => Err(wrap("load user", io::Error::other("db timeout")).into()),
    }
}

async fn create_user(Json(user): Json<NewUser>) -> Response {
    let mut errors = ValidationErrors::new();

    if user.name.trim().is_empty() {
        errors.push("name is required");
    }
    if !user.email.contains('@') {
        errors.push("email format is invalid");
    }
    if user.age < 0 {
        errors.push("age must be greater than or equal to 0");
    }

    match errors.finish(user) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(errors) => errors.into_response(),
    }
}

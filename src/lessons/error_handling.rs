//! Exception handlers: both the built-in [`HttpError`] and a lesson-defined
//! [`CustomException`] are mapped to `{"message": ...}` bodies.

use serde_json::{Value, json};
use thiserror::Error;

use crate::{Exception, HttpError, Json, Raised, Request, Response, Router, json_response};

/// An application error carrying its own status and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct CustomException {
    pub status: u16,
    pub message: String,
}

impl CustomException {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

/// Without a registered handler it renders like an [`HttpError`].
impl Exception for CustomException {
    fn to_response(&self) -> Response {
        HttpError::new(self.status, self.message.clone()).to_response()
    }
}

pub fn router() -> Router {
    Router::new()
        .get("/", read_root)
        .get("/error", raise_error)
        .get("/custom-error", raise_custom_error)
        .exception_handler(http_exception_handler)
        .exception_handler(custom_exception_handler)
}

fn http_exception_handler(e: &HttpError) -> Response {
    json_response(e.status, &json!({ "message": "There was a server error" }))
}

fn custom_exception_handler(e: &CustomException) -> Response {
    json_response(e.status, &json!({ "message": e.message }))
}

async fn read_root(_req: Request) -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn raise_error(_req: Request) -> Result<Json<Value>, Raised> {
    Err(HttpError::new(500u16, "This is the HTTP exception").into())
}

async fn raise_custom_error(_req: Request) -> Result<Json<Value>, Raised> {
    Err(CustomException::new(500, "This is the custom exception").into())
}

//! Incoming HTTP request type and its extractors.

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use http::{Extensions, HeaderMap};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::exception::HttpError;
use crate::method::Method;
use crate::status::Status;
use crate::validation::RequestValidationError;

/// An incoming HTTP request with its body fully read.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) extensions: Extensions,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        query: Option<String>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            path,
            query,
            headers,
            body,
            params: HashMap::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Whether the body holds anything besides whitespace.
    pub fn has_body(&self) -> bool {
        !self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter as matched.
    ///
    /// For a route `/products/{product_id}`, `req.param("product_id")` on
    /// `/products/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a named path parameter into `T`.
    ///
    /// A parameter that is absent or does not parse is a `422` validation
    /// error pointing at `["path", key]`.
    pub fn path_param<T: FromStr>(&self, key: &str) -> Result<T, RequestValidationError> {
        self.param(key)
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| RequestValidationError::path_param::<T>(key))
    }

    /// Deserialises the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestValidationError> {
        if !self.has_body() {
            return Err(RequestValidationError::missing_body());
        }
        serde_json::from_slice(&self.body)
            .map_err(|e| RequestValidationError::from_body::<T>(&self.body, &e))
    }

    /// Deserialises the body as JSON into `T` and checks its declared
    /// constraints.
    pub fn valid_json<T: DeserializeOwned + Validate>(&self) -> Result<T, RequestValidationError> {
        let value: T = self.json()?;
        value
            .validate()
            .map_err(|e| RequestValidationError::from_validator(&e))?;
        Ok(value)
    }

    /// A clone of the state injected with [`Router::with_state`].
    ///
    /// Missing state is a wiring mistake, reported as `500`.
    ///
    /// [`Router::with_state`]: crate::Router::with_state
    pub fn state<S: Clone + Send + Sync + 'static>(&self) -> Result<S, HttpError> {
        self.extensions
            .get::<S>()
            .cloned()
            .ok_or_else(|| HttpError::from_status(Status::InternalServerError))
    }
}

//! Raised exceptions and exception handlers.
//!
//! A handler signals failure by returning `Err(e)` where `e` is any
//! [`Exception`]. The error is rendered with its default response, and the
//! exception travels along with that response back to the [`Router`]. If an
//! exception handler is registered for that exact type, the router replaces
//! the default response with the handler's:
//!
//! ```rust
//! use serde_json::json;
//! use showcase::{HttpError, Json, Request, Router, json_response};
//!
//! let app = Router::new()
//!     .get("/error", |_req: Request| async {
//!         Err::<Json<()>, _>(HttpError::new(500u16, "boom"))
//!     })
//!     .exception_handler(|e: &HttpError| {
//!         json_response(e.status, &json!({"message": "There was a server error"}))
//!     });
//! # let _ = app;
//! ```
//!
//! [`Router`]: crate::Router

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// An error type a handler can raise.
///
/// `to_response` is the default mapping, used when no exception handler is
/// registered for the type.
pub trait Exception: fmt::Debug + Send + Sync + 'static {
    fn to_response(&self) -> Response;
}

type Payload = dyn Any + Send + Sync;

/// A type-erased raised [`Exception`].
///
/// Every `Exception` converts into `Raised` via `?` or `.into()`, so handlers
/// may return `Result<T, Raised>` and mix exception types freely.
pub struct Raised {
    type_id: TypeId,
    description: String,
    payload: Box<Payload>,
    render: fn(&Payload) -> Response,
}

impl Raised {
    pub fn new<E: Exception>(exception: E) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            description: format!("{exception:?}"),
            payload: Box::new(exception),
            render: render::<E>,
        }
    }

    pub fn is<E: Exception>(&self) -> bool {
        self.type_id == TypeId::of::<E>()
    }

    pub fn downcast_ref<E: Exception>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }
}

fn render<E: Exception>(payload: &Payload) -> Response {
    match payload.downcast_ref::<E>() {
        Some(e) => e.to_response(),
        None => Response::status(Status::InternalServerError),
    }
}

impl<E: Exception> From<E> for Raised {
    fn from(exception: E) -> Self {
        Self::new(exception)
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl IntoResponse for Raised {
    fn into_response(self) -> Response {
        let mut response = (self.render)(&*self.payload);
        response.raised = Some(Box::new(self));
        response
    }
}

impl Response {
    /// The exception this response was rendered from, if any.
    pub fn exception(&self) -> Option<&Raised> {
        self.raised.as_deref()
    }
}

/// Serialises `value` into a JSON response carrying `status`.
pub fn json_response<T: serde::Serialize>(status: impl Into<u16>, value: &T) -> Response {
    Json(value).into_response().with_status(status)
}

// ── HttpError ─────────────────────────────────────────────────────────────────

/// An HTTP error with a status code and a human-readable `detail`.
///
/// Renders as `{"detail": "..."}` with the given status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {detail}")]
pub struct HttpError {
    pub status: u16,
    pub detail: String,
}

impl HttpError {
    pub fn new(status: impl Into<u16>, detail: impl Into<String>) -> Self {
        Self { status: status.into(), detail: detail.into() }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(Status::NotFound, detail)
    }

    /// Uses the status' reason phrase as the detail (`{"detail":"Not Found"}`).
    pub fn from_status(status: Status) -> Self {
        Self::new(status, status.reason())
    }
}

impl Exception for HttpError {
    fn to_response(&self) -> Response {
        json_response(self.status, &json!({ "detail": self.detail }))
    }
}

// ── Handler registry ──────────────────────────────────────────────────────────

type BoxedExceptionHandler = Arc<dyn Fn(&Payload) -> Option<Response> + Send + Sync + 'static>;

/// Exception handlers keyed by the exception's concrete type.
#[derive(Clone, Default)]
pub(crate) struct ExceptionHandlers {
    handlers: HashMap<TypeId, BoxedExceptionHandler>,
}

impl ExceptionHandlers {
    pub(crate) fn insert<E, F>(&mut self, handler: F)
    where
        E: Exception,
        F: Fn(&E) -> Response + Send + Sync + 'static,
    {
        let erased: BoxedExceptionHandler =
            Arc::new(move |payload: &Payload| payload.downcast_ref::<E>().map(&handler));
        self.handlers.insert(TypeId::of::<E>(), erased);
    }

    /// Adds `other`'s handlers for types that have none here yet.
    pub(crate) fn merge_missing(&mut self, other: &ExceptionHandlers) {
        for (type_id, handler) in &other.handlers {
            self.handlers
                .entry(*type_id)
                .or_insert_with(|| Arc::clone(handler));
        }
    }

    /// Swaps a raised exception's default response for its handler's, if one
    /// is registered. Responses without a raised exception pass through.
    pub(crate) fn apply(&self, mut response: Response) -> Response {
        let Some(raised) = response.raised.take() else {
            return response;
        };
        let handled = self.handlers
            .get(&raised.type_id)
            .and_then(|handler| handler(&*raised.payload));
        match handled {
            Some(mut replacement) => {
                replacement.raised = Some(raised);
                replacement
            }
            None => {
                response.raised = Some(raised);
                response
            }
        }
    }
}

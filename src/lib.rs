//! # showcase
//!
//! A small HTTP/JSON framework and the tutorial lessons built on it: path
//! parameters, CRUD over an in-memory table, router composition, exception
//! handlers, validated request models, response models, and a small social
//! API of posts and comments.
//!
//! The framework part is what every lesson leans on:
//!
//! - Radix-tree routing per method via [`matchit`], composable with
//!   [`Router::nest`]
//! - Typed extraction: [`Request::path_param`], [`Request::json`],
//!   [`Request::valid_json`] (constraints via `validator`) and injected state
//!   via [`Request::state`]
//! - Errors as values: handlers raise any [`Exception`]; the router maps it to
//!   a response, through a registered exception handler when there is one
//! - hyper HTTP/1.1 + HTTP/2, graceful shutdown on SIGTERM / Ctrl-C
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use showcase::{HttpError, Json, Raised, Request, Router, Server, Status};
//! use showcase::store::{Record, Table};
//!
//! #[derive(Clone, serde::Serialize)]
//! struct Note { id: i64, text: String }
//!
//! impl Record for Note {
//!     fn id(&self) -> i64 { self.id }
//! }
//!
//! async fn get_note(req: Request) -> Result<Json<Note>, Raised> {
//!     let id: i64 = req.path_param("id")?;
//!     let notes: Table<Note> = req.state()?;
//!     let note = notes.get(id).await.ok_or_else(|| HttpError::not_found("Note not found"))?;
//!     Ok(Json(note))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), showcase::Error> {
//!     let app = Router::new()
//!         .get("/notes/{id}", get_note)
//!         .with_state(Table::<Note>::new());
//!
//!     Server::bind("127.0.0.1:8000".parse().unwrap()).serve(app).await
//! }
//! ```

mod error;
mod exception;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod validation;

pub mod config;
pub mod lessons;
pub mod store;
pub mod testing;

pub use config::Config;
pub use error::Error;
pub use exception::{Exception, HttpError, Raised, json_response};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::Table;
pub use validation::{ErrorDetail, RequestValidationError};

//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Routers compose: a
//! router built for one resource can be nested under a path prefix in
//! another, and the outer router owns the injected state and exception
//! handlers for everything it serves.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use http::Extensions;
use matchit::Router as MatchitRouter;
use tracing::{info, warn};

use crate::exception::{Exception, ExceptionHandlers, HttpError};
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

struct Route {
    method: Method,
    path: String,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve)
/// or a [`TestClient`](crate::testing::TestClient). Every builder method
/// returns `self` so registrations chain.
pub struct Router {
    routes: Vec<Route>,
    trees: HashMap<Method, MatchitRouter<BoxedHandler>>,
    state: Extensions,
    exception_handlers: ExceptionHandlers,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            trees: HashMap::new(),
            state: Extensions::new(),
            exception_handlers: ExceptionHandlers::default(),
        }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` or
    /// `req.path_param::<T>("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or conflicts with an existing route
    /// for the same method. Routes are fixed at startup, so this surfaces on
    /// the first run.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.add(method, path, handler.into_boxed_handler())
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Mount every route of `router` under `prefix`.
    ///
    /// A nested `/` route answers at both `/prefix` and `/prefix/`. State and
    /// exception handlers of the nested router are merged in; where both
    /// routers define the same kind, the outer one wins.
    ///
    /// ```rust
    /// # use showcase::{Request, Router};
    /// # async fn list_books(_: Request) -> &'static str { "[]" }
    /// let books = Router::new().get("/", list_books);
    /// let app = Router::new().nest("/books", books);
    /// # let _ = app;
    /// ```
    pub fn nest(mut self, prefix: &str, router: Router) -> Self {
        let prefix = normalize_prefix(prefix);
        let Router { routes, state, exception_handlers, .. } = router;

        for route in routes {
            if route.path == "/" && !prefix.is_empty() {
                self = self.add(route.method, &prefix, Arc::clone(&route.handler));
                self = self.add(route.method, &format!("{prefix}/"), route.handler);
            } else {
                self = self.add(route.method, &format!("{prefix}{}", route.path), route.handler);
            }
        }

        let mut merged = state;
        merged.extend(std::mem::take(&mut self.state));
        self.state = merged;

        let mut handlers = std::mem::take(&mut self.exception_handlers);
        handlers.merge_missing(&exception_handlers);
        self.exception_handlers = handlers;
        self
    }

    /// Inject `state` into every request; handlers read it back with
    /// [`Request::state`]. One value per type.
    pub fn with_state<S: Clone + Send + Sync + 'static>(mut self, state: S) -> Self {
        self.state.insert(state);
        self
    }

    /// Map every raised `E` to the response `handler` builds, instead of
    /// `E`'s default response.
    pub fn exception_handler<E, F>(mut self, handler: F) -> Self
    where
        E: Exception,
        F: Fn(&E) -> Response + Send + Sync + 'static,
    {
        self.exception_handlers.insert(handler);
        self
    }

    fn add(mut self, method: Method, path: &str, handler: BoxedHandler) -> Self {
        self.trees
            .entry(method)
            .or_default()
            .insert(path, Arc::clone(&handler))
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self.routes.push(Route { method, path: path.to_owned(), handler });
        self
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(BoxedHandler, HashMap<String, String>), Status> {
        if let Some(matched) = self.trees.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Ok((handler, params));
        }

        let other_method_matches = self.trees.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok());
        if other_method_matches {
            Err(Status::MethodNotAllowed)
        } else {
            Err(Status::NotFound)
        }
    }

    /// Routes one request and produces one response.
    ///
    /// Exception handlers only see what route handlers raise. Routing misses
    /// always answer with the default `404`/`405` body.
    pub async fn handle(&self, mut req: Request) -> Response {
        let started = Instant::now();
        let method = req.method;
        let path = req.path.clone();

        let response = match self.lookup(method, &path) {
            Ok((handler, params)) => {
                req.params = params;
                req.extensions = self.state.clone();
                self.exception_handlers.apply(handler.call(req).await)
            }
            Err(status) => HttpError::from_status(status).to_response(),
        };

        log_request(&method, &path, &response, started);
        response
    }

    /// Answers a request whose method is not one [`Method`] can name.
    pub(crate) fn reject_method(&self, method: &http::Method, path: &str) -> Response {
        let started = Instant::now();
        let response = HttpError::from_status(Status::MethodNotAllowed).to_response();
        log_request(method, path, &response, started);
        response
    }
}

fn log_request(method: &dyn fmt::Display, path: &str, response: &Response, started: Instant) {
    let status = response.status;
    let elapsed_us = started.elapsed().as_micros() as u64;
    if status >= 500 {
        warn!(%method, %path, status, elapsed_us, exception = ?response.exception(), "request failed");
    } else {
        info!(%method, %path, status, elapsed_us, "request");
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// `"books"`, `"/books/"` and `"//books"` all become `"/books"`; an empty
/// prefix stays empty so nested paths are mounted at the root.
fn normalize_prefix(prefix: &str) -> String {
    prefix
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| format!("/{s}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::Raised;
    use crate::response::Json;
    use bytes::Bytes;
    use http::HeaderMap;

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path.to_owned(), None, HeaderMap::new(), Bytes::new())
    }

    async fn echo_id(req: Request) -> Result<String, Raised> {
        let id: u32 = req.path_param("id")?;
        Ok(format!("id={id}"))
    }

    #[test]
    fn prefixes_are_normalized() {
        assert_eq!(normalize_prefix("books"), "/books");
        assert_eq!(normalize_prefix("//books//"), "/books");
        assert_eq!(normalize_prefix("/api/v1"), "/api/v1");
        assert_eq!(normalize_prefix("/"), "");
    }

    #[tokio::test]
    async fn routes_by_method_and_path() {
        let app = Router::new().get("/items/{id}", echo_id);

        let res = app.handle(request(Method::Get, "/items/9")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"id=9");
    }

    #[tokio::test]
    async fn unknown_path_is_404_and_wrong_method_is_405() {
        let app = Router::new().get("/items/{id}", echo_id);

        let res = app.handle(request(Method::Get, "/nope")).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), br#"{"detail":"Not Found"}"#);

        let res = app.handle(request(Method::Delete, "/items/9")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.body(), br#"{"detail":"Method Not Allowed"}"#);
    }

    #[tokio::test]
    async fn nested_root_answers_with_and_without_slash() {
        let books = Router::new()
            .get("/", |_req: Request| async { "all" })
            .get("/{id}", echo_id);
        let app = Router::new().nest("books", books);

        for path in ["/books", "/books/"] {
            let res = app.handle(request(Method::Get, path)).await;
            assert_eq!(res.body(), b"all", "{path}");
        }
        let res = app.handle(request(Method::Get, "/books/3")).await;
        assert_eq!(res.body(), b"id=3");
    }

    #[tokio::test]
    async fn state_reaches_nested_handlers() {
        #[derive(Clone)]
        struct Greeting(&'static str);

        let inner = Router::new().get("/", |req: Request| async move {
            req.state::<Greeting>().map(|g| Json(g.0))
        });
        let app = Router::new().nest("/hello", inner).with_state(Greeting("hi"));

        let res = app.handle(request(Method::Get, "/hello")).await;
        assert_eq!(res.body(), br#""hi""#);
    }

    #[tokio::test]
    async fn exception_handler_sees_raised_errors_but_not_routing_misses() {
        let app = Router::new()
            .get("/teapot", |_req: Request| async {
                Err::<&'static str, _>(HttpError::new(500u16, "boom"))
            })
            .exception_handler(|e: &HttpError| Response::status(e.status).with_status(418u16));

        let res = app.handle(request(Method::Get, "/teapot")).await;
        assert_eq!(res.status_code(), 418);

        let res = app.handle(request(Method::Get, "/missing")).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), br#"{"detail":"Not Found"}"#);

        let res = app.handle(request(Method::Post, "/teapot")).await;
        assert_eq!(res.status_code(), 405);
        assert!(res.exception().is_none());
    }

    #[test]
    fn unnameable_method_is_405() {
        let app = Router::new().get("/", |_req: Request| async { "root" });
        let method = http::Method::from_bytes(b"BREW").unwrap();

        let res = app.reject_method(&method, "/");
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.body(), br#"{"detail":"Method Not Allowed"}"#);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new()
            .get("/items/{id}", echo_id)
            .get("/items/{id}", echo_id);
    }
}

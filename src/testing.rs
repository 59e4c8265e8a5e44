//! In-process test client.
//!
//! [`TestClient`] sends requests straight through [`Router::handle`], the same
//! path the server takes after reading a request off the socket, without
//! binding a port.
//!
//! ```rust
//! use showcase::testing::TestClient;
//! use showcase::{Json, Request, Router};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = Router::new().get("/", |_req: Request| async { Json("hello") });
//! let client = TestClient::new(app);
//!
//! let res = client.get("/").await;
//! assert_eq!(res.status(), 200);
//! assert_eq!(res.json::<String>().unwrap(), "hello");
//! # }
//! ```

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Drives a [`Router`] without a network.
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::Get, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::Delete, uri, None).await
    }

    /// POST with no body at all.
    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(Method::Post, uri, None).await
    }

    pub async fn post_json<T: Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.request(Method::Post, uri, Some(to_json(body))).await
    }

    pub async fn put_json<T: Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.request(Method::Put, uri, Some(to_json(body))).await
    }

    pub async fn patch_json<T: Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.request(Method::Patch, uri, Some(to_json(body))).await
    }

    /// Sends `body` (raw bytes, tagged `application/json` when present) to
    /// `uri`, which may carry a query string.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Vec<u8>>) -> TestResponse {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (uri.to_owned(), None),
        };

        let mut headers = HeaderMap::new();
        if body.is_some() {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let request = Request::new(method, path, query, headers, Bytes::from(body.unwrap_or_default()));
        TestResponse::from(self.router.handle(request).await)
    }
}

// Serialising plain test fixtures cannot fail; a failure is a broken fixture.
fn to_json<T: Serialize>(body: &T) -> Vec<u8> {
    serde_json::to_vec(body).unwrap_or_else(|e| panic!("test body is not serialisable: {e}"))
}

/// A response captured by [`TestClient`].
#[derive(Debug)]
pub struct TestResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl TestResponse {
    pub fn status(&self) -> u16 { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

impl From<Response> for TestResponse {
    fn from(res: Response) -> Self {
        Self { status: res.status, headers: res.headers, body: res.body }
    }
}

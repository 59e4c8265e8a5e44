//! Router composition: the books and authors routers are built on their own
//! and mounted under `/books` and `/authors`.

mod authors;
mod books;

use serde_json::{Value, json};

use crate::{Json, Request, Router};

pub fn router() -> Router {
    Router::new()
        .get("/", read_root)
        .nest("/books", books::router())
        .nest("/authors", authors::router())
}

async fn read_root(_req: Request) -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

use serde::Serialize;

use crate::store::Record;
use crate::{HttpError, Json, Raised, Request, Router, Table};

#[derive(Clone, Debug, Serialize)]
pub struct Author {
    pub author_id: i64,
    pub name: String,
}

impl Record for Author {
    fn id(&self) -> i64 { self.author_id }
}

type Authors = Table<Author>;

pub fn router() -> Router {
    let authors = ["F. Scott Fitzgerald", "Fyodor Dostoevsky", "J.R.R. Tolkien", "Harper Lee"]
        .into_iter()
        .zip(1..)
        .map(|(name, author_id)| Author { author_id, name: name.into() })
        .collect();

    Router::new()
        .get("/", read_authors)
        .get("/{author_id}", read_author)
        .with_state(Authors::with_rows(authors))
}

async fn read_authors(req: Request) -> Result<Json<Vec<Author>>, Raised> {
    let authors: Authors = req.state()?;
    Ok(Json(authors.list().await))
}

async fn read_author(req: Request) -> Result<Json<Author>, Raised> {
    let author_id: i64 = req.path_param("author_id")?;
    let authors: Authors = req.state()?;
    let author = authors
        .get(author_id)
        .await
        .ok_or_else(|| HttpError::not_found("Author not found"))?;
    Ok(Json(author))
}

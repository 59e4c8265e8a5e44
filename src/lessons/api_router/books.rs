use serde::Serialize;

use crate::store::Record;
use crate::{HttpError, Json, Raised, Request, Router, Table};

#[derive(Clone, Debug, Serialize)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
}

impl Record for Book {
    fn id(&self) -> i64 { self.book_id }
}

type Books = Table<Book>;

pub fn router() -> Router {
    let books = [
        (1, "The Great Gatsby", "F. Scott Fitzgerald"),
        (2, "Crime and Punishment", "Fyodor Dostoevsky"),
        (3, "The Lord of the Rings", "J.R.R. Tolkien"),
        (4, "To Kill a Mockingbird", "Harper Lee"),
    ]
    .into_iter()
    .map(|(book_id, title, author)| Book { book_id, title: title.into(), author: author.into() })
    .collect();

    Router::new()
        .get("/", read_books)
        .get("/{book_id}", read_book)
        .with_state(Books::with_rows(books))
}

async fn read_books(req: Request) -> Result<Json<Vec<Book>>, Raised> {
    let books: Books = req.state()?;
    Ok(Json(books.list().await))
}

async fn read_book(req: Request) -> Result<Json<Book>, Raised> {
    let book_id: i64 = req.path_param("book_id")?;
    let books: Books = req.state()?;
    let book = books.get(book_id).await.ok_or_else(|| HttpError::not_found("Book not found"))?;
    Ok(Json(book))
}

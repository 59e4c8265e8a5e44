//! A small social API: posts, and comments attached to posts.

pub mod models;
mod post;

use crate::Router;
use crate::lessons::social::models::{Comment, Post};
use crate::store::Table;

/// The social API's tables. Clones share the same rows.
#[derive(Clone, Default)]
pub struct SocialDb {
    pub posts: Table<Post>,
    pub comments: Table<Comment>,
}

impl SocialDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn clear(&self) {
        self.posts.clear().await;
        self.comments.clear().await;
    }
}

pub fn router() -> Router {
    router_with(SocialDb::new())
}

/// Serves the social API over `db`, so callers keep a handle on the tables.
pub fn router_with(db: SocialDb) -> Router {
    post::router().with_state(db)
}

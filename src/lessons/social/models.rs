use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Deserialize)]
pub struct PostIn {
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub body: String,
}

impl Record for Post {
    fn id(&self) -> i64 { self.id }
}

#[derive(Debug, Deserialize)]
pub struct CommentIn {
    pub body: String,
    pub post_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub post_id: i64,
}

impl Record for Comment {
    fn id(&self) -> i64 { self.id }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
}

use crate::lessons::social::SocialDb;
use crate::lessons::social::models::{Comment, CommentIn, Post, PostIn, PostWithComments};
use crate::{HttpError, Json, Raised, Request, Router, Status};

pub fn router() -> Router {
    Router::new()
        .post("/posts", create_post)
        .get("/posts", get_all_posts)
        .post("/comments", create_comment)
        .get("/posts/{post_id}/comments", get_comments_on_post)
        .get("/posts/{post_id}", get_post_with_comments)
}

async fn find_post(db: &SocialDb, post_id: i64) -> Result<Post, HttpError> {
    db.posts
        .get(post_id)
        .await
        .ok_or_else(|| HttpError::not_found("Post not found"))
}

async fn create_post(req: Request) -> Result<(Status, Json<Post>), Raised> {
    let input: PostIn = req.json()?;
    let db: SocialDb = req.state()?;
    let post = db.posts.insert_with(|id| Post { id, body: input.body }).await;
    Ok((Status::Created, Json(post)))
}

async fn get_all_posts(req: Request) -> Result<Json<Vec<Post>>, Raised> {
    let db: SocialDb = req.state()?;
    Ok(Json(db.posts.list().await))
}

async fn create_comment(req: Request) -> Result<(Status, Json<Comment>), Raised> {
    let input: CommentIn = req.json()?;
    let db: SocialDb = req.state()?;
    let post = find_post(&db, input.post_id).await?;
    let comment = db
        .comments
        .insert_with(|id| Comment { id, body: input.body, post_id: post.id })
        .await;
    Ok((Status::Created, Json(comment)))
}

async fn get_comments_on_post(req: Request) -> Result<Json<Vec<Comment>>, Raised> {
    let post_id: i64 = req.path_param("post_id")?;
    let db: SocialDb = req.state()?;
    Ok(Json(db.comments.filter(|c| c.post_id == post_id).await))
}

async fn get_post_with_comments(req: Request) -> Result<Json<PostWithComments>, Raised> {
    let post_id: i64 = req.path_param("post_id")?;
    let db: SocialDb = req.state()?;
    let post = find_post(&db, post_id).await?;
    let comments = db.comments.filter(|c| c.post_id == post_id).await;
    Ok(Json(PostWithComments { post, comments }))
}

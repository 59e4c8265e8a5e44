use serde_json::{Value, json};
use showcase::lessons::social::models::{Comment, Post, PostWithComments};
use showcase::lessons::social::{self, SocialDb};
use showcase::testing::TestClient;

fn client() -> TestClient {
    TestClient::new(social::router())
}

async fn create_post(client: &TestClient, body: &str) -> Post {
    client.post_json("/posts", &json!({ "body": body })).await.json().unwrap()
}

async fn create_comment(client: &TestClient, body: &str, post_id: i64) -> Comment {
    client
        .post_json("/comments", &json!({ "body": body, "post_id": post_id }))
        .await
        .json()
        .unwrap()
}

#[tokio::test]
async fn create_post_returns_201_and_first_id() {
    let client = client();

    let res = client.post_json("/posts", &json!({ "body": "Some Post" })).await;

    assert_eq!(res.status(), 201);
    assert_eq!(res.json::<Post>().unwrap(), Post { id: 1, body: "Some Post".into() });
}

#[tokio::test]
async fn post_ids_increment() {
    let client = client();
    let first = create_post(&client, "one").await;
    let second = create_post(&client, "two").await;
    assert_eq!((first.id, second.id), (1, 2));
}

#[tokio::test]
async fn create_post_missing_data_is_422() {
    let client = client();

    let res = client.post_json("/posts", &json!({})).await;
    assert_eq!(res.status(), 422);
    let body: Value = res.json().unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["body", "body"]));
    assert_eq!(body["detail"][0]["type"], "missing");

    let res = client.post("/posts").await;
    assert_eq!(res.status(), 422);
}

#[tokio::test]
async fn get_all_posts() {
    let client = client();
    let created = create_post(&client, "Post 1").await;

    let res = client.get("/posts").await;

    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Vec<Post>>().unwrap(), vec![created]);
}

#[tokio::test]
async fn create_comment_links_post() {
    let client = client();
    let post = create_post(&client, "Post 1").await;

    let res = client
        .post_json("/comments", &json!({ "body": "A Comment", "post_id": post.id }))
        .await;

    assert_eq!(res.status(), 201);
    assert_eq!(
        res.json::<Comment>().unwrap(),
        Comment { id: 1, body: "A Comment".into(), post_id: post.id },
    );
}

#[tokio::test]
async fn comment_on_missing_post_is_404() {
    let client = client();

    let res = client.post_json("/comments", &json!({ "body": "orphan", "post_id": 9 })).await;

    assert_eq!(res.status(), 404);
    assert_eq!(res.json::<Value>().unwrap(), json!({ "detail": "Post not found" }));
}

#[tokio::test]
async fn get_comments_on_post() {
    let client = client();
    let post = create_post(&client, "Post 1").await;
    let comment = create_comment(&client, "Comment 1", post.id).await;

    let res = client.get(&format!("/posts/{}/comments", post.id)).await;

    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Vec<Comment>>().unwrap(), vec![comment]);
}

#[tokio::test]
async fn get_comments_when_no_comments() {
    let client = client();
    let post = create_post(&client, "Post 1").await;

    let res = client.get(&format!("/posts/{}/comments", post.id)).await;

    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().unwrap(), json!([]));
}

#[tokio::test]
async fn get_post_with_comments() {
    let client = client();
    let post = create_post(&client, "Post 1").await;
    let comment = create_comment(&client, "Comment 1", post.id).await;

    let res = client.get(&format!("/posts/{}", post.id)).await;

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.json::<PostWithComments>().unwrap(),
        PostWithComments { post, comments: vec![comment] },
    );
}

#[tokio::test]
async fn get_missing_post_with_comments() {
    let client = client();
    let post = create_post(&client, "Post 1").await;
    create_comment(&client, "Comment 1", post.id).await;

    let res = client.get(&format!("/posts/{}", post.id + 1)).await;

    assert_eq!(res.status(), 404);
    assert_eq!(res.json::<Value>().unwrap(), json!({ "detail": "Post not found" }));
}

#[tokio::test]
async fn clearing_the_db_resets_ids() {
    let db = SocialDb::new();
    let client = TestClient::new(social::router_with(db.clone()));
    create_post(&client, "before").await;

    db.clear().await;

    assert_eq!(create_post(&client, "after").await.id, 1);
    assert_eq!(db.posts.len().await, 1);
}

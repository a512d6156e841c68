use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

pub type Db = Arc<RwLock<BTreeMap<u64, Post>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Build the router with `posts` already stored.
pub fn app_with(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        posts.into_iter().map(|post| (post.id, post)).collect(),
    ));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).delete(delete_post))
        .with_state(db)
}

/// A handful of posts for local runs.
pub fn demo_posts() -> Vec<Post> {
    [
        (1, "sunt aut facere", "quia et suscipit suscipit recusandae"),
        (2, "qui est esse", "est rerum tempore vitae sequi sint"),
        (3, "ea molestias quasi", "et iusto sed quo iure voluptatem"),
    ]
    .into_iter()
    .map(|(id, title, body)| Post {
        id,
        title: title.to_string(),
        body: body.to_string(),
        user_id: 1,
    })
    .collect()
}

pub async fn run_with(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(posts)).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.read().await;
    Json(posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), StatusCode> {
    let mut posts = db.write().await;
    let id = match posts.keys().next_back() {
        None => 1,
        Some(last) => last.checked_add(1).ok_or_else(|| {
            tracing::error!(last, "post ids exhausted");
            StatusCode::INTERNAL_SERVER_ERROR
        })?,
    };
    let post = Post {
        id,
        title: input.title,
        body: input.body,
        user_id: input.user_id,
    };
    posts.insert(id, post.clone());
    tracing::debug!(id, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let posts = db.read().await;
    posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut posts = db.write().await;
    match posts.remove(&id) {
        Some(_) => {
            tracing::debug!(id, "deleted post");
            Ok(Json(serde_json::json!({})))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

//! Posts page: a list of posts with add, edit and delete.
//!
//! # Overview
//! `PostsPage` mounts onto a `Document` containing `#posts-list` and
//! `#add-post`, loads the first page of posts through `PostsApi`, and reacts
//! to clicks dispatched through `PostsPage::click`.
//!
//! # Design
//! - The network is reached only through the `Transport` trait and user input
//!   only through the `Prompter` trait, so hosts decide how both happen.
//! - The document is an arena of elements addressed by `NodeId`; listeners
//!   are plain `Listener` values stored on nodes.
//! - Edits stay local. Adds and deletes touch the document only after the
//!   server answered with success.

pub mod api;
pub mod controller;
pub mod dom;
pub mod error;
pub mod prompt;
pub mod renderer;
pub mod transport;

pub use api::PostsApi;
pub use controller::{page_skeleton, Listener, PostsPage, ADD_POST_ID, POSTS_LIST_ID};
pub use dom::{Document, NodeId};
pub use error::ViewError;
pub use prompt::{Prompter, ScriptedPrompter};
pub use renderer::{create_post_item, edit_post_item, PostItem};
pub use transport::{Transport, UreqTransport};

#[cfg(test)]
pub(crate) mod testing {
    use posts_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, NewPost, Post};

    use crate::transport::Transport;

    /// In-memory stand-in for the posts service.
    #[derive(Debug, Default)]
    pub struct FakeServer {
        pub posts: Vec<Post>,
        pub requests: Vec<HttpRequest>,
        /// Answer every request with this status and no body.
        pub fail_with: Option<u16>,
        /// Fail before any response, like a dropped connection.
        pub unreachable: bool,
        /// Hand out this id for every created post.
        pub fixed_id: Option<u64>,
    }

    impl FakeServer {
        pub fn with_posts(count: u64) -> Self {
            let posts = (1..=count)
                .map(|id| Post {
                    id,
                    title: format!("Post {id}"),
                    body: format!("Body {id}"),
                    user_id: 1,
                })
                .collect();
            Self {
                posts,
                ..Self::default()
            }
        }

        pub fn ids(&self) -> Vec<u64> {
            self.posts.iter().map(|p| p.id).collect()
        }

        fn respond(&mut self, request: &HttpRequest) -> HttpResponse {
            let (status, body) = match request.method {
                HttpMethod::Get => (200, serde_json::to_string(&self.posts).unwrap()),
                HttpMethod::Post => {
                    let input: NewPost =
                        serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                    let id = self
                        .fixed_id
                        .unwrap_or_else(|| self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1);
                    let post = Post {
                        id,
                        title: input.title,
                        body: input.body,
                        user_id: input.user_id,
                    };
                    self.posts.push(post.clone());
                    (201, serde_json::to_string(&post).unwrap())
                }
                HttpMethod::Delete => {
                    let id: u64 = request.path.rsplit('/').next().unwrap().parse().unwrap();
                    match self.posts.iter().position(|p| p.id == id) {
                        Some(index) => {
                            self.posts.remove(index);
                            (200, "{}".to_string())
                        }
                        None => (404, String::new()),
                    }
                }
            };
            HttpResponse {
                status,
                headers: Vec::new(),
                body,
            }
        }
    }

    impl Transport for FakeServer {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.push(request.clone());
            if self.unreachable {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            if let Some(status) = self.fail_with {
                return Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: String::new(),
                });
            }
            Ok(self.respond(&request))
        }
    }
}

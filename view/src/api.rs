//! The three network calls the page makes, executed through a `Transport`.
//!
//! Each call logs its failure and hands the error back, so callers decide
//! whether to give up quietly.

use posts_core::{ApiError, NewPost, Post, PostsClient};

use crate::transport::Transport;

/// `PostsClient` paired with something that can run its requests.
#[derive(Debug)]
pub struct PostsApi<T> {
    client: PostsClient,
    transport: T,
}

impl<T: Transport> PostsApi<T> {
    pub fn new(client: PostsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PostsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Fetch the first page of posts.
    #[tracing::instrument(skip(self))]
    pub fn fetch_posts(&mut self) -> Result<Vec<Post>, ApiError> {
        let request = self.client.build_list_posts();
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.client.parse_list_posts(response));
        match &result {
            Ok(posts) => tracing::debug!(count = posts.len(), "fetched posts"),
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "error fetching posts");
            }
        }
        result
    }

    /// Create a post; the returned copy carries the server-assigned id.
    #[tracing::instrument(skip(self, post), fields(title = %post.title))]
    pub fn add_post(&mut self, post: &NewPost) -> Result<Post, ApiError> {
        let result = self
            .client
            .build_create_post(post)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_create_post(response));
        match &result {
            Ok(created) => tracing::debug!(id = created.id, "added post"),
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "error adding post");
            }
        }
        result
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_post(&mut self, id: u64) -> Result<(), ApiError> {
        let request = self.client.build_delete_post(id);
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.client.parse_delete_post(response));
        match &result {
            Ok(()) => tracing::debug!("deleted post"),
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "error deleting post");
            }
        }
        result
    }
}

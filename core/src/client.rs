//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only the collection endpoint and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPost, Post};

/// The public endpoint the client talks to unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts/";

/// How many posts a listing keeps.
pub const POSTS_PAGE_SIZE: usize = 2;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Synchronous, stateless client for the posts collection.
#[derive(Debug, Clone)]
pub struct PostsClient {
    endpoint: String,
}

impl Default for PostsClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl PostsClient {
    /// `endpoint` is the URL of the collection itself, e.g. `http://host/posts`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint.clone(),
            headers: vec![("Content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_post(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.endpoint),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parse a listing, keeping only the first `POSTS_PAGE_SIZE` entries.
    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response)?;
        let mut posts: Vec<Post> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        posts.truncate(POSTS_PAGE_SIZE);
        Ok(posts)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Any 2xx counts as deleted; the body is ignored.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

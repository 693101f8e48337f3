use axum::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::catalog::types::{DetailEnvelope, ListEnvelope, MovieDetails, MovieList};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("catalog returned status {0:?}")]
    Upstream(String),
}

/// Read-only client for the upstream movie catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_movies(&self, page: u32, limit: u32) -> Result<MovieList, CatalogError>;
    async fn movie_details(&self, movie_id: u64) -> Result<Option<MovieDetails>, CatalogError>;
}

#[derive(Clone)]
pub struct YtsCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl YtsCatalog {
    pub fn new(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CatalogClient for YtsCatalog {
    async fn list_movies(&self, page: u32, limit: u32) -> Result<MovieList, CatalogError> {
        let url = format!(
            "{}/list_movies.json?page={}&limit={}",
            self.base_url, page, limit
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let envelope = response.json::<ListEnvelope>().await?;
        if envelope.status != "ok" {
            return Err(CatalogError::Upstream(
                envelope.status_message.unwrap_or(envelope.status),
            ));
        }

        debug!(page, limit, count = envelope.data.movies.len(), "catalog list fetched");
        Ok(MovieList {
            movie_count: envelope.data.movie_count,
            movies: envelope.data.movies,
        })
    }

    async fn movie_details(&self, movie_id: u64) -> Result<Option<MovieDetails>, CatalogError> {
        let url = format!("{}/movie_details.json?movie_id={}", self.base_url, movie_id);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let envelope = response.json::<DetailEnvelope>().await?;
        if envelope.status != "ok" {
            return Err(CatalogError::Upstream(envelope.status));
        }

        // Unknown ids come back as a zeroed movie object, not an error.
        let movie = envelope.data.movie.filter(|m| m.id != 0);
        debug!(movie_id, found = movie.is_some(), "catalog detail fetched");
        Ok(movie)
    }
}

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, instrument};

use crate::{
    catalog::client::CatalogError,
    catalog::types::{FeaturedResponse, MovieDetails, MovieList},
    error::ApiError,
    state::AppState,
};

const MAX_LIMIT: u32 = 50;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/featured", get(featured_movies))
        .route("/movies/:id", get(movie_details))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}
fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    20
}

fn upstream(e: CatalogError) -> ApiError {
    error!(error = %e, "catalog fetch failed");
    ApiError::Upstream("Can't fetch movies".into())
}

#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<MovieList>, ApiError> {
    let page = q.page.max(1);
    let limit = q.limit.clamp(1, MAX_LIMIT);
    let list = state
        .catalog
        .list_movies(page, limit)
        .await
        .map_err(upstream)?;
    Ok(Json(list))
}

/// The featured window: a fixed upstream page sliced at the rotating index.
#[instrument(skip(state))]
pub async fn featured_movies(
    State(state): State<AppState>,
) -> Result<Json<FeaturedResponse>, ApiError> {
    let cfg = &state.config.catalog;
    let list = state
        .catalog
        .list_movies(cfg.featured_page, cfg.featured_limit)
        .await
        .map_err(upstream)?;

    let index = state.rotation.position(list.movies.len());
    let end = (index + state.rotation.window()).min(list.movies.len());
    let movies = list.movies[index..end].to_vec();

    Ok(Json(FeaturedResponse { index, movies }))
}

#[instrument(skip(state))]
pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MovieDetails>, ApiError> {
    let movie = state.catalog.movie_details(id).await.map_err(|e| {
        error!(error = %e, movie_id = id, "catalog detail fetch failed");
        ApiError::Upstream("Failed to fetch movie data".into())
    })?;

    match movie {
        Some(m) => Ok(Json(m)),
        None => Err(ApiError::NotFound("No movie data available.".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Movie;
    use crate::state::AppState;
    use axum::async_trait;
    use std::sync::Arc;

    struct CannedCatalog {
        movies: Vec<Movie>,
    }

    #[async_trait]
    impl crate::catalog::client::CatalogClient for CannedCatalog {
        async fn list_movies(&self, _page: u32, _limit: u32) -> Result<MovieList, CatalogError> {
            Ok(MovieList {
                movie_count: self.movies.len() as u64,
                movies: self.movies.clone(),
            })
        }

        async fn movie_details(
            &self,
            _movie_id: u64,
        ) -> Result<Option<MovieDetails>, CatalogError> {
            Ok(None)
        }
    }

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: Some(2020),
            rating: Some(7.0),
            summary: None,
            medium_cover_image: None,
        }
    }

    fn state_with_movies(n: u64) -> AppState {
        let fake = AppState::fake();
        AppState::from_parts(
            fake.db,
            fake.config,
            fake.http,
            Arc::new(CannedCatalog {
                movies: (1..=n).map(movie).collect(),
            }),
            fake.rotation,
        )
    }

    #[tokio::test]
    async fn featured_returns_a_window_of_five() {
        let state = state_with_movies(50);
        let Json(response) = featured_movies(State(state)).await.expect("featured ok");
        assert_eq!(response.movies.len(), 5);
        assert_eq!(response.movies[0].id as usize, response.index + 1);
    }

    #[tokio::test]
    async fn featured_with_a_short_list_returns_all_of_it() {
        let state = state_with_movies(3);
        let Json(response) = featured_movies(State(state)).await.expect("featured ok");
        assert_eq!(response.index, 0);
        assert_eq!(response.movies.len(), 3);
    }

    #[tokio::test]
    async fn unknown_movie_id_is_not_found() {
        let state = state_with_movies(0);
        let err = movie_details(State(state), Path(999_999)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}

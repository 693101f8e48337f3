use serde::{Deserialize, Serialize};

/// One movie entry from the upstream list endpoint, trimmed to the fields
/// the browsing views render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub medium_cover_image: Option<String>,
}

/// Full detail record for a single movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description_full: Option<String>,
    #[serde(default)]
    pub large_cover_image: Option<String>,
    #[serde(default)]
    pub download_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A page of the catalog as served by the list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MovieList {
    pub movie_count: u64,
    pub movies: Vec<Movie>,
}

/// The rotating featured window.
#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    pub index: usize,
    pub movies: Vec<Movie>,
}

// Upstream envelopes. The API wraps everything in {status, status_message,
// data} and omits `movies` entirely for an empty page.

#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
    pub data: ListData,
}

#[derive(Debug, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub movie_count: u64,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct DetailEnvelope {
    pub status: String,
    pub data: DetailData,
}

#[derive(Debug, Deserialize)]
pub struct DetailData {
    #[serde(default)]
    pub movie: Option<MovieDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_deserializes_upstream_shape() {
        let json = r#"{
            "status": "ok",
            "status_message": "Query was successful",
            "data": {
                "movie_count": 68123,
                "limit": 50,
                "page_number": 2,
                "movies": [
                    {
                        "id": 5496,
                        "url": "https://yts.mx/movies/example",
                        "title": "Example Movie",
                        "year": 2014,
                        "rating": 7.2,
                        "runtime": 108,
                        "summary": "A movie about examples.",
                        "medium_cover_image": "https://yts.mx/assets/images/movies/m.jpg"
                    }
                ]
            }
        }"#;
        let envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, "ok");
        assert_eq!(envelope.data.movie_count, 68123);
        assert_eq!(envelope.data.movies.len(), 1);
        let movie = &envelope.data.movies[0];
        assert_eq!(movie.id, 5496);
        assert_eq!(movie.year, Some(2014));
        assert_eq!(movie.rating, Some(7.2));
    }

    #[test]
    fn list_envelope_tolerates_missing_movies() {
        let json = r#"{"status":"ok","data":{"movie_count":0}}"#;
        let envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.data.movies.is_empty());
    }

    #[test]
    fn detail_envelope_deserializes_upstream_shape() {
        let json = r#"{
            "status": "ok",
            "data": {
                "movie": {
                    "id": 5496,
                    "title": "Example Movie",
                    "year": 2014,
                    "rating": 7.2,
                    "runtime": 108,
                    "genres": ["Action", "Drama"],
                    "language": "en",
                    "description_full": "A long description.",
                    "large_cover_image": "https://yts.mx/assets/images/movies/l.jpg",
                    "download_count": 123456,
                    "like_count": 789,
                    "url": "https://yts.mx/movies/example"
                }
            }
        }"#;
        let envelope: DetailEnvelope = serde_json::from_str(json).unwrap();
        let movie = envelope.data.movie.unwrap();
        assert_eq!(movie.genres, vec!["Action", "Drama"]);
        assert_eq!(movie.runtime, Some(108));
    }
}

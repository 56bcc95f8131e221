use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    entities::{movie, user},
    error::{AppError, AppResult},
};

/// Query string values by name. A repeated name keeps its first value.
#[derive(Debug, Default)]
pub struct QueryParams(HashMap<String, String>);

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut map = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            map.entry(key).or_insert(value);
        }
        Self(map)
    }
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

/// Filters of `GET /api/movies`. Empty values count as absent.
#[derive(Clone, Debug, Default)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
}

impl MovieFilter {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn genre(&self) -> Option<&str> {
        non_empty(&self.genre)
    }
}

impl From<QueryParams> for MovieFilter {
    fn from(mut params: QueryParams) -> Self {
        Self {
            title: params.take("title"),
            description: params.take("description"),
            genre: params.take("genre"),
        }
    }
}

/// Body of `POST /api/movies` as it arrives on the wire.
#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
}

impl CreateMovieRequest {
    pub fn validate(self) -> AppResult<NewMovie> {
        match (self.title, self.genre) {
            (Some(title), Some(genre)) if !title.is_empty() && !genre.is_empty() => {
                Ok(NewMovie { title, description: self.description, genre })
            },
            _ => Err(AppError::BadRequest("Title and genre are required")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub description: Option<String>,
    pub genre: String,
}

#[derive(Debug, Serialize)]
pub struct UserWithFavorites {
    pub user: user::Model,
    pub favorites: Vec<movie::Model>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i32,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, genre: Option<&str>) -> CreateMovieRequest {
        CreateMovieRequest {
            title: title.map(str::to_string),
            description: None,
            genre: genre.map(str::to_string),
        }
    }

    #[test]
    fn validate_requires_title_and_genre() {
        for (title, genre) in [(None, Some("drama")), (Some("Heat"), None), (Some(""), Some("drama"))]
        {
            let err = request(title, genre).validate().unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[test]
    fn validate_keeps_unknown_genre() {
        let movie = request(Some("Heat"), Some("noir")).validate().unwrap();
        assert_eq!(movie.genre, "noir");
        assert_eq!(movie.description, None);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn repeated_params_keep_first_value() {
        let params = QueryParams::from(pairs(&[("id", "2"), ("id", "1"), ("x", "y")]));
        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.get("x"), Some("y"));
        assert_eq!(params.get("missing"), None);

        let filter =
            MovieFilter::from(QueryParams::from(pairs(&[("title", "matrix"), ("title", "zzz")])));
        assert_eq!(filter.title(), Some("matrix"));
        assert_eq!(filter.genre(), None);
    }

    #[test]
    fn empty_filter_values_are_absent() {
        let filter = MovieFilter {
            title: Some(String::new()),
            description: None,
            genre: Some("drama".into()),
        };
        assert_eq!(filter.title(), None);
        assert_eq!(filter.description(), None);
        assert_eq!(filter.genre(), Some("drama"));
    }
}

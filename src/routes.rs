use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, assets,
    entities::movie,
    error::{AppError, AppResult},
    models::{CreateMovieRequest, Created, MovieFilter, QueryParams, UserWithFavorites},
};

pub async fn index(State(state): State<Arc<AppState>>, req: Request) -> AppResult<Response> {
    let path = state.static_dir.join("index.html");
    assets::serve_file(&path, req, "text/html", "Not Found").await
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<movie::Model>>> {
    let filter = MovieFilter::from(QueryParams::from(pairs));
    Ok(Json(state.catalog.find_movies(&filter).await?))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<UserWithFavorites>> {
    let params = QueryParams::from(pairs);
    let id = parse_user_id(params.get("id"))?;

    let Some(user) = state.catalog.find_user(id).await? else {
        return Err(AppError::NotFound("User not found"));
    };
    let favorites = state.catalog.favorites_of(user.id).await?;

    Ok(Json(UserWithFavorites { user, favorites }))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let req: CreateMovieRequest = serde_json::from_slice(&body)?;
    let new = req.validate()?;
    let id = state.catalog.create_movie(new).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// Anything the route table does not name: `.jpg` assets, otherwise 404.
pub async fn fallback(State(state): State<Arc<AppState>>, req: Request) -> AppResult<Response> {
    let readable = req.method() == Method::GET || req.method() == Method::HEAD;
    if readable && req.uri().path().ends_with(".jpg") {
        return assets::serve_dir(&state.static_dir, req, "image/jpg", "Image not found").await;
    }
    Err(AppError::NotFound("Not Found"))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found")
}

fn parse_user_id(raw: Option<&str>) -> AppResult<i32> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(AppError::BadRequest("User ID is required"));
    };
    raw.parse().map_err(|_| AppError::BadRequest("User ID must be an integer"))
}

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use super::coerce::{coerce_title, coerce_year};
use super::pagination::Page;
use super::types::*;
use crate::db::{DbError, NewMovie};
use crate::error::ApiError;
use crate::server::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Envelope<Vec<MovieRecord>>>, ApiError> {
    let page = Page::from_params(&params);

    let ids = state.db.list_movie_ids(page.offset, page.limit).await?;

    let mut movies = Vec::with_capacity(ids.len());
    for id in ids {
        match state.db.get_movie(id).await {
            Ok(movie) => movies.push(MovieRecord::from(&movie)),
            // Deleted after the id query ran.
            Err(DbError::NotFound(_)) => debug!(id, "Movie vanished while listing"),
            Err(e) => return Err(e.into()),
        }
    }

    // Not consistent with the page above: writes in between can make
    // count and total disagree.
    let total = state.db.count_movies().await?;

    Ok(Json(Envelope::list(movies, total)))
}

pub async fn add_movie(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Envelope<MovieRecord>>, ApiError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))?;

    let fields = body
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("body must be a JSON object".to_string()))?;

    let (Some(title), Some(year)) = (fields.get("title"), fields.get("year")) else {
        return Err(ApiError::BadRequest("title and year are required".to_string()));
    };

    let title = coerce_title(title);
    let year = match coerce_year(year) {
        Ok(year) => year,
        Err(e) => {
            info!("Error adding movie: {}", title);
            return Err(ApiError::Internal(e.to_string()));
        }
    };
    let new_movie = NewMovie { title, year };

    let movie = state.db.create_movie(&new_movie).await?;
    info!("Added movie: {}", movie.title);

    Ok(Json(Envelope::ok(MovieRecord::from(&movie))))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // An id that does not even decode is as unknown as one that does not parse.
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let id: i64 = id.trim().parse().map_err(|_| ApiError::NotFound)?;

    let movie = state.db.get_movie(id).await?;

    if !state.db.delete_movie(movie.id).await? {
        return Err(ApiError::NotFound);
    }
    debug!(id, "Deleted movie");

    if state.config.api.legacy_delete_status {
        Ok((StatusCode::CREATED, Json(serde_json::json!({}))).into_response())
    } else {
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

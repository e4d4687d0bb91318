use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::db::Movie;

/// `modified` is rendered as an ISO 8601 timestamp with a space separator.
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Response body shared by every endpoint, including errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<T>,
    pub meta: Meta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub http_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl Meta {
    pub fn for_status(status: StatusCode) -> Self {
        Self {
            http_code: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            count: None,
            total: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn ok(content: T) -> Self {
        Self {
            content: Some(content),
            meta: Meta::for_status(StatusCode::OK),
        }
    }

    /// Envelope carrying only `meta`, used for errors.
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            content: None,
            meta: Meta::for_status(status),
        }
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(content: Vec<T>, total: u64) -> Self {
        let mut meta = Meta::for_status(StatusCode::OK);
        meta.count = Some(content.len());
        meta.total = Some(total);
        Self {
            content: Some(content),
            meta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub modified: String,
}

impl From<&Movie> for MovieRecord {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            modified: movie.modified.format(MODIFIED_FORMAT).to_string(),
        }
    }
}

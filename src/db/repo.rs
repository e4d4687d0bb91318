use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait MovieRepo: Send + Sync {
    /// Ids of one page of movies, ordered by id. `None` means no limit.
    async fn list_movie_ids(&self, offset: u64, limit: Option<u64>) -> DbResult<Vec<i64>>;
    async fn get_movie(&self, id: i64) -> DbResult<Movie>;
    async fn count_movies(&self) -> DbResult<u64>;
    async fn create_movie(&self, movie: &NewMovie) -> DbResult<Movie>;
    /// Returns false if there was no such movie.
    async fn delete_movie(&self, id: i64) -> DbResult<bool>;
}

#[async_trait]
pub trait Repository: MovieRepo + Send + Sync {
    async fn close(&self);
}

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Logs one line per request. `route` is the matched route pattern
/// (`/movie/delete/:id`), or `-` when the request fell through to the fallback.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        method = %method,
        url = %uri,
        route = %route,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "HTTP request"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, http::StatusCode, routing::delete, Router};
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    async fn logged_line(uri: &str) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let router = Router::new()
            .route("/movie/delete/:id", delete(|| async { StatusCode::CREATED }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(axum::middleware::from_fn(log_request));
        let req = axum::http::Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router.oneshot(req).await.unwrap();

        captured.text()
    }

    #[tokio::test]
    async fn test_logs_matched_route() {
        let line = logged_line("/movie/delete/42").await;
        assert!(line.contains("route=/movie/delete/:id"), "{}", line);
        assert!(line.contains("url=/movie/delete/42"), "{}", line);
        assert!(line.contains("status=201"), "{}", line);
    }

    #[tokio::test]
    async fn test_logs_fallback_route() {
        let line = logged_line("/nowhere").await;
        assert!(line.contains("url=/nowhere"), "{}", line);
        assert!(!line.contains("route=/movie"), "{}", line);
        assert!(line.contains("status=404"), "{}", line);
    }
}

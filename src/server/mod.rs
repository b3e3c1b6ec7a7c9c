//! Static file server for watch mode

use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};

/// Default address to serve on
pub const DEFAULT_ADDR: &str = ":8080";

/// Parse a serve address: `:8080` and `8080` listen on every interface,
/// anything else must be `host:port`
pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = addr.trim();
    let full = if let Some(port) = addr.strip_prefix(':') {
        format!("0.0.0.0:{}", port)
    } else if !addr.is_empty() && addr.bytes().all(|b| b.is_ascii_digit()) {
        format!("0.0.0.0:{}", addr)
    } else if let Some(port) = addr.strip_prefix("localhost:") {
        format!("127.0.0.1:{}", port)
    } else {
        addr.to_string()
    };

    full.parse().map_err(|_| Error::Address(addr.to_string()))
}

/// Router serving files from `root`
pub fn router(root: PathBuf) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Serve `root` on `addr` until the server fails
pub async fn serve(root: PathBuf, addr: &str) -> Result<()> {
    let socket = parse_addr(addr)?;
    let listener = tokio::net::TcpListener::bind(socket)
        .await
        .map_err(|source| Error::Serve {
            addr: addr.to_string(),
            source,
        })?;

    tracing::info!("listening on http://{} serving {:?}", socket, root);

    axum::serve(listener, router(root))
        .await
        .map_err(|source| Error::Serve {
            addr: addr.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr() {
        assert_eq!(parse_addr(":8080").unwrap(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(parse_addr("9000").unwrap(), "0.0.0.0:9000".parse().unwrap());
        assert_eq!(
            parse_addr("localhost:4000").unwrap(),
            "127.0.0.1:4000".parse().unwrap()
        );
        assert_eq!(
            parse_addr("127.0.0.1:3000").unwrap(),
            "127.0.0.1:3000".parse().unwrap()
        );
    }

    #[test]
    fn test_parse_addr_rejects_garbage() {
        assert!(matches!(parse_addr(""), Err(Error::Address(_))));
        assert!(matches!(parse_addr(":http"), Err(Error::Address(_))));
        assert!(matches!(parse_addr("nowhere"), Err(Error::Address(_))));
    }

    #[tokio::test]
    async fn test_serve_static_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "hello").unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(dir.path().to_path_buf());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /index.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("hello"));
    }

    #[tokio::test]
    async fn test_serve_bind_failure() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let dir = tempfile::tempdir().unwrap();
        let result = serve(dir.path().to_path_buf(), &addr).await;
        assert!(matches!(result, Err(Error::Serve { .. })));
    }
}

//! Web server for cloudstore.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{FilesConfig, ServerConfig};
use crate::file::FileStorage;
use crate::{CloudStoreError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_openapi_router, create_router};

/// Web server for the file API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Opens (and if needed creates) the storage root and removes upload
    /// temp files left by a previous run.
    pub fn new(config: &ServerConfig, files_config: &FilesConfig) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse::<SocketAddr>()
            .map_err(|e| {
                CloudStoreError::Config(format!(
                    "invalid server address {}:{}: {e}",
                    config.host, config.port
                ))
            })?;

        let storage = FileStorage::new(&files_config.storage_path)?;
        tracing::info!("File storage initialized at: {}", files_config.storage_path);

        let removed = storage.cleanup_temp_files()?;
        if removed > 0 {
            tracing::info!(removed_count = removed, "Removed stale upload temp files");
        }

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(storage, files_config)),
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Assemble the full application router.
    fn into_router(self) -> axum::Router {
        create_router(self.app_state, &self.cors_origins)
            .merge(create_health_router())
            .merge(create_openapi_router())
            .layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let router = self.into_router();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let router = self.into_router();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn create_test_configs(temp_dir: &TempDir) -> (ServerConfig, FilesConfig) {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
        };
        let files = FilesConfig {
            storage_path: temp_dir.path().join("store").display().to_string(),
            ..FilesConfig::default()
        };
        (server, files)
    }

    #[test]
    fn test_web_server_new_creates_storage() {
        let temp_dir = TempDir::new().unwrap();
        let (server_config, files_config) = create_test_configs(&temp_dir);
        std::fs::create_dir_all(temp_dir.path().join("store")).unwrap();
        std::fs::write(temp_dir.path().join("store/.upload-stale"), b"x").unwrap();

        let server = WebServer::new(&server_config, &files_config).unwrap();

        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
        assert!(temp_dir.path().join("store").is_dir());
        assert!(!temp_dir.path().join("store/.upload-stale").exists());
    }

    #[test]
    fn test_web_server_invalid_host() {
        let temp_dir = TempDir::new().unwrap();
        let (mut server_config, files_config) = create_test_configs(&temp_dir);
        server_config.host = "not a host".to_string();

        let result = WebServer::new(&server_config, &files_config);
        assert!(matches!(result, Err(CloudStoreError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let temp_dir = TempDir::new().unwrap();
        let (server_config, files_config) = create_test_configs(&temp_dir);

        let server = WebServer::new(&server_config, &files_config).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("OK"));
    }
}

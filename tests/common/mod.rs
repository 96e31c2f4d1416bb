//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use trellis::config::AppConfig;
use trellis::handler::SharedHandler;
use trellis::{HttpServer, Shutdown};

/// A server running on an ephemeral port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start `root` behind the full server stack on 127.0.0.1:0.
pub async fn start_server(root: SharedHandler) -> TestServer {
    start_server_with(AppConfig::default(), root).await
}

pub async fn start_server_with(config: AppConfig, root: SharedHandler) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();

    let server = HttpServer::new(config, root);
    tokio::spawn(async move {
        server.run(listener, signalled).await.unwrap();
    });

    TestServer { addr, shutdown }
}

/// Client without connection pooling so each test request is independent.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

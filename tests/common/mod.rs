//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use portfolio_site::config::SiteConfig;
use portfolio_site::content::Catalog;
use portfolio_site::http::{HttpServer, SiteState};
use portfolio_site::lifecycle::Shutdown;
use tokio::sync::mpsc;

/// A server running in the background for one test.
pub struct TestSite {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<SiteState>,
}

impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestSite {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn bundled_content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
}

pub fn bundled_catalog() -> Catalog {
    Catalog::load(&bundled_content_dir()).unwrap()
}

/// Start the site on `addr` with the given config and content.
pub async fn start_site(addr: SocketAddr, config: SiteConfig, catalog: Catalog) -> TestSite {
    let shutdown = Shutdown::new();
    let (updates, update_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(config, catalog);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, update_rx, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    TestSite {
        addr,
        shutdown,
        updates,
    }
}

/// Client that does not follow redirects or use a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Write a minimal content directory with one project per slug.
#[allow(dead_code)]
pub fn write_content(dir: &Path, slugs: &[&str]) {
    let projects: Vec<serde_json::Value> = slugs
        .iter()
        .enumerate()
        .map(|(idx, slug)| {
            serde_json::json!({
                "id": idx.to_string(),
                "title": format!("Project {}", slug),
                "description": "Short",
                "longDescription": "Long",
                "image": format!("/images/{}.png", slug),
                "technologies": ["Rust"],
                "githubUrl": format!("https://github.com/example/{}", slug),
                "status": "completed",
                "featured": idx == 0,
                "category": "tool",
                "year": 2024,
                "slug": slug,
            })
        })
        .collect();

    std::fs::write(
        dir.join("projects.json"),
        serde_json::json!({ "projects": projects }).to_string(),
    )
    .unwrap();
    std::fs::write(dir.join("services.json"), r#"{"services": []}"#).unwrap();
}

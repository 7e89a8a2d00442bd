use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[clap(env, long, default_value_t = 4000)]
    pub port: u16,

    /// Comma separated list of origins allowed by CORS
    #[clap(env, long, default_value = "http://localhost:5173")]
    pub origin_urls: String,

    #[clap(env, long, default_value = "uploads")]
    pub uploads_dir: PathBuf,

    #[clap(env, long, default_value_t = 100)]
    pub max_upload_files: usize,

    #[clap(env, long, default_value_t = 50 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn allowed_origins(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.origin_urls
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", s))
            })
            .collect()
    }
}

#[cfg(test)]
pub fn test_config(uploads_dir: PathBuf) -> Config {
    Config {
        environment: "test".to_string(),
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        origin_urls: "http://localhost:5173".to_string(),
        uploads_dir,
        max_upload_files: 100,
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

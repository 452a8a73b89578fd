//! Command line and environment configuration.

use clap::Parser;

/// Toy backend for the Leptos Query example gallery.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gallery-server")]
#[command(about = "Serves the gallery examples with simulated latency and flaky endpoints")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "GALLERY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the server to
    #[arg(short, long, env = "GALLERY_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Multiplier applied to every simulated delay. 0 disables latency.
    #[arg(long, env = "GALLERY_LATENCY_SCALE", default_value_t = 1.0)]
    pub latency_scale: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments and environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Address to bind, `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default tracing directive for this crate and the HTTP layer.
    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "info" };
        format!("leptos_query_gallery_server={level},tower_http={level}")
    }
}

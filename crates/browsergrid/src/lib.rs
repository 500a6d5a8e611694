//! browsergrid: Rust client for the BrowserGrid remote browser platform
//!
//! BrowserGrid hosts headless browsers behind an HTTP + WebSocket surface.
//! This crate provides the typed client: validated requests, a classified
//! error taxonomy, one operation per remote capability, and a connection
//! broker that hands raw socket URLs to caller-registered automation
//! drivers.
//!
//! # Examples
//!
//! ## Rendering a page to PDF
//!
//! ```ignore
//! use browsergrid::{Client, ClientConfig, Region};
//! use browsergrid::api::{PaperFormat, PdfRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .token(std::env::var("BROWSERGRID_TOKEN")?)
//!         .region(Region::Us)
//!         .build()?;
//!     let client = Client::new(config);
//!
//!     let request = PdfRequest::builder()
//!         .url("https://example.com")
//!         .format(PaperFormat::A4)
//!         .print_background(true)
//!         .build();
//!     let document = client.render_pdf(request).await?;
//!     std::fs::write("example.pdf", &document)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Branching on failure kinds
//!
//! ```ignore
//! use browsergrid::ErrorKind;
//!
//! match client.health().await {
//!     Ok(health) => println!("service {}", health.status),
//!     Err(e) => match e.kind() {
//!         ErrorKind::Authentication => eprintln!("token rejected, re-authenticate"),
//!         ErrorKind::RateLimit => eprintln!("throttled, slow down"),
//!         ErrorKind::Network => eprintln!("service unreachable"),
//!         _ => eprintln!("failed: {e}"),
//!     },
//! }
//! ```
//!
//! ## Connecting an automation driver
//!
//! ```ignore
//! use browsergrid::{ConnectMode, LaunchOptions};
//!
//! client.register_driver(std::sync::Arc::new(MyPlaywrightDriver::new()));
//! let browser = client
//!     .connect(ConnectMode::Playwright, None, LaunchOptions::new())
//!     .await?;
//! ```

pub mod api;
mod client;
mod config;
pub mod connect;
mod dispatch;
mod error;
pub mod retry;
pub mod util;
mod validate;

// Re-export error types
pub use error::{Error, ErrorKind, Result, TransportSignal, classify};

// Re-export the client and its configuration
pub use client::Client;
pub use config::{
    BrowserFlavor, ClientConfig, ClientConfigBuilder, ConfigUpdate, DEFAULT_TIMEOUT_MS,
    MAX_TIMEOUT_MS, MIN_TIMEOUT_MS, Region,
};

// Re-export the decoded payload type used by the dispatcher contract
pub use dispatch::Payload;

// Re-export the connection broker surface
pub use connect::{
    AutomationDriver, ConnectMode, ConnectionDescriptor, LaunchOptions, ProxySettings,
    RemoteBrowser, build_connection_url,
};

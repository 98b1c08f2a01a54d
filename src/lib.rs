//! Postshot
//!
//! Renders local HTML documents to PNG images at the fixed pixel sizes used by
//! social-media posts (feed, square, story, carousel slides).
//!
//! # Features
//!
//! - **CDP Backend** (default): Uses Chrome DevTools Protocol via headless Chrome
//! - **Backend seam**: the orchestrator is generic over [`Engine`], so any
//!   backend that can load a URL and produce PNG bytes can be plugged in
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "cdp")]
//! # async fn run() -> postshot::Result<()> {
//! use postshot::{preset, render, RenderJob};
//!
//! let viewport = preset::lookup("square").expect("known preset");
//! let job = RenderJob::new("post.html", "out/post.png", viewport);
//! render::render_job::<postshot::cdp::CdpEngine>(&job, &Default::default()).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub mod error;
pub use error::{Error, Result, UsageError};

pub mod cli;
pub mod job;
pub mod preset;
pub mod render;

pub use job::{CarouselBatch, RenderJob};
pub use render::{RenderConfig, WaitStrategy};

#[cfg(feature = "cdp")]
pub mod cdp;

// Async facade: runs a synchronous engine on a worker thread
pub mod async_api;

pub use async_api::{Browser, Page};

/// Viewport dimensions in CSS pixels. With a device pixel ratio of 1 these are
/// also the dimensions of the captured PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    /// Feed post, 4:5.
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1350,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for launching a browser engine
///
/// One engine is launched per [`RenderJob`]; the orchestrator copies this
/// config and replaces `viewport` with the job's dimensions.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Viewport dimensions
    pub viewport: Viewport,
    /// Timeout for individual browser operations in milliseconds
    pub timeout_ms: u64,
    /// Browser binary to launch; `None` lets the backend search the system
    pub chrome_path: Option<PathBuf>,
    /// Whether to keep Chrome's process sandbox enabled
    pub sandbox: bool,
    /// Longest stretch the caller may leave the browser without sending a
    /// command (the settle wait). Backends must keep the session alive for
    /// at least this long plus `timeout_ms`.
    pub quiet_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            timeout_ms: 30000,
            chrome_path: None,
            sandbox: true,
            quiet_period: Duration::from_millis(1500),
        }
    }
}

/// Core trait for headless engine implementations
///
/// Implementations are synchronous and are driven from a dedicated worker
/// thread by [`async_api::Browser`], so they need not be `Send`.
pub trait Engine {
    /// Launch the engine with a page sized to `config.viewport`
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized;

    /// Load a URL and wait for navigation to finish
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Evaluate a JavaScript expression in the page and return its value
    fn evaluate(&mut self, script: &str) -> Result<serde_json::Value>;

    /// Capture the viewport (not the full scrollable page) as PNG bytes
    fn render_png(&self) -> Result<Vec<u8>>;

    /// Close the engine and clean up resources
    fn close(self) -> Result<()>;
}

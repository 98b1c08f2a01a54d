//! Render orchestration: one browser session per job, strictly sequential

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use tokio::time::Instant;
use url::Url;

use crate::async_api::{Browser, Page};
use crate::{CarouselBatch, Engine, EngineConfig, Error, RenderJob, Result};

/// Page-side probe used by [`WaitStrategy::Ready`].
pub const READY_PROBE: &str =
    "document.readyState === 'complete' && (!document.fonts || document.fonts.status === 'loaded')";

/// How long to let the page settle between navigation and capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Sleep unconditionally.
    Fixed(Duration),
    /// Poll [`READY_PROBE`] every `poll` until it holds, for at most `max`.
    /// Hitting the ceiling is not an error; the page is captured as is.
    Ready { poll: Duration, max: Duration },
}

impl WaitStrategy {
    /// Longest time the browser goes without a command while settling.
    pub fn quiet_period(&self) -> Duration {
        match *self {
            WaitStrategy::Fixed(delay) => delay,
            WaitStrategy::Ready { poll, max } => poll.min(max),
        }
    }
}

impl Default for WaitStrategy {
    fn default() -> Self {
        WaitStrategy::Fixed(Duration::from_millis(1500))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub engine: EngineConfig,
    pub wait: WaitStrategy,
}

/// `file://` URL for a local document. Fails before any browser is launched
/// when the document does not exist.
pub fn file_url(path: &Path) -> Result<Url> {
    let path = std::path::absolute(path)?;
    if !path.is_file() {
        return Err(Error::LoadError(format!("{} is not a file", path.display())));
    }
    Url::from_file_path(&path)
        .map_err(|_| Error::LoadError(format!("Cannot build file URL for {}", path.display())))
}

/// Render one job and return the absolute path of the PNG written.
pub async fn render_job<E>(job: &RenderJob, config: &RenderConfig) -> Result<PathBuf>
where
    E: Engine + 'static,
{
    let output = std::path::absolute(&job.output_path)?;
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let url = file_url(&job.input_path)?;

    let engine_config = EngineConfig {
        viewport: job.viewport,
        quiet_period: config.wait.quiet_period(),
        ..config.engine.clone()
    };
    info!("rendering {} at {}", url, job.viewport);
    let browser = Browser::launch::<E>(engine_config).await?;

    // Close regardless of how the capture went; the capture error wins
    let captured = capture(&browser, url.as_str(), &output, config.wait).await;
    let closed = browser.close().await;
    captured?;
    closed?;

    info!("wrote {}", output.display());
    Ok(output)
}

async fn capture(browser: &Browser, url: &str, output: &Path, wait: WaitStrategy) -> Result<()> {
    let page = browser.new_page().await?;
    page.goto(url).await?;
    settle(&page, wait).await?;
    page.screenshot(Some(output)).await?;
    Ok(())
}

async fn settle(page: &Page, wait: WaitStrategy) -> Result<()> {
    match wait {
        WaitStrategy::Fixed(delay) => {
            tokio::time::sleep(delay).await;
            Ok(())
        }
        WaitStrategy::Ready { poll, max } => {
            let deadline = Instant::now() + max;
            loop {
                if page.eval(READY_PROBE).await?.as_bool() == Some(true) {
                    return Ok(());
                }
                if Instant::now() >= deadline {
                    warn!("page not ready after {:?}; capturing anyway", max);
                    return Ok(());
                }
                tokio::time::sleep(poll).await;
            }
        }
    }
}

/// Render every slide in order, one at a time. The first failure aborts the
/// remaining slides. `on_rendered` is called after each PNG is written.
pub async fn render_batch<E, F>(
    batch: &CarouselBatch,
    config: &RenderConfig,
    mut on_rendered: F,
) -> Result<Vec<PathBuf>>
where
    E: Engine + 'static,
    F: FnMut(&RenderJob, &Path),
{
    tokio::fs::create_dir_all(&batch.output_dir).await?;

    let mut written = Vec::with_capacity(batch.len());
    for job in &batch.jobs {
        let output = render_job::<E>(job, config).await?;
        on_rendered(job, &output);
        written.push(output);
    }
    Ok(written)
}

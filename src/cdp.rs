//! Chrome DevTools Protocol adapter implementation

use crate::{Engine, EngineConfig, Error, Result};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::{Emulation, Page};
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

/// CDP-based headless engine implementation (uses the `headless_chrome` crate)
///
/// This adapter launches a headless Chrome instance sized to the job's
/// viewport, manages a single tab, and provides the `Engine` trait
/// implementation over it. Dropping it terminates the browser process.
pub struct CdpEngine {
    browser: Browser,
    tab: Arc<Tab>,
}

/// Headroom on top of the operation timeout and the quiet period before
/// headless_chrome drops an idle DevTools connection.
const IDLE_MARGIN: Duration = Duration::from_secs(10);

/// How long the DevTools connection may stay silent. Covers the longest
/// settle wait plus one full operation timeout.
pub fn idle_timeout(config: &EngineConfig) -> Duration {
    Duration::from_millis(config.timeout_ms) + config.quiet_period + IDLE_MARGIN
}

/// Launch options for one job: headless, sized to the viewport, DPR 1.
pub fn launch_options(config: &EngineConfig) -> Result<LaunchOptions<'static>> {
    // Pin the device pixel ratio so PNG pixels equal viewport pixels
    let args = vec![
        OsStr::new("--force-device-scale-factor=1"),
        OsStr::new("--hide-scrollbars"),
    ];

    LaunchOptions::default_builder()
        .headless(true)
        .sandbox(config.sandbox)
        .window_size(Some((config.viewport.width, config.viewport.height)))
        .path(config.chrome_path.clone())
        .idle_browser_timeout(idle_timeout(config))
        .args(args)
        .build()
        .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))
}

impl Engine for CdpEngine {
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let launch_options = launch_options(&config)?;

        debug!(
            "launching headless chrome at {} (idle timeout {:?})",
            config.viewport, launch_options.idle_browser_timeout
        );
        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        // Window size alone does not fix the viewport in every headless mode
        tab.call_method(Emulation::SetDeviceMetricsOverride {
            width: config.viewport.width,
            height: config.viewport.height,
            device_scale_factor: 1.0,
            mobile: false,
            scale: None,
            screen_width: None,
            screen_height: None,
            position_x: None,
            position_y: None,
            dont_set_visible_size: None,
            screen_orientation: None,
            viewport: None,
            display_feature: None,
            device_posture: None,
        })
        .map_err(|e| Error::InitializationError(format!("Failed to set device metrics: {}", e)))?;

        Ok(Self { browser, tab })
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

        debug!("navigated to {}", self.tab.get_url());
        Ok(())
    }

    fn evaluate(&mut self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| Error::ScriptError(format!("Evaluation failed: {}", e)))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    fn render_png(&self) -> Result<Vec<u8>> {
        // No clip: the capture covers the viewport only
        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::RenderError(format!("Screenshot failed: {}", e)))
    }

    fn close(self) -> Result<()> {
        // Drop the tab before the browser so the child process exits promptly
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;

    #[test]
    fn launch_options_match_viewport() {
        let config = EngineConfig {
            viewport: Viewport::new(1080, 1920),
            sandbox: false,
            ..Default::default()
        };
        let opts = launch_options(&config).unwrap();
        assert_eq!(opts.window_size, Some((1080, 1920)));
        assert!(!opts.sandbox);
        assert!(opts.headless);
        assert!(opts.args.contains(&OsStr::new("--force-device-scale-factor=1")));
    }

    #[test]
    fn idle_timeout_outlasts_long_delay() {
        let config = EngineConfig {
            timeout_ms: 60_000,
            quiet_period: Duration::from_secs(45),
            ..Default::default()
        };
        let opts = launch_options(&config).unwrap();
        assert!(opts.idle_browser_timeout > Duration::from_secs(45) + Duration::from_secs(60));
        assert_eq!(opts.idle_browser_timeout, idle_timeout(&config));
    }

    #[test]
    fn idle_timeout_exceeds_library_default() {
        // headless_chrome closes silent connections after 30s by default
        let opts = launch_options(&EngineConfig::default()).unwrap();
        assert!(opts.idle_browser_timeout > Duration::from_secs(30));
    }

    #[test]
    fn test_cdp_engine_creation() {
        let config = EngineConfig {
            viewport: Viewport::new(320, 240),
            ..Default::default()
        };
        // This test requires Chrome to be installed, so we skip it in CI
        if std::env::var("CI").is_ok() {
            return;
        }
        match CdpEngine::new(config) {
            Ok(engine) => assert!(engine.close().is_ok()),
            Err(e) => eprintln!("Skipping CDP engine creation test because Chrome is not available or failed to launch: {}", e),
        }
    }
}

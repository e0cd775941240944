//! Headless Chrome over the Chrome debugging protocol (CDP).

mod page;
mod scripts;

pub use page::ChromePage;

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt as _;
use log::{debug, info};
use std::path::PathBuf;
use std::process::Command;
use tokio::task::{JoinHandle, spawn};

/// Locate a Chrome executable: `CHROME_BIN` first, then the usual names on
/// `PATH`. `None` leaves discovery to chromiumoxide.
#[must_use]
pub fn find_chrome_executable(config: &ProbeConfig) -> Option<PathBuf> {
    if let Some(path) = config.chrome_bin.as_ref().filter(|path| path.exists()) {
        return Some(path.clone());
    }

    ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"]
        .into_iter()
        .find(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .output()
                .is_ok_and(|output| {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    // Snap stubs print an install hint instead of a version.
                    (stdout.contains("Chrome") || stdout.contains("Chromium"))
                        && !stderr.contains("snap")
                })
        })
        .map(PathBuf::from)
}

/// A running browser and the task draining its event stream.
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    /// Launch headless Chrome sized to the configured viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser configuration is rejected or Chrome
    /// fails to start.
    pub async fn launch(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.viewport.width, config.viewport.height)
            .arg("--force-device-scale-factor=1")
            .arg("--hide-scrollbars")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--force-color-profile=sRGB")
            .arg("--allow-file-access-from-files");
        if let Some(executable) = find_chrome_executable(config) {
            info!("using Chrome at {}", executable.display());
            builder = builder.chrome_executable(executable);
        }
        let browser_config = builder
            .build()
            .map_err(|err| ProbeError::Config(format!("browser config: {err}")))?;

        let (browser, mut events) = Browser::launch(browser_config).await?;
        let handler = spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(err) = event {
                    debug!("browser handler error: {err}");
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Open a blank tab bound to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be created.
    pub async fn new_page(&self, config: &ProbeConfig) -> Result<ChromePage, ProbeError> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(ChromePage::new(page, config.clone()))
    }

    /// Close the browser and wait for the process to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome does not shut down cleanly.
    pub async fn close(mut self) -> Result<(), ProbeError> {
        self.browser.close().await?;
        self.browser.wait().await?;
        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

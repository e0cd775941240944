use super::scripts::{self, Lookup};
use crate::config::{ProbeConfig, Viewport};
use crate::error::ProbeError;
use crate::reader::{LayoutReader, PageDriver, StyleReader};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::ReloadParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use core::time::Duration;
use log::{debug, info};
use meme_geometry::Rect;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tokio::time::{Instant, timeout};

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// A Chrome tab driven over CDP.
pub struct ChromePage {
    page: Page,
    config: ProbeConfig,
}

impl ChromePage {
    pub(super) fn new(page: Page, config: ProbeConfig) -> Self {
        Self { page, config }
    }

    /// The underlying chromiumoxide tab.
    #[must_use]
    pub fn inner(&self) -> &Page {
        &self.page
    }

    async fn lookup<T>(&self, selector: &str, script: String) -> Result<Option<T>, ProbeError>
    where
        T: DeserializeOwned,
    {
        let lookup: Lookup<T> = self.page.evaluate(script).await?.into_value()?;
        lookup.into_found(selector)
    }

    async fn require<T>(&self, selector: &str, script: String) -> Result<T, ProbeError>
    where
        T: DeserializeOwned,
    {
        self.lookup(selector, script).await?.ok_or_else(|| {
            ProbeError::mismatch(format!("`{selector}` lookup"), "a value", "null")
        })
    }

    async fn element(&self, selector: &str) -> Result<Element, ProbeError> {
        self.require::<bool>(selector, scripts::exists(selector))
            .await?;
        Ok(self.page.find_element(selector).await?)
    }

    async fn wait_for_load(&self, url: &str) -> Result<(), ProbeError> {
        let start = Instant::now();
        match timeout(NAVIGATION_TIMEOUT, self.page.wait_for_navigation()).await {
            Ok(result) => {
                result?;
                info!("loaded {url} in {:?}", start.elapsed());
                Ok(())
            }
            Err(_elapsed) => Err(ProbeError::NavigationTimeout {
                url: url.to_owned(),
                waited: start.elapsed(),
            }),
        }
    }
}

impl LayoutReader for ChromePage {
    async fn bounding_rect(&self, selector: &str) -> Result<Rect, ProbeError> {
        let rect: Rect = self
            .require(selector, scripts::bounding_rect(selector))
            .await?;
        debug!("{selector} bounding rect {rect}");
        Ok(rect)
    }
}

impl StyleReader for ChromePage {
    async fn computed_style(&self, selector: &str, property: &str) -> Result<String, ProbeError> {
        let value: String = self
            .require(selector, scripts::computed_style(selector, property))
            .await?;
        debug!("{selector} {property}: {value}");
        Ok(value)
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>, ProbeError> {
        self.lookup(selector, scripts::attribute(selector, name))
            .await
    }

    async fn value(&self, selector: &str) -> Result<String, ProbeError> {
        self.require(selector, scripts::value(selector)).await
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, ProbeError> {
        self.require(selector, scripts::is_visible(selector)).await
    }

    async fn text_visible(&self, text: &str) -> Result<bool, ProbeError> {
        let lookup: Lookup<bool> = self
            .page
            .evaluate(scripts::text_visible(text))
            .await?
            .into_value()?;
        Ok(lookup.value.unwrap_or(false))
    }
}

impl PageDriver for ChromePage {
    async fn visit(&self, path: &str) -> Result<(), ProbeError> {
        let url = self.config.resolve(path)?;
        info!("visiting {url}");
        match timeout(NAVIGATION_TIMEOUT, self.page.goto(url.as_str())).await {
            Ok(result) => {
                result?;
            }
            Err(_elapsed) => {
                return Err(ProbeError::NavigationTimeout {
                    url: url.to_string(),
                    waited: NAVIGATION_TIMEOUT,
                });
            }
        }
        self.wait_for_load(url.as_str()).await
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<(), ProbeError> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(viewport.width))
            .height(i64::from(viewport.height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(|err| ProbeError::Config(format!("viewport params: {err}")))?;
        self.page.execute(params).await?;
        debug!("viewport set to {viewport}");
        Ok(())
    }

    async fn reload(&self) -> Result<(), ProbeError> {
        let url = self.page.url().await?.unwrap_or_default();
        info!("reloading {url}");
        self.page.execute(ReloadParams::default()).await?;
        self.wait_for_load(&url).await
    }

    async fn click(&self, selector: &str) -> Result<(), ProbeError> {
        debug!("clicking {selector}");
        self.element(selector).await?.click().await?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), ProbeError> {
        debug!("typing {} characters into {selector}", text.chars().count());
        let element = self.element(selector).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn upload_file(&self, selector: &str, path: &Path, mime: &str) -> Result<(), ProbeError> {
        let absolute = fs::canonicalize(path)?;
        info!("uploading {} ({mime}) to {selector}", absolute.display());
        let element = self.element(selector).await?;
        let params = SetFileInputFilesParams::builder()
            .file(absolute.to_string_lossy().into_owned())
            .backend_node_id(element.backend_node_id.clone())
            .build()
            .map_err(|err| ProbeError::Config(format!("upload params: {err}")))?;
        self.page.execute(params).await?;
        Ok(())
    }
}

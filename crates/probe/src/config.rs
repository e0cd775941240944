//! Settings for a probe run.
//!
//! Configuration is read from environment variables or built directly. Values
//! that fail to parse fall back to their defaults with a warning, so a typo in
//! an optional knob never aborts a run.

use crate::error::ProbeError;
use crate::retry::RetryPolicy;
use core::fmt;
use core::str::FromStr;
use core::time::Duration;
use log::warn;
use std::env;
use std::path::PathBuf;
use url::Url;

/// Browser viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// The desktop size every meme page check runs at.
    pub const DESKTOP: Self = Self {
        width: 1366,
        height: 768,
    };
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DESKTOP
    }
}

impl FromStr for Viewport {
    type Err = ProbeError;

    /// Parse `WIDTHxHEIGHT`, e.g. `1366x768`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ProbeError::Config(format!("viewport `{input}` is not WIDTHxHEIGHT"));
        let (width, height) = input.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}x{}", self.width, self.height)
    }
}

/// Runtime configuration for the probe.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// Root URL of the meme page. Live runs are skipped without it.
    pub base_url: Option<Url>,
    /// Viewport applied before each scenario.
    pub viewport: Viewport,
    /// How long retried assertions keep trying.
    pub retry: RetryPolicy,
    /// Directory holding upload fixtures.
    pub fixtures_dir: PathBuf,
    /// Explicit Chrome executable.
    pub chrome_bin: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            viewport: Viewport::DESKTOP,
            retry: RetryPolicy::default(),
            fixtures_dir: default_fixtures_dir(),
            chrome_bin: None,
        }
    }
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn parse_millis(key: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(millis) => Some(Duration::from_millis(millis.max(1))),
        Err(err) => {
            warn!("ignoring {key}={raw}: {err}");
            None
        }
    }
}

impl ProbeConfig {
    /// Construct a configuration for the given page with default settings.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: Some(base_url),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `MEME_BASE_URL`: root URL of the meme page
    /// - `MEME_VIEWPORT`: `WIDTHxHEIGHT` (default `1366x768`)
    /// - `MEME_RETRY_TIMEOUT_MS`: retry budget (default 4000)
    /// - `MEME_RETRY_INTERVAL_MS`: pause between attempts (default 50)
    /// - `MEME_FIXTURES_DIR`: upload fixtures directory
    /// - `CHROME_BIN`: Chrome executable
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("MEME_BASE_URL")
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match Url::parse(raw.trim()) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("ignoring MEME_BASE_URL={raw}: {err}");
                    None
                }
            });

        let viewport = lookup("MEME_VIEWPORT")
            .and_then(|raw| match raw.parse::<Viewport>() {
                Ok(viewport) => Some(viewport),
                Err(err) => {
                    warn!("ignoring MEME_VIEWPORT: {err}");
                    None
                }
            })
            .unwrap_or(defaults.viewport);

        let timeout = lookup("MEME_RETRY_TIMEOUT_MS")
            .and_then(|raw| parse_millis("MEME_RETRY_TIMEOUT_MS", &raw))
            .unwrap_or(defaults.retry.timeout);
        let interval = lookup("MEME_RETRY_INTERVAL_MS")
            .and_then(|raw| parse_millis("MEME_RETRY_INTERVAL_MS", &raw))
            .unwrap_or(defaults.retry.interval);

        let fixtures_dir = lookup("MEME_FIXTURES_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map_or(defaults.fixtures_dir, PathBuf::from);
        let chrome_bin = lookup("CHROME_BIN")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Self {
            base_url,
            viewport,
            retry: RetryPolicy::new(timeout, interval),
            fixtures_dir,
            chrome_bin,
        }
    }

    /// Resolve a page path such as `/` against the base URL.
    ///
    /// Paths stay below the base URL's own path: with a base of
    /// `http://host/app`, `/` resolves to `http://host/app/`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL is configured or the join fails.
    pub fn resolve(&self, path: &str) -> Result<Url, ProbeError> {
        let mut base = self
            .base_url
            .clone()
            .ok_or_else(|| ProbeError::Config("MEME_BASE_URL is not set".to_owned()))?;
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        base.join(path.trim_start_matches('/')).map_err(|err| {
            ProbeError::Config(format!("cannot resolve `{path}` against {base}: {err}"))
        })
    }

    /// Path of a named upload fixture.
    #[must_use]
    pub fn fixture(&self, name: &str) -> PathBuf {
        self.fixtures_dir.join(name)
    }

    /// True when a fixture directory exists on disk.
    #[must_use]
    pub fn has_fixtures(&self) -> bool {
        self.fixtures_dir.is_dir()
    }
}

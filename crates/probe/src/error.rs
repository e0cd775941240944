//! Errors raised while probing the page under test.

use chromiumoxide::error::CdpError;
use core::time::Duration;
use meme_geometry::{Rect, Verdict};
use std::io;
use thiserror::Error;

/// Why a containment check failed.
#[derive(Debug, Clone)]
pub struct OverlapFailure {
    pub background: String,
    pub forefront: String,
    pub background_rect: Rect,
    pub forefront_rect: Rect,
    pub verdict: Verdict,
}

/// Everything that can go wrong between a scenario and the page.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The selector matched no element.
    #[error("no element matches `{0}`")]
    SelectorNotFound(String),

    /// The forefront box does not nest inside the background box.
    #[error(
        "`{}` {} is not inside `{}` {} ({})",
        .0.forefront, .0.forefront_rect, .0.background, .0.background_rect, .0.verdict
    )]
    NotContained(Box<OverlapFailure>),

    /// The element occupies no space.
    #[error("`{selector}` {rect} has no visible area")]
    NoVisibleArea { selector: String, rect: Rect },

    /// A literal comparison failed.
    #[error("{what}: expected `{expected}`, found `{actual}`")]
    Mismatch {
        what: String,
        expected: String,
        actual: String,
    },

    /// A retried assertion never passed.
    #[error("gave up after {attempts} attempts in {waited:?}: {last}")]
    Timeout {
        waited: Duration,
        attempts: u32,
        last: Box<ProbeError>,
    },

    /// A page load did not finish in time.
    #[error("navigation to {url} did not finish within {waited:?}")]
    NavigationTimeout { url: String, waited: Duration },

    /// Missing or unusable configuration.
    #[error("configuration: {0}")]
    Config(String),

    /// The CDP connection reported an error.
    #[error("browser: {0}")]
    Browser(Box<CdpError>),

    /// A page script returned something we could not decode.
    #[error("decoding page result: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ProbeError {
    /// Build a [`ProbeError::Mismatch`].
    pub fn mismatch(
        what: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Mismatch {
            what: what.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Failures that may clear up once the page settles. Retrying anything
    /// else only delays the report.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SelectorNotFound(_)
                | Self::NotContained(_)
                | Self::NoVisibleArea { .. }
                | Self::Mismatch { .. }
        )
    }

    /// The innermost error, looking through timeouts.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Timeout { last, .. } => last.root_cause(),
            other => other,
        }
    }
}

impl From<CdpError> for ProbeError {
    fn from(err: CdpError) -> Self {
        Self::Browser(Box::new(err))
    }
}

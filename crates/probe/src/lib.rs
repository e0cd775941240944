//! End-to-end checks for the meme generator page.
//!
//! The suite drives a page through the [`PageDriver`] capability, reads back
//! geometry and computed style, and feeds the geometry to
//! [`meme_geometry`]. [`ChromeSession`] provides the real page over the
//! Chrome debugging protocol; [`FakePage`] stands in for it in unit tests.
//!
//! ```no_run
//! use meme_probe::{ChromeSession, ProbeConfig, SCENARIOS, run_suite};
//!
//! # async fn demo() -> Result<(), meme_probe::ProbeError> {
//! let config = ProbeConfig::from_env();
//! let session = ChromeSession::launch(&config).await?;
//! let page = session.new_page(&config).await?;
//! let report = run_suite(&page, &config, &SCENARIOS).await;
//! report.log_summary();
//! session.close().await
//! # }
//! ```

pub mod assertions;
pub mod chrome;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod reader;
pub mod retry;
pub mod scenarios;
pub mod test_support;

pub use chrome::{ChromePage, ChromeSession};
pub use config::{ProbeConfig, Viewport};
pub use error::{OverlapFailure, ProbeError};
pub use reader::{LayoutReader, PageDriver, StyleReader};
pub use retry::{RetryPolicy, eventually};
pub use scenarios::{SCENARIOS, Scenario, ScenarioOutcome, SuiteReport, run_suite};
pub use test_support::FakePage;

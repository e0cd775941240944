//! The suite against the real page in headless Chrome.
//!
//! Skipped unless `MEME_BASE_URL` points at a running meme generator.

use anyhow::{Result, ensure};
use log::warn;
use meme_probe::logging::init_test_logger;
use meme_probe::{ChromeSession, ProbeConfig, SCENARIOS, run_suite};

#[tokio::test]
async fn meme_generator_in_chrome() -> Result<()> {
    init_test_logger();
    let config = ProbeConfig::from_env();
    if config.base_url.is_none() {
        warn!("MEME_BASE_URL is not set; skipping the Chrome suite");
        return Ok(());
    }
    ensure!(
        config.has_fixtures(),
        "fixtures directory {} is missing",
        config.fixtures_dir.display()
    );

    let session = ChromeSession::launch(&config).await?;
    let page = session.new_page(&config).await?;
    let report = run_suite(&page, &config, &SCENARIOS).await;
    report.log_summary();
    session.close().await?;

    let failed_count = report.failed_count();
    assert_eq!(
        failed_count, 0,
        "{failed_count} scenario(s) failed (see summary above)"
    );
    Ok(())
}

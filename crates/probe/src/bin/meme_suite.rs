//! Runs the meme page suite against `MEME_BASE_URL` in headless Chrome.
//!
//! Scenario names given as arguments (or `--scenario=NAME`) restrict the run;
//! with none, every scenario runs.

use anyhow::{Result, anyhow, bail};
use log::{error, info};
use meme_probe::logging::init_logger;
use meme_probe::{ChromeSession, ProbeConfig, SCENARIOS, Scenario, SuiteReport, run_suite};
use std::env;
use std::process::exit;
use tokio::runtime::Runtime;

/// Scenarios named on the command line, or the whole suite.
fn parse_scenarios_from_args() -> Result<Vec<Scenario>> {
    let mut selected = Vec::new();
    for arg in env::args().skip(1) {
        let name = arg.strip_prefix("--scenario=").unwrap_or(&arg);
        let scenario = Scenario::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = SCENARIOS.iter().map(|scenario| scenario.name()).collect();
            anyhow!("unknown scenario `{name}`; expected one of {}", known.join(", "))
        })?;
        if !selected.contains(&scenario) {
            selected.push(scenario);
        }
    }
    if selected.is_empty() {
        selected.extend(SCENARIOS);
    }
    Ok(selected)
}

async fn run(config: &ProbeConfig, scenarios: &[Scenario]) -> Result<SuiteReport> {
    if config.base_url.is_none() {
        bail!("MEME_BASE_URL is not set");
    }
    if !config.has_fixtures() {
        bail!("fixtures directory {} is missing", config.fixtures_dir.display());
    }

    let session = ChromeSession::launch(config).await?;
    let page = session.new_page(config).await?;
    let report = run_suite(&page, config, scenarios).await;
    session.close().await?;
    Ok(report)
}

fn main() {
    init_logger("warn");
    let outcome = parse_scenarios_from_args().and_then(|scenarios| {
        let config = ProbeConfig::from_env();
        Runtime::new()?.block_on(run(&config, &scenarios))
    });
    match outcome {
        Ok(report) => {
            report.log_summary();
            if !report.passed() {
                exit(1);
            }
            info!("[MEME] completed: {} scenarios passed", report.outcomes.len());
        }
        Err(err) => {
            error!("error: {err:#}");
            exit(2);
        }
    }
}

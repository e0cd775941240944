//! The meme page suite.
//!
//! Each scenario sizes the viewport and loads `/` before doing anything else,
//! so scenarios can run alone or in any order.

use crate::assertions::{
    check_full_overlap, expect_attr_suffix, expect_css, expect_text_visible, expect_value,
    expect_visible,
};
use crate::config::ProbeConfig;
use crate::contract::{self, BORDER_PRESETS, selectors};
use crate::error::ProbeError;
use crate::reader::PageDriver;
use crate::retry::eventually;
use core::fmt;
use core::future::Future;
use core::time::Duration;
use log::{error, info, warn};
use std::time::Instant;

/// One check of the meme page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// A typed caption shows up inside the image container.
    TextOverContainer,
    /// An uploaded image is shown and the caption sits on top of it.
    UploadImage,
    /// The container's default frame, and the image sitting inside it.
    ContainerFrame,
    /// The caption's shadow, size and colour.
    TextStyle,
    /// The input keeps only the first sixty characters.
    TextLimit,
    /// Each border button has its colour and reframes the container.
    BorderPresets,
    /// Each thumbnail loads its meme into the image.
    PresetImages,
}

/// Every scenario, in suite order.
pub const SCENARIOS: [Scenario; 7] = Scenario::ALL;

impl Scenario {
    pub const ALL: [Self; 7] = [
        Self::TextOverContainer,
        Self::UploadImage,
        Self::ContainerFrame,
        Self::TextStyle,
        Self::TextLimit,
        Self::BorderPresets,
        Self::PresetImages,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TextOverContainer => "text_over_container",
            Self::UploadImage => "upload_image",
            Self::ContainerFrame => "container_frame",
            Self::TextStyle => "text_style",
            Self::TextLimit => "text_limit",
            Self::BorderPresets => "border_presets",
            Self::PresetImages => "preset_images",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == name.trim())
    }

    /// Run this scenario against `page`.
    ///
    /// # Errors
    ///
    /// The first assertion or page operation that failed.
    pub async fn run<P>(self, page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
    where
        P: PageDriver + ?Sized,
    {
        match self {
            Self::TextOverContainer => text_over_container(page, config).await,
            Self::UploadImage => upload_image(page, config).await,
            Self::ContainerFrame => container_frame(page, config).await,
            Self::TextStyle => text_style(page, config).await,
            Self::TextLimit => text_limit(page, config).await,
            Self::BorderPresets => border_presets(page, config).await,
            Self::PresetImages => preset_images(page, config).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Retry an assertion under the configured policy, warning when it never
/// settles.
async fn settle<T, F, Fut>(config: &ProbeConfig, what: &str, attempt: F) -> Result<T, ProbeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProbeError>>,
{
    eventually(&config.retry, attempt)
        .await
        .inspect_err(|err| warn!("{what} did not settle: {err}"))
}

async fn open<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    page.set_viewport(config.viewport).await?;
    page.visit("/").await
}

/// Type the sample caption and check it lands inside `background`.
async fn caption_over<P>(page: &P, config: &ProbeConfig, background: &str) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    page.type_text(selectors::TEXT_INPUT, contract::SAMPLE_TEXT)
        .await?;
    settle(config, "caption input", move || {
        expect_value(page, selectors::TEXT_INPUT, contract::SAMPLE_TEXT)
    })
    .await?;
    settle(config, "caption text", move || {
        expect_text_visible(page, contract::SAMPLE_TEXT)
    })
    .await?;
    settle(config, "caption placement", move || {
        check_full_overlap(page, background, selectors::MEME_TEXT)
    })
    .await?;
    Ok(())
}

/// Upload the fixture image and wait for it to show.
async fn upload<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    let fixture = config.fixture(contract::UPLOAD_FIXTURE);
    page.upload_file(selectors::IMAGE_UPLOAD, &fixture, contract::UPLOAD_MIME)
        .await?;
    settle(config, "uploaded image", move || {
        expect_visible(page, selectors::MEME_IMAGE)
    })
    .await
}

async fn image_in_container<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    settle(config, "image placement", move || {
        check_full_overlap(page, selectors::IMAGE_CONTAINER, selectors::MEME_IMAGE)
    })
    .await?;
    Ok(())
}

async fn css<P>(
    page: &P,
    config: &ProbeConfig,
    selector: &str,
    property: &str,
    expected: &str,
) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    settle(config, property, move || {
        expect_css(page, selector, property, expected)
    })
    .await
}

async fn text_over_container<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    caption_over(page, config, selectors::IMAGE_CONTAINER).await
}

async fn upload_image<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    upload(page, config).await?;
    caption_over(page, config, selectors::MEME_IMAGE).await
}

async fn container_frame<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    page.reload().await?;
    css(
        page,
        config,
        selectors::IMAGE_CONTAINER,
        "background-color",
        contract::CONTAINER_BACKGROUND,
    )
    .await?;
    css(
        page,
        config,
        selectors::IMAGE_CONTAINER,
        "border",
        contract::CONTAINER_BORDER,
    )
    .await?;
    upload(page, config).await?;
    image_in_container(page, config).await
}

async fn text_style<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    page.reload().await?;
    css(page, config, selectors::MEME_TEXT, "text-shadow", contract::TEXT_SHADOW).await?;
    css(page, config, selectors::MEME_TEXT, "font-size", contract::TEXT_FONT_SIZE).await?;
    css(page, config, selectors::MEME_TEXT, "color", contract::TEXT_COLOR).await?;
    upload(page, config).await?;
    image_in_container(page, config).await
}

async fn text_limit<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    page.type_text(selectors::TEXT_INPUT, contract::OVERLONG_TEXT)
        .await?;
    settle(config, "truncated caption", move || {
        expect_value(page, selectors::TEXT_INPUT, contract::TRUNCATED_TEXT)
    })
    .await
}

async fn border_presets<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    for preset in &BORDER_PRESETS {
        css(page, config, preset.button, "background-color", preset.button_color).await?;
        page.click(preset.button).await?;
        css(page, config, selectors::IMAGE_CONTAINER, "border", preset.border).await?;
    }
    Ok(())
}

async fn preset_images<P>(page: &P, config: &ProbeConfig) -> Result<(), ProbeError>
where
    P: PageDriver + ?Sized,
{
    open(page, config).await?;
    for id in contract::preset_meme_ids() {
        let thumbnail = contract::preset_selector(id);
        let suffix = contract::preset_src_suffix(id);
        let suffix = suffix.as_str();
        page.click(&thumbnail).await?;
        settle(config, "preset image", move || {
            expect_attr_suffix(page, selectors::MEME_IMAGE, "src", suffix)
        })
        .await?;
        settle(config, "preset image", move || {
            expect_visible(page, selectors::MEME_IMAGE)
        })
        .await?;
    }
    Ok(())
}

/// Result of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    /// Rendered error when the scenario failed.
    pub error: Option<String>,
    pub duration: Duration,
}

impl ScenarioOutcome {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a suite run, in run order.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed())
            .count()
    }

    #[must_use]
    pub fn outcome(&self, scenario: Scenario) -> Option<&ScenarioOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.scenario == scenario)
    }

    /// Log the failures, or a one-line pass message.
    pub fn log_summary(&self) {
        let failed = self.failed_count();
        let total = self.outcomes.len();
        if failed == 0 {
            info!("all {total} scenario(s) passed");
            return;
        }

        error!("{failed} of {total} scenario(s) failed:");
        error!("────────────────────────────────────────");
        for outcome in &self.outcomes {
            if let Some(err) = &outcome.error {
                error!("  ✗ {} ({:?}): {err}", outcome.scenario, outcome.duration);
            }
        }
        error!("────────────────────────────────────────");
    }
}

/// Run `scenarios` in order, continuing past failures.
pub async fn run_suite<P>(page: &P, config: &ProbeConfig, scenarios: &[Scenario]) -> SuiteReport
where
    P: PageDriver + ?Sized,
{
    let mut report = SuiteReport::default();
    for &scenario in scenarios {
        info!("scenario {scenario}: starting");
        let start = Instant::now();
        let result = scenario.run(page, config).await;
        let duration = start.elapsed();
        match &result {
            Ok(()) => info!("scenario {scenario}: passed in {duration:?}"),
            Err(err) => warn!("scenario {scenario}: failed in {duration:?}: {err}"),
        }
        report.outcomes.push(ScenarioOutcome {
            scenario,
            error: result.err().map(|err| err.to_string()),
            duration,
        });
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::test_support::FakePage;
    use meme_geometry::{Axis, Rect};

    fn config() -> ProbeConfig {
        ProbeConfig {
            retry: RetryPolicy::new(Duration::from_millis(200), Duration::from_millis(10)),
            ..ProbeConfig::default()
        }
    }

    /// Names round-trip and stay in suite order.
    ///
    /// # Panics
    /// Panics if a name does not map back to its scenario.
    #[test]
    fn names_round_trip() {
        for scenario in SCENARIOS {
            assert_eq!(Scenario::from_name(scenario.name()), Some(scenario));
        }
        assert_eq!(Scenario::from_name(" text_limit "), Some(Scenario::TextLimit));
        assert_eq!(Scenario::from_name("text-limit"), None);
        assert_eq!(SCENARIOS[0].to_string(), "text_over_container");
    }

    /// Every scenario passes against a page that keeps its promises.
    ///
    /// # Panics
    /// Panics if any scenario fails.
    #[tokio::test(start_paused = true)]
    async fn suite_passes_on_meme_page() {
        let page = FakePage::meme_page();
        let report = run_suite(&page, &config(), &SCENARIOS).await;
        assert!(report.passed(), "{report:?}");
        assert_eq!(report.outcomes.len(), SCENARIOS.len());
        assert_eq!(page.viewport(), Some(config().viewport));
        assert_eq!(page.url().as_deref(), Some("/"));
    }

    /// Each scenario loads the page itself, so it passes alone.
    ///
    /// # Panics
    /// Panics if a scenario depends on one run before it.
    #[tokio::test(start_paused = true)]
    async fn scenarios_run_alone() {
        for scenario in SCENARIOS {
            let page = FakePage::meme_page();
            let result = scenario.run(&page, &config()).await;
            assert!(matches!(result, Ok(())), "{scenario}: {result:?}");
            assert!(page.visits() >= 1);
        }
    }

    /// A caption that spills out of the container fails with both rects.
    ///
    /// # Panics
    /// Panics if the misplaced caption passes.
    #[tokio::test(start_paused = true)]
    async fn misplaced_caption_times_out() {
        let page = FakePage::meme_page().with_caption_rect(Rect::new(170.0, 900.0, 460.0, 40.0));
        let result = Scenario::TextOverContainer.run(&page, &config()).await;
        assert!(matches!(
            result.as_ref().map_err(ProbeError::root_cause),
            Err(ProbeError::NotContained(failure))
                if failure.verdict.failing_axes() == vec![Axis::Horizontal]
        ));
        assert!(matches!(result, Err(ProbeError::Timeout { attempts, .. }) if attempts > 1));
    }

    /// Without `maxlength` the overlong caption is kept whole.
    ///
    /// # Panics
    /// Panics if the limit check passes.
    #[tokio::test(start_paused = true)]
    async fn missing_length_limit_fails() {
        let page = FakePage::meme_page().with_max_length(None);
        let result = Scenario::TextLimit.run(&page, &config()).await;
        assert!(matches!(
            result.as_ref().map_err(ProbeError::root_cause),
            Err(ProbeError::Mismatch { actual, .. }) if actual == contract::OVERLONG_TEXT
        ));
    }

    /// A wrong computed style is reported with the value found.
    ///
    /// # Panics
    /// Panics if the style check passes.
    #[tokio::test(start_paused = true)]
    async fn wrong_font_size_fails() {
        let page = FakePage::meme_page().with_style(selectors::MEME_TEXT, "font-size", "12px");
        let result = Scenario::TextStyle.run(&page, &config()).await;
        assert!(matches!(
            result.as_ref().map_err(ProbeError::root_cause),
            Err(ProbeError::Mismatch { expected, actual, .. })
                if expected == "30px" && actual == "12px"
        ));
    }

    /// An image rendered outside the container fails the frame scenario.
    ///
    /// # Panics
    /// Panics if the overflowing image passes.
    #[tokio::test(start_paused = true)]
    async fn overflowing_image_fails() {
        let page = FakePage::meme_page().with_image_rect(Rect::new(100.0, 434.0, 498.0, 300.0));
        let result = Scenario::ContainerFrame.run(&page, &config()).await;
        assert!(matches!(
            result.as_ref().map_err(ProbeError::root_cause),
            Err(ProbeError::NotContained(failure))
                if failure.verdict.failing_axes() == vec![Axis::Vertical]
        ));
    }

    /// A missing button fails its scenario and the suite carries on.
    ///
    /// # Panics
    /// Panics if the report does not isolate the failing scenario.
    #[tokio::test(start_paused = true)]
    async fn suite_reports_each_failure() {
        let page = FakePage::meme_page().without_element("#water");
        let report = run_suite(&page, &config(), &SCENARIOS).await;
        assert_eq!(report.failed_count(), 1);
        assert!(!report.passed());
        let outcome = report.outcome(Scenario::BorderPresets);
        assert!(outcome.is_some_and(|border| border
            .error
            .as_deref()
            .is_some_and(|err| err.contains("#water"))));
        assert!(
            report
                .outcome(Scenario::PresetImages)
                .is_some_and(ScenarioOutcome::passed)
        );
    }

    /// A missing upload fixture is an I/O error and is not retried.
    ///
    /// # Panics
    /// Panics if the upload scenario passes or retries.
    #[tokio::test(start_paused = true)]
    async fn missing_fixture_fails_fast() {
        let page = FakePage::meme_page();
        let broken = ProbeConfig {
            fixtures_dir: "/nonexistent".into(),
            ..config()
        };
        let result = Scenario::UploadImage.run(&page, &broken).await;
        assert!(matches!(result, Err(ProbeError::Io(_))));
        assert!(page.uploads().is_empty());
    }
}

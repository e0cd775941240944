use core::time::Duration;
use meme_geometry::Rect;
use meme_probe::contract::{self, selectors};
use meme_probe::logging::init_test_logger;
use meme_probe::{FakePage, ProbeConfig, ProbeError, RetryPolicy, SCENARIOS, Scenario, run_suite};

fn quick_config() -> ProbeConfig {
    ProbeConfig {
        retry: RetryPolicy::new(Duration::from_millis(100), Duration::from_millis(5)),
        ..ProbeConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn full_suite_against_fake_page() {
    init_test_logger();
    let page = FakePage::meme_page();
    let report = run_suite(&page, &quick_config(), &SCENARIOS).await;
    report.log_summary();
    assert_eq!(report.failed_count(), 0, "{report:?}");
    let names: Vec<&str> = report
        .outcomes
        .iter()
        .map(|outcome| outcome.scenario.name())
        .collect();
    assert_eq!(
        names,
        [
            "text_over_container",
            "upload_image",
            "container_frame",
            "text_style",
            "text_limit",
            "border_presets",
            "preset_images",
        ]
    );
    // upload_image, container_frame and text_style each upload once.
    assert_eq!(page.uploads().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn last_border_preset_stays_applied() {
    init_test_logger();
    let page = FakePage::meme_page();
    let result = Scenario::BorderPresets.run(&page, &quick_config()).await;
    assert!(matches!(result, Ok(())), "{result:?}");
    let container = page.element(selectors::IMAGE_CONTAINER).unwrap_or_default();
    assert_eq!(
        container.styles.get("border").map(String::as_str),
        contract::BORDER_PRESETS.last().map(|preset| preset.border)
    );
}

#[tokio::test(start_paused = true)]
async fn broken_layout_is_reported_per_scenario() {
    init_test_logger();
    // The caption hangs below the container and the image.
    let page = FakePage::meme_page().with_caption_rect(Rect::new(700.0, 453.0, 460.0, 40.0));
    let report = run_suite(&page, &quick_config(), &SCENARIOS).await;

    let failed: Vec<Scenario> = report
        .outcomes
        .iter()
        .filter(|outcome| !outcome.passed())
        .map(|outcome| outcome.scenario)
        .collect();
    assert_eq!(failed, [Scenario::TextOverContainer, Scenario::UploadImage]);
    assert!(report.outcomes.iter().all(|outcome| {
        outcome
            .error
            .as_deref()
            .is_none_or(|err| err.contains("#meme-text") && err.contains("vertical: not nested"))
    }));
}

#[tokio::test(start_paused = true)]
async fn scenarios_need_a_page() {
    init_test_logger();
    let page = FakePage::meme_page().without_element(selectors::TEXT_INPUT);
    let result = Scenario::TextLimit.run(&page, &quick_config()).await;
    assert!(matches!(
        result,
        Err(ProbeError::SelectorNotFound(selector)) if selector == selectors::TEXT_INPUT
    ));
}

//! End-to-end rendering tests
//!
//! Tests that draw axis text are marked ignored because the plotters
//! font machinery needs system fonts at runtime. Error paths fire
//! before any text is measured, so those run everywhere.

use interval_core::{CoverageSpec, Observation, TrueEffect};
use interval_plot::{Error, Orientation, PairedIntervalRenderer, PlotStyle, RenderSpec};
use interval_summary::{IntervalSummarizer, IntervalSummary, PiMode};
use plotters::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn study_summary() -> IntervalSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut observations = Vec::new();
    for (condition, facet, mean, sd) in [
        ("control", "easy", 12.0, 2.0),
        ("control", "hard", 18.0, 3.0),
        ("treatment", "easy", 9.0, 2.0),
        ("treatment", "hard", 14.0, 3.0),
    ] {
        let normal = Normal::new(mean, sd).unwrap();
        for _ in 0..40 {
            observations.push(Observation::new(normal.sample(&mut rng), condition, facet));
        }
    }
    IntervalSummarizer::new(CoverageSpec::ONE_SD)
        .with_pi_mode(PiMode::Quantile)
        .summarize(&observations)
        .unwrap()
}

#[test]
fn test_empty_summary_is_rejected() {
    let summary = IntervalSummary {
        ci: Vec::new(),
        pi: Vec::new(),
        coverage: 0.6827,
    };
    let renderer = PairedIntervalRenderer::default();
    let mut buffer = String::new();
    let root = SVGBackend::with_string(&mut buffer, (640, 480)).into_drawing_area();
    let result = renderer.draw(&root, &summary, None);
    assert!(matches!(result, Err(Error::Core(_))));
}

#[test]
fn test_invalid_dodge_width_rejected_before_drawing() {
    let spec = RenderSpec {
        dodge_width: f64::NAN,
        ..RenderSpec::default()
    };
    let renderer = PairedIntervalRenderer::new(spec);
    let mut buffer = String::new();
    let root = SVGBackend::with_string(&mut buffer, (640, 480)).into_drawing_area();
    let result = renderer.draw(&root, &study_summary(), None);
    assert!(matches!(result, Err(Error::Core(_))));
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let renderer = PairedIntervalRenderer::default();
    let summary = study_summary();

    let tiff = std::env::temp_dir().join("interval_plot_reject.tiff");
    let result = renderer.save(&summary, None, &tiff, (640, 480));
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    assert!(!tiff.exists());

    let bare = std::env::temp_dir().join("interval_plot_reject_no_ext");
    let result = renderer.save(&summary, None, &bare, (640, 480));
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    assert!(!bare.exists());
}

#[test]
fn test_failed_svg_save_leaves_no_file() {
    let summary = IntervalSummary {
        ci: Vec::new(),
        pi: Vec::new(),
        coverage: 0.6827,
    };
    let renderer = PairedIntervalRenderer::default();

    let path = std::env::temp_dir().join("interval_plot_failed.svg");
    let staging = std::env::temp_dir().join("interval_plot_failed.partial.svg");
    let result = renderer.save(&summary, None, &path, (640, 480));
    assert!(matches!(result, Err(Error::Core(_))));
    assert!(!path.exists());
    assert!(!staging.exists());
}

#[test]
#[ignore = "requires system fonts"]
fn test_svg_contains_expected_marks() {
    let summary = study_summary();
    let effects = vec![
        TrueEffect::new("easy", 9.0),
        TrueEffect::new("hard", 14.0),
    ];
    let renderer = PairedIntervalRenderer::default();

    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (900, 700)).into_drawing_area();
        renderer.draw(&root, &summary, Some(&effects)).unwrap();
        root.present().unwrap();
    }

    assert!(buffer.contains("<svg"));
    // Mean markers and error bars for four groups in each panel
    assert!(buffer.contains("<circle"));
    assert!(buffer.contains("<polyline"));
}

#[test]
#[ignore = "requires system fonts"]
fn test_save_svg_roundtrip_vertical() {
    let summary = study_summary();
    let spec = RenderSpec {
        orientation: Orientation::Vertical,
        value_label: "response time (s)".to_string(),
        ..RenderSpec::default()
    };
    let renderer = PairedIntervalRenderer::with_style(spec, PlotStyle::default());

    let path = std::env::temp_dir().join("interval_plot_smoke.svg");
    let staging = std::env::temp_dir().join("interval_plot_smoke.partial.svg");
    renderer.save(&summary, None, &path, (800, 600)).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<svg"));
    assert!(!staging.exists());
    std::fs::remove_file(&path).ok();
}

#[test]
#[ignore = "requires system fonts"]
fn test_save_png_leaves_no_staging_file() {
    let summary = study_summary();
    let renderer = PairedIntervalRenderer::default();

    let path = std::env::temp_dir().join("interval_plot_smoke.png");
    let staging = std::env::temp_dir().join("interval_plot_smoke.partial.png");
    renderer.save(&summary, None, &path, (800, 600)).unwrap();
    assert!(path.exists());
    assert!(!staging.exists());
    std::fs::remove_file(&path).ok();
}

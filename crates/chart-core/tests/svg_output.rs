// File: crates/chart-core/tests/svg_output.rs
// Purpose: SVG and HTML report output for fully built charts.

mod common;

use wattchart_core::report::{self, ReportChart};
use wattchart_core::{svg, ChartKind, EncodingConfig, MarkId, Point};

#[test]
fn line_svg_shows_toggled_region_and_tooltip() {
    let mut chart = ChartKind::Line.load(&common::spot_prices()).unwrap().build(640.0, &EncodingConfig::default());
    chart.toggle("QLD").unwrap();
    chart.pointer_enter(&MarkId::new("point", "Average:2000"), Point::new(300.0, 100.0)).unwrap();

    let out = svg::render_instance(&chart);
    assert!(out.contains(r#"<g id="region:QLD" class="layer">"#));
    assert!(out.contains(r#"stroke-dasharray="3,3""#));
    assert!(out.contains("Show Regions:"));
    assert!(out.contains(r#"data-mark="point:Average:2000" data-state="Hovered""#));
    assert!(out.contains(r#"<g class="tooltip" opacity="0.9">"#));
    assert!(out.contains("Average Price: $47.50/MWh"));
    assert!(out.contains("transition:opacity 300ms"));
}

#[test]
fn hover_rules_follow_each_mark_emphasis() {
    let chart = ChartKind::Line.load(&common::spot_prices()).unwrap().build(640.0, &EncodingConfig::default());
    let out = svg::render_instance(&chart);
    assert!(out.contains("circle.mark:hover{r:var(--hover-r)}"));
    assert!(out.contains(r#"data-mark="point:Average:2000" data-state="Idle" style="--hover-opacity:1;--hover-r:7px""#));

    let bars = ChartKind::Bar
        .load(&common::bars(&[("LED", "120")]))
        .unwrap()
        .build(640.0, &EncodingConfig::default());
    let out = svg::render_instance(&bars);
    assert!(out.contains(r#"data-mark="bar:LED" data-state="Idle" style="--hover-opacity:1""#));
}

#[test]
fn donut_svg_draws_arcs() {
    let chart = ChartKind::Donut
        .load(&common::donut(&[("LED", 3), ("OLED", 1)]))
        .unwrap()
        .build(640.0, &EncodingConfig::default());
    let out = svg::render_instance(&chart);
    assert_eq!(out.matches(r#"fill-rule="evenodd""#).count(), 2);
    assert!(out.contains("Screen Types"));
    assert!(out.contains("<title>LED\nCount: 3 TVs\nMarket Share: 75.0%\nAvg Energy: 200.0 kWh/year</title>"));
}

#[test]
fn report_collects_every_chart() {
    let config = EncodingConfig::default();
    let dir = tempfile::tempdir().unwrap();
    let bars = ChartKind::Bar.load(&common::bars(&[("LED", "120")])).unwrap().build(640.0, &config);
    let scatter = ChartKind::Scatter.load(&common::tv_models()).unwrap().build(640.0, &config);

    let svg_path = report::write_svg(dir.path(), &bars).unwrap();
    assert_eq!(svg_path.file_name().unwrap(), "bar.svg");

    let cards = [ReportChart::from_instance(&bars), ReportChart::from_instance(&scatter)];
    let index = report::write_report(dir.path(), "TV energy", &cards).unwrap();
    let html = std::fs::read_to_string(index).unwrap();
    assert!(html.contains(r#"<div id="bar-chart"><svg"#));
    assert!(html.contains(r#"<div id="scatter-plot"><svg"#));
}

// File: crates/chart-core/tests/scenarios.rs
// Purpose: End-to-end encoding scenarios from CSV text to scene geometry.

mod common;

use std::f64::consts::PI;

use wattchart_core::charts::{bar, donut};
use wattchart_core::scene::Shape;
use wattchart_core::{ChartData, ChartKind, EncodingConfig, MarkId, Point};

#[test]
fn bar_scenario_domains_and_heights() {
    let config = EncodingConfig::default();
    let data = ChartKind::Bar.load(&common::bars(&[("LED", "120"), ("OLED", "150")])).unwrap();
    let ChartData::Bar(rows) = &data else { panic!("expected bar data") };

    let layout = ChartKind::Bar.layout(640.0, &config);
    let scales = bar::scales(rows, &layout, &config);
    assert_eq!(scales.x.domain(), ["LED", "OLED"]);
    let (lo, hi) = scales.y.domain();
    assert_eq!(lo, 0.0);
    assert!((hi - 165.0).abs() < 1e-9);

    let chart = data.build(640.0, &config);
    let height = |key: &str| match &chart.scene.mark(&MarkId::new("bar", key)).unwrap().shape {
        Shape::Rect(r) => r.height,
        other => panic!("unexpected shape {other:?}"),
    };
    assert!((height("LED") / height("OLED") - 120.0 / 150.0).abs() < 1e-9);
    // bars stand on the x axis
    let bottom = layout.insets.top + layout.plot_height();
    match &chart.scene.mark(&MarkId::new("bar", "LED")).unwrap().shape {
        Shape::Rect(r) => assert!((r.bottom() - bottom).abs() < 1e-9),
        _ => unreachable!(),
    }
    assert_eq!(chart.scene.layer("labels").unwrap().items.len(), 2);
}

#[test]
fn bar_with_missing_value_keeps_its_slot() {
    let config = EncodingConfig::default();
    let data = ChartKind::Bar.load(&common::bars(&[("LCD", "n/a"), ("LED", "120")])).unwrap();
    let ChartData::Bar(rows) = &data else { panic!("expected bar data") };
    let scales = bar::scales(rows, &ChartKind::Bar.layout(640.0, &config), &config);
    assert_eq!(scales.x.domain(), ["LCD", "LED"]);

    let chart = data.build(640.0, &config);
    assert!(chart.scene.mark(&MarkId::new("bar", "LCD")).is_none());
    assert!(chart.scene.mark(&MarkId::new("bar", "LED")).is_some());
}

fn arc_span(chart: &wattchart_core::ChartInstance, key: &str) -> f64 {
    match &chart.scene.mark(&MarkId::new("arc", key)).unwrap().shape {
        Shape::Sector(s) => s.end_angle - s.start_angle,
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn donut_scenario_spans_and_labels() {
    let config = EncodingConfig::default();
    let chart = ChartKind::Donut.load(&common::donut(&[("LED", 3), ("OLED", 1)])).unwrap().build(640.0, &config);

    assert!((arc_span(&chart, "LED") - 1.5 * PI).abs() < 1e-9);
    assert!((arc_span(&chart, "OLED") - 0.5 * PI).abs() < 1e-9);
    assert_eq!(chart.scene.layer("labels").unwrap().items.len(), 2);

    let legend: Vec<String> = chart
        .scene
        .layer("legend")
        .unwrap()
        .items
        .iter()
        .filter_map(|i| match i {
            wattchart_core::scene::Item::Node(n) => match &n.shape {
                Shape::Text(t) => Some(t.content.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(legend, ["LED (3)", "OLED (1)"]);
}

#[test]
fn donut_label_threshold_is_inclusive() {
    let config = EncodingConfig::default();
    let at_boundary = ChartKind::Donut.load(&common::donut(&[("LED", 9), ("OLED", 1)])).unwrap();
    assert_eq!(at_boundary.build(640.0, &config).scene.layer("labels").unwrap().items.len(), 2);

    let below = ChartKind::Donut.load(&common::donut(&[("LED", 19), ("OLED", 1)])).unwrap();
    assert_eq!(below.build(640.0, &config).scene.layer("labels").unwrap().items.len(), 1);

    // 9.6% would round to 10% but is still below the threshold
    let rounds_up = ChartKind::Donut.load(&common::donut(&[("LED", 904), ("OLED", 96)])).unwrap();
    assert_eq!(rounds_up.build(640.0, &config).scene.layer("labels").unwrap().items.len(), 1);

    let relaxed = EncodingConfig { label_threshold_pct: 5.0, ..EncodingConfig::default() };
    assert_eq!(below.build(640.0, &relaxed).scene.layer("labels").unwrap().items.len(), 2);
}

#[test]
fn donut_tooltip_percentages_sum_to_one_hundred() {
    let config = EncodingConfig::default();
    let data = ChartKind::Donut.load(&common::donut(&[("LED", 7), ("OLED", 2), ("LCD", 5)])).unwrap();
    let ChartData::Donut(rows) = &data else { panic!("expected donut data") };
    let counts: Vec<usize> = rows.iter().map(|r| r.count).collect();
    assert_eq!(counts.iter().sum::<usize>(), 14);

    let mut chart = data.build(640.0, &config);
    let mut total = 0.0;
    for tech in ["LED", "OLED", "LCD"] {
        chart.pointer_enter(&MarkId::new("arc", tech), Point::new(0.0, 0.0)).unwrap();
        let line = &chart.tooltip.lines[2];
        let pct: f64 = line.trim_start_matches("Market Share: ").trim_end_matches('%').parse().unwrap();
        total += pct;
    }
    assert!((total - 100.0).abs() <= 0.15, "total {total}");
    assert!((donut::share_pct(&counts, 0) - 50.0).abs() < 1e-9);
}

#[test]
fn donut_with_no_models_draws_no_arcs() {
    let chart = ChartKind::Donut
        .load(&common::donut(&[("LED", 0), ("OLED", 0)]))
        .unwrap()
        .build(640.0, &EncodingConfig::default());
    assert_eq!(chart.scene.marks().count(), 0);
    assert!(chart.scene.layer("legend").is_some());
}

#[test]
fn scatter_skips_unplaceable_models() {
    let config = EncodingConfig::default();
    let chart = ChartKind::Scatter.load(&common::tv_models()).unwrap().build(640.0, &config);
    let ids: Vec<&str> = chart.scene.marks().map(|m| m.id.0.as_str()).collect();
    assert_eq!(ids, ["dot:0", "dot:1", "dot:3"]);

    let first = chart.scene.mark(&MarkId::new("dot", 0)).unwrap();
    assert_eq!(
        first.tooltip,
        ["Acme", "Screen Tech: LED", "Screen Size: 55\"", "Star Rating: 4.5", "Energy: 150 kWh/year"]
    );
    assert_eq!(first.style.opacity, 0.7);
}

#[test]
fn line_domain_covers_every_series() {
    let config = EncodingConfig::default();
    let data = ChartKind::Line.load(&common::spot_prices()).unwrap();
    let ChartData::Line(rows) = &data else { panic!("expected line data") };
    let scales = wattchart_core::charts::line::scales(rows, &ChartKind::Line.layout(640.0, &config), &config);
    assert_eq!(scales.x.domain(), (1999.0, 2001.0));
    assert!((scales.y.domain().1 - 66.0).abs() < 1e-9);

    let chart = data.build(640.0, &config);
    let annotation = chart.scene.layer("annotation").unwrap();
    assert!(annotation.items.iter().any(|i| matches!(
        i,
        wattchart_core::scene::Item::Node(n) if matches!(&n.shape, Shape::Text(t) if t.content == "Peak: $47.5/MWh")
    )));
}

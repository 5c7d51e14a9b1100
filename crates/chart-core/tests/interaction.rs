// File: crates/chart-core/tests/interaction.rs
// Purpose: Hover state machine, region toggles and rebuild lifecycle on live chart instances.

mod common;

use wattchart_core::chart::ChartInstance;
use wattchart_core::charts::line::region_layer_id;
use wattchart_core::dataset::Region;
use wattchart_core::scene::Shape;
use wattchart_core::{
    BuildOutcome, ChartError, ChartHost, ChartKind, EncodingConfig, MarkId, MarkState, Point, PointerEvent, Tooltip,
};

fn bar_chart() -> ChartInstance {
    ChartKind::Bar
        .load(&common::bars(&[("LED", "120"), ("OLED", "150")]))
        .unwrap()
        .build(640.0, &EncodingConfig::default())
}

fn line_chart() -> ChartInstance {
    ChartKind::Line.load(&common::spot_prices()).unwrap().build(640.0, &EncodingConfig::default())
}

#[test]
fn hover_enter_and_leave_restore_baseline() {
    let mut chart = bar_chart();
    let led = MarkId::new("bar", "LED");
    let at = chart.scene.mark(&led).unwrap().anchor();

    chart.handle(PointerEvent::Move { at }).unwrap();
    let mark = chart.scene.mark(&led).unwrap();
    assert_eq!(mark.state, MarkState::Hovered);
    assert_eq!(mark.style.opacity, 1.0);
    assert_eq!(mark.transition_ms, 200);
    assert_eq!(chart.hovered(), Some(&led));
    assert!(chart.tooltip.visible);
    assert_eq!(chart.tooltip.opacity, Tooltip::SHOWN_OPACITY);
    assert_eq!(chart.tooltip.position, at.offset(10.0, -28.0));
    assert_eq!(chart.tooltip.lines, ["LED", "Avg Energy: 120.0 kWh/year"]);

    // moving within the mark only follows the pointer
    chart.handle(PointerEvent::Move { at: at.offset(2.0, 2.0) }).unwrap();
    assert_eq!(chart.tooltip.position, at.offset(12.0, -26.0));

    chart.handle(PointerEvent::Move { at: Point::new(1.0, 1.0) }).unwrap();
    let mark = chart.scene.mark(&led).unwrap();
    assert_eq!(mark.state, MarkState::Idle);
    assert_eq!(mark.style.opacity, 0.8);
    assert!(chart.hovered().is_none());
    assert!(!chart.tooltip.visible);
    assert_eq!(chart.tooltip.transition_ms, 500);
    // text survives the fade-out
    assert_eq!(chart.tooltip.lines.len(), 2);
}

#[test]
fn entering_another_mark_leaves_the_first() {
    let mut chart = bar_chart();
    let led = MarkId::new("bar", "LED");
    let oled = MarkId::new("bar", "OLED");
    chart.pointer_enter(&led, Point::new(0.0, 0.0)).unwrap();
    chart.pointer_enter(&oled, Point::new(5.0, 5.0)).unwrap();
    assert_eq!(chart.scene.mark(&led).unwrap().state, MarkState::Idle);
    assert_eq!(chart.scene.mark(&oled).unwrap().state, MarkState::Hovered);
    assert_eq!(chart.scene.marks().filter(|m| m.state == MarkState::Hovered).count(), 1);
}

#[test]
fn unknown_mark_is_an_error() {
    let mut chart = bar_chart();
    let err = chart.pointer_enter(&MarkId::new("bar", "Plasma"), Point::default()).unwrap_err();
    assert!(matches!(err, ChartError::UnknownMark(id) if id == "bar:Plasma"));
}

#[test]
fn region_toggle_is_lazy_and_independent() {
    let mut chart = line_chart();
    let layers_before = chart.scene.layers.len();
    assert!(chart.scene.layer(&region_layer_id(Region::Qld)).is_none());

    assert!(chart.toggle("QLD").unwrap());
    assert!(chart.toggle("NSW").unwrap());
    assert_eq!(chart.scene.layers.len(), layers_before + 2);
    assert_eq!(chart.visible_toggles(), ["QLD", "NSW"]);

    assert!(!chart.toggle("QLD").unwrap());
    let qld = chart.scene.layer(&region_layer_id(Region::Qld)).unwrap();
    assert_eq!(qld.opacity, 0.0);
    assert_eq!(qld.transition_ms, 300);
    assert_eq!(chart.scene.layer(&region_layer_id(Region::Nsw)).unwrap().opacity, 1.0);
    assert_eq!(chart.visible_toggles(), ["NSW"]);

    // re-enabling reuses the existing layer
    assert!(chart.toggle("qld").unwrap());
    assert_eq!(chart.scene.layers.len(), layers_before + 2);
}

#[test]
fn region_points_break_at_missing_values() {
    let mut chart = line_chart();
    chart.toggle("VIC").unwrap();
    let layer = chart.scene.layer(&region_layer_id(Region::Vic)).unwrap();
    assert_eq!(layer.marks().count(), 2);
    let paths = layer.items.iter().filter(|i| matches!(i, wattchart_core::scene::Item::Node(n) if matches!(n.shape, Shape::Path(_)))).count();
    assert_eq!(paths, 1);

    chart.toggle("TAS").unwrap();
    let tas = chart.scene.layer(&region_layer_id(Region::Tas)).unwrap();
    assert_eq!(tas.marks().count(), 2);
}

#[test]
fn checkbox_click_toggles_region() {
    let mut chart = line_chart();
    // first checkbox sits right of the plot, under the panel header
    let plot_right = chart.layout.width - chart.layout.insets.right;
    let box_center = Point::new(plot_right + 10.0, chart.layout.insets.top + 20.0);
    assert!(chart.handle(PointerEvent::Click { at: box_center }).is_ok());
    assert_eq!(chart.visible_toggles(), ["QLD"]);
    assert!(!chart.click(Point::new(1.0, 1.0)));
}

#[test]
fn hiding_a_region_clears_its_hover() {
    let mut chart = line_chart();
    chart.toggle("SA").unwrap();
    let id = MarkId::new("point", "SA:2000");
    chart.pointer_enter(&id, Point::default()).unwrap();
    assert_eq!(chart.hovered(), Some(&id));

    chart.toggle("SA").unwrap();
    assert!(chart.hovered().is_none());
    assert!(!chart.tooltip.visible);
    assert_eq!(chart.scene.mark(&id).unwrap().state, MarkState::Idle);
    // hidden layers are not hit-testable
    let at = chart.scene.mark(&id).unwrap().anchor();
    assert_ne!(chart.scene.hit_test(at), Some(&id));
}

#[test]
fn unknown_region_is_rejected() {
    let mut chart = line_chart();
    assert!(matches!(chart.toggle("WA"), Err(ChartError::UnknownRegion(_))));
    let mut bars = bar_chart();
    assert!(bars.toggle("QLD").is_err());
}

#[test]
fn region_tooltips_name_the_region() {
    let mut chart = line_chart();
    chart.toggle("Snowy").unwrap();
    let id = MarkId::new("point", "Snowy:1999");
    chart.pointer_enter(&id, Point::default()).unwrap();
    assert_eq!(chart.tooltip.lines, ["Year: 1999", "Snowy Price: $35.00/MWh"]);
    let mark = chart.scene.mark(&id).unwrap();
    assert!(matches!(mark.shape, Shape::Circle { radius, .. } if radius == 6.0));
}

#[test]
fn resize_rebuild_resets_state_and_keeps_one_tooltip() {
    let mut host = ChartHost::new(ChartKind::Line, common::spot_prices(), EncodingConfig::default(), 640.0);
    assert_eq!(host.rebuild(640.0), BuildOutcome::Committed);
    {
        let chart = host.instance_mut().unwrap();
        chart.toggle("QLD").unwrap();
        chart.pointer_enter(&MarkId::new("point", "Average:2000"), Point::default()).unwrap();
        assert!(chart.tooltip.visible);
    }

    assert_eq!(host.resize(480.0), BuildOutcome::Committed);
    let chart = host.instance().unwrap();
    assert_eq!(chart.layout.width, 480.0);
    assert!(chart.visible_toggles().is_empty());
    assert!(chart.hovered().is_none());
    assert!(!chart.tooltip.visible);
}

#[test]
fn stale_build_is_discarded() {
    let mut host = ChartHost::new(ChartKind::Bar, common::bars(&[("LED", "120")]), EncodingConfig::default(), 640.0);
    let slow = host.begin_rebuild(640.0);
    assert_eq!(host.rebuild(320.0), BuildOutcome::Committed);

    let late = host.fetch();
    assert_eq!(host.complete(slow, late), BuildOutcome::Discarded);
    assert_eq!(host.instance().unwrap().layout.width, 320.0);
}

#[test]
fn leaving_a_mark_that_is_not_hovered_keeps_the_tooltip() {
    let mut chart = bar_chart();
    let led = MarkId::new("bar", "LED");
    let oled = MarkId::new("bar", "OLED");
    chart.handle(PointerEvent::Enter { mark: led.clone(), at: Point::new(0.0, 0.0) }).unwrap();
    chart.handle(PointerEvent::Enter { mark: oled.clone(), at: Point::new(5.0, 5.0) }).unwrap();
    chart.handle(PointerEvent::Leave { mark: led.clone() }).unwrap();

    assert_eq!(chart.hovered(), Some(&oled));
    assert_eq!(chart.scene.mark(&oled).unwrap().state, MarkState::Hovered);
    assert_eq!(chart.scene.mark(&led).unwrap().state, MarkState::Idle);
    assert!(chart.tooltip.visible);
    assert_eq!(chart.tooltip.lines[0], "OLED");
}

#[test]
fn repeated_years_get_distinct_point_ids() {
    let body = "2000,30,28,26,40,33,35,10\n2000,45,50,48,60,33,40,60\n";
    let source = wattchart_core::MemorySource::new()
        .with(wattchart_core::dataset::SPOT_PRICES, format!("{}\n{body}", common::SPOT_HEADER));
    let mut chart = ChartKind::Line.load(&source).unwrap().build(640.0, &EncodingConfig::default());

    let ids: Vec<&str> = chart.scene.marks().map(|m| m.id.0.as_str()).collect();
    assert_eq!(ids, ["point:Average:2000", "point:Average:2000#2"]);

    let second = MarkId::new("point", "Average:2000#2");
    let at = chart.scene.mark(&second).unwrap().anchor();
    chart.handle(PointerEvent::Move { at }).unwrap();
    assert_eq!(chart.hovered(), Some(&second));
    assert_eq!(chart.scene.mark(&MarkId::new("point", "Average:2000")).unwrap().state, MarkState::Idle);
    assert_eq!(chart.tooltip.lines[1], "Average Price: $60.00/MWh");

    chart.toggle("QLD").unwrap();
    assert!(chart.scene.mark(&MarkId::new("point", "QLD:2000#2")).is_some());
}

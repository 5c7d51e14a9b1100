// File: crates/chart-render-skia/src/lib.rs
// Summary: Headless PNG rendering of chart scenes using Skia CPU raster surfaces.

pub mod text;

use std::path::{Path, PathBuf};

use skia_safe as skia;

use wattchart_core::chart::ChartInstance;
use wattchart_core::geometry::{PathCmd, Point};
use wattchart_core::scene::{Item, Scene, Shape, Style};
use wattchart_core::{ChartError, Color, Result, Theme, Tooltip};

pub use text::TextShaper;

/// Largest angle between sector outline vertices, in radians.
const ARC_STEP: f64 = 0.02;

#[derive(Clone, Copy, Debug)]
pub struct RasterOptions {
    /// Device pixels per scene pixel.
    pub scale: f32,
    /// Skip text, so output does not depend on installed fonts.
    pub draw_labels: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 1.0, draw_labels: true }
    }
}

pub struct SkiaRenderer {
    shaper: TextShaper,
    opts: RasterOptions,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new(RasterOptions::default()) }
}

impl SkiaRenderer {
    pub fn new(opts: RasterOptions) -> Self {
        Self { shaper: TextShaper::new(), opts }
    }

    /// Render a live chart, tooltip included, to PNG bytes.
    pub fn render_instance(&self, chart: &ChartInstance) -> Result<Vec<u8>> {
        self.render_png(&chart.scene, &chart.tooltip, &chart.config().theme())
    }

    pub fn render_png(&self, scene: &Scene, tooltip: &Tooltip, theme: &Theme) -> Result<Vec<u8>> {
        let scale = self.opts.scale.max(0.1);
        let w = (scene.width as f32 * scale).round().max(1.0) as i32;
        let h = (scene.height as f32 * scale).round().max(1.0) as i32;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| ChartError::Raster("failed to create raster surface".into()))?;
        let canvas = surface.canvas();
        canvas.scale((scale, scale));
        canvas.clear(sk_color(scene.background));

        for layer in &scene.layers {
            if layer.opacity <= 0.0 {
                continue;
            }
            for item in &layer.items {
                let (shape, style) = match item {
                    Item::Node(n) => (&n.shape, &n.style),
                    Item::Mark(m) => (&m.shape, &m.style),
                };
                self.draw_shape(canvas, shape, style, layer.opacity);
            }
        }
        if tooltip.visible {
            self.draw_tooltip(canvas, tooltip, theme);
        }

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| ChartError::Raster("encode PNG failed".into()))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write `<dir>/<kind>.png` for a chart.
    pub fn write_png(&self, dir: &Path, chart: &ChartInstance) -> Result<PathBuf> {
        let bytes = self.render_instance(chart)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.png", chart.kind));
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "wrote png");
        Ok(path)
    }

    fn draw_shape(&self, canvas: &skia::Canvas, shape: &Shape, style: &Style, layer_opacity: f64) {
        let alpha = (style.opacity * layer_opacity) as f32;
        match shape {
            Shape::Rect(r) => {
                let rect = skia::Rect::from_xywh(r.left as f32, r.top as f32, r.width as f32, r.height as f32);
                for paint in paints(style, alpha) {
                    canvas.draw_rect(rect, &paint);
                }
            }
            Shape::Circle { center, radius } => {
                for paint in paints(style, alpha) {
                    canvas.draw_circle(pt(*center), *radius as f32, &paint);
                }
            }
            Shape::Line { from, to } => {
                if let Some(paint) = stroke_paint(style, alpha) {
                    canvas.draw_line(pt(*from), pt(*to), &paint);
                }
            }
            Shape::Path(cmds) => {
                let path = sk_path(cmds);
                for paint in paints(style, alpha) {
                    canvas.draw_path(&path, &paint);
                }
            }
            Shape::Sector(s) => {
                let mut path = skia::Path::new();
                let outline = s.outline(ARC_STEP);
                if let Some((first, rest)) = outline.split_first() {
                    path.move_to(pt(*first));
                    for p in rest {
                        path.line_to(pt(*p));
                    }
                    path.close();
                }
                for paint in paints(style, alpha) {
                    canvas.draw_path(&path, &paint);
                }
            }
            Shape::Text(t) => {
                if !self.opts.draw_labels {
                    return;
                }
                let Some(fill) = style.fill else { return };
                let color = sk_color_alpha(fill, alpha);
                let (x, y) = (t.at.x as f32, t.at.y as f32);
                if t.rotate != 0.0 {
                    canvas.save();
                    canvas.rotate(t.rotate as f32, Some(skia::Point::new(x, y)));
                    self.shaper.draw(canvas, &t.content, x, y, t.size as f32, color, t.bold, t.anchor);
                    canvas.restore();
                } else {
                    self.shaper.draw(canvas, &t.content, x, y, t.size as f32, color, t.bold, t.anchor);
                }
            }
        }
    }

    fn draw_tooltip(&self, canvas: &skia::Canvas, tooltip: &Tooltip, theme: &Theme) {
        const LINE: f32 = 14.0;
        const PAD: f32 = 6.0;
        let alpha = tooltip.opacity as f32;
        let width = if self.opts.draw_labels {
            tooltip
                .lines
                .iter()
                .map(|l| self.shaper.measure_width(l, 11.0, false))
                .fold(0.0_f32, f32::max)
        } else {
            tooltip.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * 6.5
        };
        let (x, y) = (tooltip.position.x as f32, tooltip.position.y as f32);
        let rect = skia::Rect::from_xywh(x, y, width + 2.0 * PAD, tooltip.lines.len() as f32 * LINE + 2.0 * PAD);

        let mut bg = skia::Paint::default();
        bg.set_anti_alias(true);
        bg.set_color(sk_color_alpha(theme.tooltip_background, alpha));
        canvas.draw_round_rect(rect, 4.0, 4.0, &bg);

        if !self.opts.draw_labels {
            return;
        }
        let color = sk_color_alpha(theme.tooltip_text, alpha);
        for (i, line) in tooltip.lines.iter().enumerate() {
            let baseline = y + PAD + (i as f32 + 1.0) * LINE - 3.0;
            self.shaper.draw(canvas, line, x + PAD, baseline, 11.0, color, i == 0, wattchart_core::scene::Anchor::Start);
        }
    }
}

fn pt(p: Point) -> skia::Point {
    skia::Point::new(p.x as f32, p.y as f32)
}

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn sk_color_alpha(c: Color, alpha: f32) -> skia::Color {
    let a = (c.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

fn sk_path(cmds: &[PathCmd]) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(p) => {
                path.move_to(pt(p));
            }
            PathCmd::LineTo(p) => {
                path.line_to(pt(p));
            }
            PathCmd::CubicTo(a, b, p) => {
                path.cubic_to(pt(a), pt(b), pt(p));
            }
        }
    }
    path
}

/// Fill paint then stroke paint, for whichever the style sets.
fn paints(style: &Style, alpha: f32) -> Vec<skia::Paint> {
    let mut out = Vec::with_capacity(2);
    if let Some(fill) = style.fill {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(sk_color_alpha(fill, alpha));
        out.push(paint);
    }
    out.extend(stroke_paint(style, alpha));
    out
}

fn stroke_paint(style: &Style, alpha: f32) -> Option<skia::Paint> {
    let color = style.stroke?;
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(style.stroke_width as f32);
    paint.set_color(sk_color_alpha(color, alpha));
    if let Some((dash, gap)) = style.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[dash as f32, gap as f32], 0.0));
    }
    Some(paint)
}

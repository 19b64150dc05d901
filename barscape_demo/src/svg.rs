// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a [`ChartLayout`] for `barscape_demo`.
//!
//! Chart space is flattened with a fixed isometric projection; bars are
//! drawn as flat rectangles, far cells first.

use barscape_charts::{
    AxisPlan, ChartConfig, ChartLayout, GroupFrame, Point3, StrokeStyle,
};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;

/// Isometric projection from chart space (y up) to SVG space (y down).
#[derive(Clone, Copy, Debug)]
struct Projection {
    scale: f64,
}

impl Projection {
    fn project(&self, p: Point3) -> Point {
        let (sin, cos) = 30_f64.to_radians().sin_cos();
        Point::new(
            (p.x - p.z) * cos * self.scale,
            ((p.x + p.z) * sin - p.y) * self.scale,
        )
    }

    /// Screen angle, in degrees, of a unit step along `dir` in a group's local
    /// plane starting at `local`.
    fn angle(&self, frame: &GroupFrame, local: Point, dir: Vec2) -> f64 {
        let a = self.project(frame.transform_point(Point3::from_planar(local)));
        let b = self.project(frame.transform_point(Point3::from_planar(local + dir)));
        (b - a).atan2().to_degrees()
    }
}

#[derive(Clone, Debug)]
enum SvgItem {
    Polyline {
        points: Vec<Point>,
        stroke: StrokeStyle,
    },
    Text {
        pos: Point,
        angle: f64,
        font_size: f64,
        bold: bool,
        text: String,
    },
    Rect {
        rect: Rect,
        fill: Color,
    },
}

#[derive(Debug)]
pub(crate) struct SvgScene {
    projection: Projection,
    items: Vec<SvgItem>,
}

impl SvgScene {
    pub(crate) fn new(scale: f64) -> Self {
        Self {
            projection: Projection { scale },
            items: Vec::new(),
        }
    }

    /// Adds every primitive of `layout`.
    pub(crate) fn add_layout(&mut self, config: &ChartConfig, layout: &ChartLayout) {
        for line in &layout.frame {
            self.polyline(
                [line.from, line.to].into_iter(),
                StrokeStyle::solid(line.width),
            );
        }
        for placed in [&layout.value_axis, &layout.axis1, &layout.axis2] {
            self.axis(config, &placed.plan, &placed.frame);
        }

        let mut stacks: Vec<_> = layout.bars.iter().collect();
        stacks.sort_by(|a, b| {
            let depth = |p: Point3| p.x + p.z;
            let da = depth(layout.bar_frame.transform_point(lift_floor(a.position)));
            let db = depth(layout.bar_frame.transform_point(lift_floor(b.position)));
            da.total_cmp(&db)
        });
        for stack in stacks {
            for segment in stack.segments.iter().filter(|s| s.height > 0.0) {
                let base = Point3::new(segment.position.x, segment.stack_offset, segment.position.y);
                let top = Point3::new(segment.position.x, segment.top(), segment.position.y);
                let b = self.projection.project(layout.bar_frame.transform_point(base));
                let t = self.projection.project(layout.bar_frame.transform_point(top));
                let half = stack.radius * self.projection.scale;
                self.items.push(SvgItem::Rect {
                    rect: Rect::new(b.x - half, t.y, b.x + half, b.y),
                    fill: segment.swatch.color(),
                });
            }
        }
    }

    fn axis(&mut self, config: &ChartConfig, plan: &AxisPlan, frame: &GroupFrame) {
        let to_screen = |p: Point| self.projection.project(frame.transform_point(Point3::from_planar(p)));
        let mut items = Vec::new();
        for tick in &plan.ticks {
            items.push(SvgItem::Polyline {
                points: tick
                    .grid_line
                    .iter()
                    .map(|p| self.projection.project(frame.transform_point(*p)))
                    .collect(),
                stroke: config.grid_stroke,
            });
            items.push(SvgItem::Polyline {
                points: vec![to_screen(tick.main_notch.p0), to_screen(tick.main_notch.p1)],
                stroke: config.main_notch_stroke,
            });
            if let Some(mid) = tick.mid_notch {
                items.push(SvgItem::Polyline {
                    points: vec![to_screen(mid.p0), to_screen(mid.p1)],
                    stroke: config.mid_notch_stroke,
                });
            }
            let anchor = tick.label_anchor();
            items.push(SvgItem::Text {
                pos: to_screen(anchor),
                angle: self.projection.angle(frame, anchor, Vec2::new(1.0, 0.0)),
                font_size: config.label_style.font_size * self.projection.scale,
                bold: false,
                text: tick.label_text.clone(),
            });
        }

        let title = &plan.title;
        let dir = Vec2::from_angle(title.rotation_deg.to_radians());
        items.push(SvgItem::Text {
            pos: to_screen(title.position),
            angle: self.projection.angle(frame, title.position, dir),
            font_size: config.title_style.font_size * self.projection.scale,
            bold: true,
            text: title.text.clone(),
        });
        self.items.extend(items);
    }

    fn polyline(&mut self, points: impl Iterator<Item = Point3>, stroke: StrokeStyle) {
        let points = points.map(|p| self.projection.project(p)).collect();
        self.items.push(SvgItem::Polyline { points, stroke });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box()
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" font-family="serif">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        for item in &self.items {
            match item {
                SvgItem::Polyline { points, stroke } => {
                    let pts: Vec<String> =
                        points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                    out.push_str(&format!(
                        r#"<polyline points="{}" fill="none""#,
                        pts.join(" ")
                    ));
                    write_paint_attr(&mut out, "stroke", stroke.color, stroke.opacity);
                    out.push_str(&format!(
                        r#" stroke-width="{}"/>"#,
                        stroke.stroke_width * self.projection.scale
                    ));
                    out.push('\n');
                }
                SvgItem::Text {
                    pos,
                    angle,
                    font_size,
                    bold,
                    text,
                } => {
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}""#,
                        pos.x, pos.y, font_size
                    ));
                    if *bold {
                        out.push_str(r#" font-weight="bold""#);
                    }
                    if *angle != 0.0 {
                        out.push_str(&format!(
                            r#" transform="rotate({} {} {})""#,
                            angle, pos.x, pos.y
                        ));
                    }
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
                SvgItem::Rect { rect, fill } => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height()
                    ));
                    write_paint_attr(&mut out, "fill", *fill, 1.0);
                    out.push_str("/>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn view_box(&self) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        for item in &self.items {
            let b = match item {
                SvgItem::Polyline { points, .. } => points
                    .iter()
                    .map(|p| Rect::from_points(*p, *p))
                    .reduce(|a, b| a.union(b)),
                SvgItem::Text {
                    pos,
                    font_size,
                    text,
                    ..
                } => {
                    // Very rough heuristic: ~0.6em glyphs, any rotation.
                    let reach = 0.6 * font_size * text.chars().count() as f64;
                    Some(Rect::from_center_size(*pos, (2.0 * reach, 2.0 * reach)))
                }
                SvgItem::Rect { rect, .. } => Some(*rect),
            };
            let Some(b) = b else { continue };
            rect = Some(rect.map_or(b, |r| r.union(b)));
        }

        rect.map(|r| {
            // Add a small padding margin.
            let pad = 10.0;
            Rect::new(r.x0 - pad, r.y0 - pad, r.x1 + pad, r.y1 + pad)
        })
    }
}

fn lift_floor(p: Point) -> Point3 {
    Point3::new(p.x, 0.0, p.y)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color, opacity: f64) {
    let rgba = color.to_rgba8();
    out.push_str(&format!(
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    ));
    let alpha = f64::from(rgba.a) / 255.0 * opacity;
    if alpha < 1.0 {
        out.push_str(&format!(r#" {name}-opacity="{alpha}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

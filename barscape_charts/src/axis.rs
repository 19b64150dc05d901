// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis planning.
//!
//! Every axis is planned in its own local plane: the axis line runs up the
//! local `y` axis from the origin, notches and labels sit on the `facing`
//! side of it, and grid lines cross the chart on the other side. The layout
//! places each plane in chart space with a [`GroupFrame`](crate::GroupFrame).
//!
//! Two planners exist:
//! - [`plan_lower_axis`] for the category axes on the floor, one tick per
//!   label, ticks centered in equal cells;
//! - [`plan_value_axis`] for the vertical duration axis, one tick per nice
//!   scale step, ticks on the step boundaries.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use barscape_text::{MeasureError, TextMeasurer, TextStyle};
use kurbo::{Line, Point, Size, Vec2};
use smallvec::smallvec;

use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::geom::{Point3, Polyline3};
use crate::scale::NiceScale;
use crate::unit::Unit;

/// Which side of the axis line labels and notches sit on.
///
/// The two lower axes are mirrored across the chart diagonal, so one reads
/// left-to-right and the other right-to-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Labels on the negative-x side, ending a padding away from the axis.
    Left,
    /// Labels on the positive-x side, starting a padding away from the axis.
    Right,
}

impl Facing {
    /// `+1` for right, `-1` for left.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Center of cell `index` (zero-based) when `extent` is split into
/// `cardinality` equal cells.
///
/// Lower-axis ticks and bar stacks both go through this function, so a bar
/// sits exactly on its label.
pub fn cell_center(index: usize, cardinality: usize, extent: f64) -> f64 {
    let step = extent / cardinality as f64;
    step * index as f64 + step / 2.0
}

/// One tick of an axis, in the axis's local plane.
#[derive(Clone, Debug, PartialEq)]
pub struct TickDescriptor {
    /// Zero-based tick index.
    pub step_index: usize,
    /// Position along the axis (local `y`).
    pub position: f64,
    /// Grid line starting at the axis and crossing the chart.
    pub grid_line: Polyline3,
    /// Notch at the tick.
    pub main_notch: Line,
    /// Notch half a step below the tick, if any.
    pub mid_notch: Option<Line>,
    /// Label text.
    pub label_text: String,
    /// Measured label size (advance width, ascent + descent).
    pub label_size: Size,
    /// Offset of the label origin from the tick point `(0, position)`.
    pub label_offset: Vec2,
}

impl TickDescriptor {
    /// Where the label's origin goes in the local plane.
    pub fn label_anchor(&self) -> Point {
        Point::new(0.0, self.position) + self.label_offset
    }
}

/// The title of an axis, in the axis's local plane.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitleDescriptor {
    /// Title text.
    pub text: String,
    /// Measured, unrotated title size.
    pub size: Size,
    /// Origin of the rotated title.
    pub position: Point,
    /// Rotation about the local `z` axis, in degrees.
    pub rotation_deg: f64,
}

/// Everything needed to draw one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisPlan {
    /// Which side labels are on.
    pub facing: Facing,
    /// Ticks in axis order.
    pub ticks: Vec<TickDescriptor>,
    /// Widest measured tick label.
    pub max_label_width: f64,
    /// The axis title.
    pub title: AxisTitleDescriptor,
}

/// Plans a category axis with one tick per label.
///
/// The axis length `config.extent` is split into `labels.len()` equal steps
/// and each label sits at its step's center. Grid lines run the full extent
/// away from `facing`; main notches point toward it. Each tick also has a
/// mid notch on the boundary below its center.
pub fn plan_lower_axis(
    labels: &[String],
    title: &str,
    facing: Facing,
    config: &ChartConfig,
    measurer: &impl TextMeasurer,
) -> ChartResult<AxisPlan> {
    let cardinality = labels.len();
    let extent = config.extent;
    let sign = facing.sign();

    let mut ticks = Vec::with_capacity(cardinality);
    let mut max_label_width = 0.0_f64;
    for (step_index, label) in labels.iter().enumerate() {
        let position = cell_center(step_index, cardinality, extent);
        let boundary = position - extent / cardinality as f64 / 2.0;
        let label_size = measure(measurer, label, &config.label_style)?;
        max_label_width = max_label_width.max(label_size.width);

        let label_offset = match facing {
            Facing::Right => Vec2::new(config.near_label_padding, -label_size.height / 2.0),
            Facing::Left => Vec2::new(
                -(label_size.width + config.label_padding),
                -label_size.height / 2.0,
            ),
        };

        ticks.push(TickDescriptor {
            step_index,
            position,
            grid_line: smallvec![
                Point3::new(0.0, position, 0.0),
                Point3::new(-sign * extent, position, 0.0),
            ],
            main_notch: Line::new((0.0, position), (sign * config.main_notch_length, position)),
            mid_notch: Some(Line::new(
                (0.0, boundary),
                (sign * config.mid_notch_length, boundary),
            )),
            label_text: label.clone(),
            label_size,
            label_offset,
        });
    }

    let title = plan_title(title, facing, max_label_width, config, measurer)?;
    Ok(AxisPlan {
        facing,
        ticks,
        max_label_width,
        title,
    })
}

/// Plans the vertical value axis for `scale`, labelled in `unit`.
///
/// There is one tick per scale value, evenly spread over `config.extent`.
/// Grid lines run back along the floor edge and then across the back wall.
/// Tick 0 has no mid notch since nothing lies below the origin.
pub fn plan_value_axis(
    scale: &NiceScale,
    unit: Unit,
    config: &ChartConfig,
    measurer: &impl TextMeasurer,
) -> ChartResult<AxisPlan> {
    let extent = config.extent;
    let values = scale.ticks();
    let step = extent / scale.step_count().max(1) as f64;

    let mut ticks = Vec::with_capacity(values.len());
    let mut max_label_width = 0.0_f64;
    for (step_index, value) in values.into_iter().enumerate() {
        let position = step * step_index as f64;
        let label_text = unit.format_tick(value, scale.tick_spacing());
        let label_size = measure(measurer, &label_text, &config.label_style)?;
        max_label_width = max_label_width.max(label_size.width);

        let mid = position - step / 2.0;
        ticks.push(TickDescriptor {
            step_index,
            position,
            grid_line: smallvec![
                Point3::new(0.0, position, 0.0),
                Point3::new(-extent, position, 0.0),
                Point3::new(-extent, position, extent),
            ],
            main_notch: Line::new((0.0, position), (config.main_notch_length, position)),
            mid_notch: (step_index != 0)
                .then(|| Line::new((0.0, mid), (config.mid_notch_length, mid))),
            label_text,
            label_size,
            label_offset: Vec2::new(config.near_label_padding, -label_size.height / 2.0),
        });
    }

    let title = plan_title(
        &unit.axis_title(),
        Facing::Right,
        max_label_width,
        config,
        measurer,
    )?;
    Ok(AxisPlan {
        facing: Facing::Right,
        ticks,
        max_label_width,
        title,
    })
}

/// Places a title alongside the axis, clear of the widest label and
/// centered on the axis length.
///
/// A right-facing title is turned a quarter counter-clockwise, so its
/// origin sits at the bottom. A left-facing one is turned clockwise and
/// gets an extra half line of clearance.
fn plan_title(
    text: &str,
    facing: Facing,
    max_label_width: f64,
    config: &ChartConfig,
    measurer: &impl TextMeasurer,
) -> ChartResult<AxisTitleDescriptor> {
    let size = measure(measurer, text, &config.title_style)?;
    let clearance = max_label_width + config.label_padding + size.height;
    let middle = config.extent / 2.0;
    let (position, rotation_deg) = match facing {
        Facing::Right => (Point::new(clearance, middle - size.width / 2.0), 90.0),
        Facing::Left => (
            Point::new(
                -(clearance + size.height / 2.0),
                middle + size.width / 2.0,
            ),
            -90.0,
        ),
    };
    Ok(AxisTitleDescriptor {
        text: text.into(),
        size,
        position,
        rotation_deg,
    })
}

/// Measures `text`, turning measurer failures and unusable metrics into
/// [`ChartError::Layout`].
fn measure(measurer: &impl TextMeasurer, text: &str, style: &TextStyle) -> ChartResult<Size> {
    let metrics = measurer
        .measure(text, style.clone())
        .map_err(|source| ChartError::Layout {
            text: text.into(),
            source,
        })?;
    if !metrics.is_valid() {
        return Err(ChartError::Layout {
            text: text.into(),
            source: MeasureError::Failed(format!("invalid metrics {metrics:?}")),
        });
    }
    Ok(Size::new(metrics.advance_width, metrics.height()))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::testing::{BrokenMeasurer, FixedMeasurer, NoTextMeasurer};

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn lower_axis_ticks_are_cell_centers() {
        let config = ChartConfig::new();
        let plan = plan_lower_axis(
            &labels(&["1", "5", "10", "15"]),
            "Users count",
            Facing::Right,
            &config,
            &FixedMeasurer,
        )
        .unwrap();
        let positions: Vec<f64> = plan.ticks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![12.5, 37.5, 62.5, 87.5]);
        assert_eq!(plan.ticks[1].mid_notch, Some(Line::new((0.0, 25.0), (1.5, 25.0))));
        assert_eq!(plan.ticks[0].mid_notch, Some(Line::new((0.0, 0.0), (1.5, 0.0))));
        assert_eq!(plan.ticks[2].main_notch, Line::new((0.0, 62.5), (2.0, 62.5)));
        assert_eq!(
            plan.ticks[3].grid_line.as_slice(),
            [Point3::new(0.0, 87.5, 0.0), Point3::new(-100.0, 87.5, 0.0)]
        );
    }

    #[test]
    fn facing_mirrors_notches_grid_and_labels() {
        let config = ChartConfig::new();
        let l = labels(&["10"]);
        let right = plan_lower_axis(&l, "t", Facing::Right, &config, &FixedMeasurer).unwrap();
        let left = plan_lower_axis(&l, "t", Facing::Left, &config, &FixedMeasurer).unwrap();

        // "10" measures 4 x 4.
        assert_eq!(right.ticks[0].label_offset, Vec2::new(3.0, -2.0));
        assert_eq!(left.ticks[0].label_offset, Vec2::new(-9.0, -2.0));
        assert_eq!(right.ticks[0].label_anchor(), Point::new(3.0, 48.0));
        assert_eq!(left.ticks[0].main_notch.p1, Point::new(-2.0, 50.0));
        assert_eq!(left.ticks[0].grid_line[1], Point3::new(100.0, 50.0, 0.0));
    }

    #[test]
    fn titles_clear_the_widest_label() {
        let config = ChartConfig::new();
        let l = labels(&["1", "100", "10"]);
        // Widest label is 6 wide; "Users" is 10 x 4.
        let right = plan_lower_axis(&l, "Users", Facing::Right, &config, &FixedMeasurer).unwrap();
        assert_eq!(right.max_label_width, 6.0);
        assert_eq!(right.title.position, Point::new(15.0, 45.0));
        assert_eq!(right.title.rotation_deg, 90.0);

        let left = plan_lower_axis(&l, "Users", Facing::Left, &config, &FixedMeasurer).unwrap();
        assert_eq!(left.title.position, Point::new(-17.0, 55.0));
        assert_eq!(left.title.rotation_deg, -90.0);
    }

    #[test]
    fn value_axis_steps_through_the_nice_scale() {
        let config = ChartConfig::new();
        let scale = NiceScale::compute(0.0, 17_500.0, 10).unwrap();
        let plan = plan_value_axis(&scale, Unit::Seconds, &config, &FixedMeasurer).unwrap();

        assert_eq!(plan.ticks.len(), 10);
        assert_eq!(plan.ticks[0].label_text, "0s");
        assert_eq!(plan.ticks[1].label_text, "2s");
        assert_eq!(plan.ticks[9].label_text, "18s");
        assert!((plan.ticks[9].position - 100.0).abs() < 1e-9);
        assert_eq!(plan.ticks[0].mid_notch, None);
        assert!(plan.ticks[1..].iter().all(|t| t.mid_notch.is_some()));
        assert_eq!(plan.ticks[0].grid_line.len(), 3);
        assert_eq!(plan.ticks[0].grid_line[2], Point3::new(-100.0, 0.0, 100.0));

        // "18s" measures 6 x 4: labels sit just right of the axis, centered
        // on their tick.
        assert_eq!(plan.ticks[9].label_size, Size::new(6.0, 4.0));
        assert_eq!(plan.ticks[9].label_offset, Vec2::new(3.0, -2.0));
        assert_eq!(plan.max_label_width, 6.0);

        // "Duration in seconds" is 38 x 4; clears 6 + 5 + 4 and is centered
        // on the axis.
        assert_eq!(plan.title.text, "Duration in seconds");
        assert_eq!(plan.title.position, Point::new(15.0, 31.0));
        assert_eq!(plan.title.rotation_deg, 90.0);
    }

    #[test]
    fn fractional_steps_give_clean_labels() {
        let config = ChartConfig::new();
        let scale = NiceScale::compute(0.0, 0.7, 10).unwrap();
        let plan = plan_value_axis(&scale, Unit::Milliseconds, &config, &FixedMeasurer).unwrap();
        let labels: Vec<&str> = plan.ticks.iter().map(|t| t.label_text.as_str()).collect();
        assert_eq!(
            labels,
            ["0.0ms", "0.1ms", "0.2ms", "0.3ms", "0.4ms", "0.5ms", "0.6ms", "0.7ms"]
        );
    }

    #[test]
    fn value_axis_labels_follow_the_unit() {
        let config = ChartConfig::new();
        let scale = NiceScale::compute(0.0, 17_500.0, 10).unwrap();
        let ms = plan_value_axis(&scale, Unit::Milliseconds, &config, &FixedMeasurer).unwrap();
        assert_eq!(ms.ticks[1].label_text, "2000ms");
        assert_eq!(ms.title.text, "Duration in milliseconds");
        // "18000ms" is the widest label at 7 glyphs.
        assert_eq!(ms.max_label_width, 14.0);
    }

    #[test]
    fn measurement_failures_abort_the_plan() {
        let config = ChartConfig::new();
        let err = plan_lower_axis(
            &labels(&["1"]),
            "t",
            Facing::Left,
            &config,
            &NoTextMeasurer,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ChartError::Layout {
                text: "1".into(),
                source: MeasureError::Unavailable,
            }
        );

        let scale = NiceScale::compute(0.0, 1.0, 10).unwrap();
        assert!(matches!(
            plan_value_axis(&scale, Unit::Seconds, &config, &BrokenMeasurer),
            Err(ChartError::Layout {
                source: MeasureError::Failed(_),
                ..
            })
        ));
    }

    #[test]
    fn empty_axis_has_only_a_title() {
        let config = ChartConfig::new();
        let plan = plan_lower_axis(&[], "t", Facing::Right, &config, &FixedMeasurer).unwrap();
        assert!(plan.ticks.is_empty());
        assert_eq!(plan.title.position, Point::new(9.0, 49.0));
    }
}

// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-chart layout.
//!
//! [`build_layout`] runs the planners in order:
//! 1. nice scale from the largest cell total,
//! 2. value axis, then the two lower axes,
//! 3. bar stacks against the nice upper bound,
//!
//! and attaches the fixed frame, the group frames and the legend. The result
//! is an immutable [`ChartLayout`]; nothing is patched afterwards.
//!
//! [`ChartLayoutEngine`] keeps the inputs and the current layout together so
//! a unit toggle can rebuild it wholesale.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use barscape_text::TextMeasurer;

use crate::axis::{AxisPlan, Facing, plan_lower_axis, plan_value_axis};
use crate::bars::{BarStack, plan_bars};
use crate::config::ChartConfig;
use crate::dataset::Aggregation;
use crate::error::{ChartError, ChartResult};
use crate::geom::{FrameLine, GroupFrame, Point3, frame_lines};
use crate::legend::Legend;
use crate::scale::NiceScale;
use crate::unit::Unit;

/// An axis plan and where its plane goes in chart space.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedAxis {
    /// The plan, in the axis's local plane.
    pub plan: AxisPlan,
    /// Local plane to chart space.
    pub frame: GroupFrame,
}

/// Everything a renderer needs to draw the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    /// Unit the value axis is labelled in.
    pub unit: Unit,
    /// Scale of the value axis.
    pub scale: NiceScale,
    /// Fixed edges of the chart box, in chart space.
    pub frame: [FrameLine; 7],
    /// Vertical duration axis.
    pub value_axis: PlacedAxis,
    /// First lower axis, labels facing left.
    pub axis1: PlacedAxis,
    /// Second lower axis, labels facing right.
    pub axis2: PlacedAxis,
    /// Stacks in row-major cell order, in the bar group's local space.
    pub bars: Vec<BarStack>,
    /// Bar group local space to chart space.
    pub bar_frame: GroupFrame,
    /// Legend content.
    pub legend: Legend,
}

/// Lays out the chart for `aggregation` in `unit`.
///
/// Fails with [`ChartError::EmptyDataset`] when there are no samples,
/// [`ChartError::DegenerateRange`] when every duration is zero, and
/// [`ChartError::Layout`] when a label cannot be measured. Nothing is
/// returned on failure.
pub fn build_layout(
    config: &ChartConfig,
    aggregation: &Aggregation,
    unit: Unit,
    measurer: &impl TextMeasurer,
) -> ChartResult<ChartLayout> {
    let dataset = aggregation.dataset();
    if dataset.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let scale = NiceScale::compute(0.0, aggregation.max_cell_total(), config.max_ticks)?;
    tracing::debug!(
        unit = unit.symbol(),
        max_cell_total = aggregation.max_cell_total(),
        nice_upper_bound = scale.nice_upper_bound(),
        tick_spacing = scale.tick_spacing(),
        axis1 = dataset.axis1_cardinality(),
        axis2 = dataset.axis2_cardinality(),
        "building chart layout"
    );

    let value_axis = plan_value_axis(&scale, unit, config, measurer)?;
    let axis2 = plan_lower_axis(
        dataset.axis2_labels(),
        &config.axis2_title,
        Facing::Right,
        config,
        measurer,
    )?;
    let axis1 = plan_lower_axis(
        dataset.axis1_labels(),
        &config.axis1_title,
        Facing::Left,
        config,
        measurer,
    )?;
    let bars = plan_bars(dataset, scale.nice_upper_bound(), config)?;

    let e = config.extent;
    let corner = Point3::new(e, 0.0, e);
    Ok(ChartLayout {
        unit,
        scale,
        frame: frame_lines(e, config.frame_background_width, config.frame_axis_width),
        value_axis: PlacedAxis {
            plan: value_axis,
            frame: GroupFrame::translated(Point3::new(e, 0.0, 0.0)),
        },
        axis1: PlacedAxis {
            plan: axis1,
            frame: GroupFrame::translated(corner).with_rotation_deg(-90.0, 0.0, 90.0),
        },
        axis2: PlacedAxis {
            plan: axis2,
            frame: GroupFrame::translated(corner).with_rotation_deg(-90.0, 0.0, 0.0),
        },
        bars,
        bar_frame: GroupFrame::translated(corner).with_rotation_deg(0.0, -180.0, 0.0),
        legend: Legend::new(&config.palette, unit),
    })
}

/// Owns the chart inputs and the layout currently on display.
///
/// The dataset and configuration are fixed at construction; only the unit
/// changes, and each change rebuilds the layout from scratch.
pub struct ChartLayoutEngine<M> {
    config: ChartConfig,
    aggregation: Aggregation,
    measurer: M,
    layout: ChartLayout,
}

impl<M: TextMeasurer> ChartLayoutEngine<M> {
    /// Creates an engine and builds the initial layout in [`Unit::default`].
    pub fn new(config: ChartConfig, aggregation: Aggregation, measurer: M) -> ChartResult<Self> {
        let layout = build_layout(&config, &aggregation, Unit::default(), &measurer)?;
        Ok(Self {
            config,
            aggregation,
            measurer,
            layout,
        })
    }

    /// Builds a layout for `unit` without touching the current one.
    pub fn build(&self, unit: Unit) -> ChartResult<ChartLayout> {
        build_layout(&self.config, &self.aggregation, unit, &self.measurer)
    }

    /// Switches to the unit named `unit` (`"s"` or `"ms"`) and returns the new
    /// layout.
    ///
    /// The name is validated before anything is recomputed. On any error the
    /// current layout is kept.
    pub fn set_unit(&mut self, unit: &str) -> ChartResult<&ChartLayout> {
        let unit = unit.parse::<Unit>().inspect_err(|err| {
            tracing::debug!(%err, "unit toggle rejected");
        })?;
        self.apply_unit(unit)
    }

    /// Switches to `unit` and returns the new layout. On error the current
    /// layout is kept.
    pub fn apply_unit(&mut self, unit: Unit) -> ChartResult<&ChartLayout> {
        let layout = self.build(unit).inspect_err(|err| {
            tracing::debug!(unit = unit.symbol(), %err, "unit toggle rejected");
        })?;
        tracing::debug!(unit = unit.symbol(), "unit toggle applied");
        self.layout = layout;
        Ok(&self.layout)
    }

    /// The current layout.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// The unit of the current layout.
    pub fn unit(&self) -> Unit {
        self.layout.unit
    }

    /// The configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The dataset and its statistics.
    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }
}

impl<M> fmt::Debug for ChartLayoutEngine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartLayoutEngine")
            .field("config", &self.config)
            .field("aggregation", &self.aggregation)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bar planning.
//!
//! Each populated cell becomes one [`BarStack`]: a cylinder per category,
//! stacked bottom-up in palette order. Heights are durations scaled so that
//! the value-axis upper bound maps to the full chart extent.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::axis::cell_center;
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::{ChartError, ChartResult};
use crate::geom::Point3;
use crate::palette::{Category, Swatch};

/// One category's slice of a bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSegment {
    /// The category.
    pub category: Category,
    /// The category's palette entry.
    pub swatch: Swatch,
    /// Segment height in chart units. Zero for categories with no duration.
    pub height: f64,
    /// Sum of the heights of the segments below this one.
    pub stack_offset: f64,
    /// Footprint center on the floor of the bar group: `x` along axis 1,
    /// `y` along axis 2.
    pub position: Point,
}

impl BarSegment {
    /// Vertical center of the segment.
    pub fn center(&self) -> f64 {
        self.stack_offset + self.height / 2.0
    }

    /// Segment center in the bar group's local space (floor `x`/`z`, up `y`).
    pub fn center_point(&self) -> Point3 {
        Point3::new(self.position.x, self.center(), self.position.y)
    }

    /// Top of the segment.
    pub fn top(&self) -> f64 {
        self.stack_offset + self.height
    }
}

/// All segments of one cell, bottom-up in palette order.
#[derive(Clone, Debug, PartialEq)]
pub struct BarStack {
    /// Zero-based axis-1 position.
    pub axis1_index: usize,
    /// Zero-based axis-2 position.
    pub axis2_index: usize,
    /// Footprint center, shared by every segment.
    pub position: Point,
    /// Cylinder radius.
    pub radius: f64,
    /// One segment per category.
    pub segments: SmallVec<[BarSegment; Category::COUNT]>,
}

impl BarStack {
    /// Height of the whole stack.
    pub fn total_height(&self) -> f64 {
        self.segments.last().map_or(0.0, BarSegment::top)
    }
}

/// Plans a stack for every populated cell of `dataset`, in row-major order
/// (axis 1 outer, axis 2 inner).
///
/// Cells without samples get no stack. `nice_upper_bound` must be positive
/// and finite.
pub fn plan_bars(
    dataset: &Dataset,
    nice_upper_bound: f64,
    config: &ChartConfig,
) -> ChartResult<Vec<BarStack>> {
    if !(nice_upper_bound.is_finite() && nice_upper_bound > 0.0) {
        return Err(ChartError::DegenerateRange {
            lower: 0.0,
            upper: nice_upper_bound,
        });
    }

    let extent = config.extent;
    let count1 = dataset.axis1_cardinality();
    let count2 = dataset.axis2_cardinality();

    let mut stacks = Vec::with_capacity(dataset.cell_count());
    for u in 0..count1 {
        for n in 0..count2 {
            let Some(cell) = dataset.cell(u, n) else {
                continue;
            };
            let position = Point::new(
                cell_center(u, count1, extent),
                cell_center(n, count2, extent),
            );

            let mut stack_offset = 0.0;
            let segments = cell
                .iter()
                .map(|(category, duration)| {
                    let height = duration * extent / nice_upper_bound;
                    let segment = BarSegment {
                        category,
                        swatch: config.palette.swatch(category),
                        height,
                        stack_offset,
                        position,
                    };
                    stack_offset += height;
                    segment
                })
                .collect();

            stacks.push(BarStack {
                axis1_index: u,
                axis2_index: n,
                position,
                radius: config.bar_radius,
                segments,
            });
        }
    }
    Ok(stacks)
}

// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for 3D stacked-bar charts.
//!
//! Durations indexed by two independent axes are drawn as stacked cylinders
//! on a square floor grid, with a vertical duration axis. This crate computes
//! *where everything goes* and nothing else:
//! - **Aggregation** turns samples into a first-seen-ordered two-axis grid of
//!   per-category durations ([`DatasetBuilder`]).
//! - **Scales** pick round value-axis bounds and tick spacing ([`NiceScale`]).
//! - **Axis plans** give grid lines, notches, label anchors and titles in
//!   each axis's local plane ([`plan_lower_axis`], [`plan_value_axis`]).
//! - **Bar plans** give per-category segment heights and offsets
//!   ([`plan_bars`]).
//! - **Layout** composes them into one immutable [`ChartLayout`], and
//!   [`ChartLayoutEngine`] rebuilds it when the display unit changes.
//!
//! Drawing, cameras and animation belong to the host. Labels are measured
//! through the [`TextMeasurer`] capability from `barscape_text`.
//!
//! ```
//! use barscape_charts::{
//!     Category, ChartConfig, ChartLayoutEngine, DatasetBuilder, HeuristicTextMeasurer,
//! };
//!
//! let mut data = DatasetBuilder::new();
//! data.push(1.0, 1.0, Category::Checkout, 1200.0).unwrap();
//! data.push(1.0, 10.0, Category::Commit, 800.0).unwrap();
//!
//! let mut engine =
//!     ChartLayoutEngine::new(ChartConfig::new(), data.aggregate(), HeuristicTextMeasurer)
//!         .unwrap();
//! assert_eq!(engine.layout().value_axis.plan.ticks[1].label_text, "0.2s");
//! let ms = engine.set_unit("ms").unwrap();
//! assert_eq!(ms.value_axis.plan.ticks[1].label_text, "200ms");
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bars;
mod config;
mod dataset;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod geom;
mod layout;
mod legend;
mod palette;
mod scale;
#[cfg(test)]
mod testing;
mod unit;

pub use axis::{
    AxisPlan, AxisTitleDescriptor, Facing, TickDescriptor, cell_center, plan_lower_axis,
    plan_value_axis,
};
pub use bars::{BarSegment, BarStack, plan_bars};
pub use config::{ChartConfig, StrokeStyle};
pub use dataset::{
    Aggregation, AxisId, AxisValue, CellDurations, Dataset, DatasetBuilder, DatasetDiagnostic,
    RawSample, aggregate,
};
pub use error::{ChartError, ChartResult};
pub use geom::{FrameLine, FrameLineKind, GroupFrame, Point3, Polyline3, frame_lines};
pub use layout::{ChartLayout, ChartLayoutEngine, PlacedAxis, build_layout};
pub use legend::{Legend, LegendEntry, UnitOption};
pub use palette::{Category, CategoryPalette, Swatch};
pub use scale::{NiceScale, nice_num};
pub use unit::Unit;

pub use barscape_text::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, MeasureError, TextMeasurer,
    TextMetrics, TextStyle,
};

// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-axis duration datasets.
//!
//! Samples are keyed by an axis-1 value, an axis-2 value and a [`Category`].
//! Axis values keep the order they were first seen in: tick labels and bar
//! cells are addressed by position in that order, never by sorting the
//! values.
//!
//! Inconsistent input (two values sharing a label, a sample given twice) is
//! tolerated: the last write wins and a [`DatasetDiagnostic`] is recorded.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::error::{ChartError, ChartResult};
use crate::palette::Category;

/// A key on one of the two lower axes.
#[derive(Clone, Debug)]
pub enum AxisValue {
    /// A numeric key, labelled with its shortest round-trip representation.
    Number(f64),
    /// A textual key, labelled as-is.
    Text(String),
}

impl AxisValue {
    /// The tick label for this value.
    pub fn label(&self) -> String {
        match self {
            Self::Number(v) => format!("{v}"),
            Self::Text(s) => s.clone(),
        }
    }

    /// Identity comparison: same variant and same contents, with numbers
    /// compared bitwise so `NaN` keys stay stable.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for AxisValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<u32> for AxisValue {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for AxisValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One observation: how long `category` took at `(axis1, axis2)`, in
/// milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSample {
    /// Key on the first lower axis.
    pub axis1: AxisValue,
    /// Key on the second lower axis.
    pub axis2: AxisValue,
    /// Which operation was timed.
    pub category: Category,
    /// Duration in milliseconds. Must be finite and non-negative.
    pub duration: f64,
}

impl RawSample {
    /// Creates a sample.
    pub fn new(
        axis1: impl Into<AxisValue>,
        axis2: impl Into<AxisValue>,
        category: Category,
        duration: f64,
    ) -> Self {
        Self {
            axis1: axis1.into(),
            axis2: axis2.into(),
            category,
            duration,
        }
    }
}

/// Which lower axis a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// The first lower axis.
    Axis1,
    /// The second lower axis.
    Axis2,
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Axis1 => "axis1",
            Self::Axis2 => "axis2",
        })
    }
}

/// A recoverable dataset inconsistency.
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetDiagnostic {
    /// Two different axis values share a label. The later value replaced the
    /// earlier one in place, so the axis position is unchanged.
    LabelCollision {
        /// The axis the values belong to.
        axis: AxisId,
        /// The shared label.
        label: String,
        /// The value that was replaced.
        previous: AxisValue,
        /// The value now stored.
        current: AxisValue,
    },
    /// A category was given twice for the same cell. The later duration wins.
    DuplicateSample {
        /// Axis-1 label of the cell.
        axis1: String,
        /// Axis-2 label of the cell.
        axis2: String,
        /// The repeated category.
        category: Category,
    },
    /// No sample was given for this cell. It gets no bar.
    MissingCell {
        /// Axis-1 label of the cell.
        axis1: String,
        /// Axis-2 label of the cell.
        axis2: String,
    },
}

impl fmt::Display for DatasetDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelCollision {
                axis,
                label,
                previous,
                current,
            } => write!(
                f,
                "{axis} label {label:?} used by {previous:?} and {current:?}; keeping the latter"
            ),
            Self::DuplicateSample {
                axis1,
                axis2,
                category,
            } => write!(
                f,
                "duplicate {category} sample at ({axis1}, {axis2}); keeping the latter"
            ),
            Self::MissingCell { axis1, axis2 } => {
                write!(f, "no samples at ({axis1}, {axis2})")
            }
        }
    }
}

/// Per-category durations of one cell, in palette order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellDurations([f64; Category::COUNT]);

impl CellDurations {
    /// Duration recorded for `category`, zero if none.
    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    /// Sum over all categories, accumulated in palette order.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(category, duration)` pairs in palette order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// First-seen-ordered keys of one axis.
#[derive(Clone, Debug, Default)]
struct AxisKeys {
    values: Vec<AxisValue>,
    by_label: HashMap<String, usize>,
}

impl AxisKeys {
    fn intern(
        &mut self,
        axis: AxisId,
        value: AxisValue,
        diagnostics: &mut Vec<DatasetDiagnostic>,
    ) -> usize {
        match self.by_label.entry(value.label()) {
            Entry::Occupied(slot) => {
                let index = *slot.get();
                let stored = &mut self.values[index];
                if !stored.same_as(&value) {
                    let diagnostic = DatasetDiagnostic::LabelCollision {
                        axis,
                        label: slot.key().clone(),
                        previous: core::mem::replace(stored, value.clone()),
                        current: value,
                    };
                    tracing::warn!(%diagnostic, "inconsistent dataset");
                    diagnostics.push(diagnostic);
                }
                index
            }
            Entry::Vacant(slot) => {
                let index = self.values.len();
                slot.insert(index);
                self.values.push(value);
                index
            }
        }
    }

    fn labels(&self) -> Vec<String> {
        self.values.iter().map(AxisValue::label).collect()
    }
}

/// Accumulates samples into a [`Dataset`].
///
/// ```
/// use barscape_charts::{Category, DatasetBuilder};
///
/// let mut builder = DatasetBuilder::new();
/// builder.push(1.0, 10.0, Category::Checkout, 3500.0).unwrap();
/// builder
///     .insert_cell(5.0, 10.0, [(Category::Commit, 1500.0)])
///     .unwrap();
/// let aggregation = builder.aggregate();
/// assert_eq!(aggregation.dataset().axis1_labels(), ["1", "5"]);
/// assert_eq!(aggregation.max_cell_total(), 3500.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DatasetBuilder {
    axis1: AxisKeys,
    axis2: AxisKeys,
    cells: HashMap<(usize, usize), [Option<f64>; Category::COUNT]>,
    diagnostics: Vec<DatasetDiagnostic>,
}

impl DatasetBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    pub fn push(
        &mut self,
        axis1: impl Into<AxisValue>,
        axis2: impl Into<AxisValue>,
        category: Category,
        duration: f64,
    ) -> ChartResult<()> {
        self.push_sample(RawSample::new(axis1, axis2, category, duration))
    }

    /// Adds one observation.
    ///
    /// Fails with [`ChartError::InvalidDuration`] for negative or non-finite
    /// durations, leaving the builder unchanged.
    pub fn push_sample(&mut self, sample: RawSample) -> ChartResult<()> {
        validate_duration(sample.duration)?;
        let cell = self.cell_index(sample.axis1, sample.axis2);
        self.record(cell, sample.category, sample.duration);
        Ok(())
    }

    /// Adds one cell of a nested `axis1 -> axis2 -> category -> duration`
    /// mapping.
    ///
    /// The cell is registered even if `durations` is empty, so it gets a bar
    /// of zero-height segments rather than being reported missing. All
    /// durations are validated before anything is recorded.
    pub fn insert_cell(
        &mut self,
        axis1: impl Into<AxisValue>,
        axis2: impl Into<AxisValue>,
        durations: impl IntoIterator<Item = (Category, f64)>,
    ) -> ChartResult<()> {
        let durations: Vec<(Category, f64)> = durations.into_iter().collect();
        for &(_, duration) in &durations {
            validate_duration(duration)?;
        }
        let cell = self.cell_index(axis1.into(), axis2.into());
        for (category, duration) in durations {
            self.record(cell, category, duration);
        }
        Ok(())
    }

    fn cell_index(&mut self, axis1: AxisValue, axis2: AxisValue) -> (usize, usize) {
        let u = self.axis1.intern(AxisId::Axis1, axis1, &mut self.diagnostics);
        let n = self.axis2.intern(AxisId::Axis2, axis2, &mut self.diagnostics);
        self.cells.entry((u, n)).or_insert([None; Category::COUNT]);
        (u, n)
    }

    fn record(&mut self, (u, n): (usize, usize), category: Category, duration: f64) {
        let slots = self.cells.entry((u, n)).or_insert([None; Category::COUNT]);
        if slots[category.index()].replace(duration).is_some() {
            let diagnostic = DatasetDiagnostic::DuplicateSample {
                axis1: self.axis1.values[u].label(),
                axis2: self.axis2.values[n].label(),
                category,
            };
            tracing::warn!(%diagnostic, "inconsistent dataset");
            self.diagnostics.push(diagnostic);
        }
    }

    /// Finishes the dataset: fixes label order, fills unset categories with
    /// zero, reports missing cells, and computes the largest cell total.
    pub fn aggregate(self) -> Aggregation {
        let Self {
            axis1,
            axis2,
            cells,
            mut diagnostics,
        } = self;

        let cells: HashMap<(usize, usize), CellDurations> = cells
            .into_iter()
            .map(|(key, slots)| (key, CellDurations(slots.map(|d| d.unwrap_or(0.0)))))
            .collect();

        let dataset = Dataset {
            axis1_labels: axis1.labels(),
            axis2_labels: axis2.labels(),
            axis1_values: axis1.values,
            axis2_values: axis2.values,
            cells,
        };

        let mut max_cell_total = 0.0_f64;
        for u in 0..dataset.axis1_cardinality() {
            for n in 0..dataset.axis2_cardinality() {
                match dataset.cell(u, n) {
                    Some(cell) => max_cell_total = max_cell_total.max(cell.total()),
                    None => {
                        let diagnostic = DatasetDiagnostic::MissingCell {
                            axis1: dataset.axis1_labels[u].clone(),
                            axis2: dataset.axis2_labels[n].clone(),
                        };
                        tracing::warn!(%diagnostic, "inconsistent dataset");
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }

        Aggregation {
            dataset,
            max_cell_total,
            diagnostics,
        }
    }
}

fn validate_duration(duration: f64) -> ChartResult<()> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidDuration(duration))
    }
}

/// Aggregates a sample sequence in one go.
pub fn aggregate(samples: impl IntoIterator<Item = RawSample>) -> ChartResult<Aggregation> {
    let mut builder = DatasetBuilder::new();
    for sample in samples {
        builder.push_sample(sample)?;
    }
    Ok(builder.aggregate())
}

/// Durations indexed by axis positions, with the label order of each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    axis1_values: Vec<AxisValue>,
    axis2_values: Vec<AxisValue>,
    axis1_labels: Vec<String>,
    axis2_labels: Vec<String>,
    cells: HashMap<(usize, usize), CellDurations>,
}

impl Dataset {
    /// Axis-1 keys in first-seen order.
    pub fn axis1_values(&self) -> &[AxisValue] {
        &self.axis1_values
    }

    /// Axis-2 keys in first-seen order.
    pub fn axis2_values(&self) -> &[AxisValue] {
        &self.axis2_values
    }

    /// Axis-1 tick labels in first-seen order.
    pub fn axis1_labels(&self) -> &[String] {
        &self.axis1_labels
    }

    /// Axis-2 tick labels in first-seen order.
    pub fn axis2_labels(&self) -> &[String] {
        &self.axis2_labels
    }

    /// Number of distinct axis-1 keys.
    pub fn axis1_cardinality(&self) -> usize {
        self.axis1_labels.len()
    }

    /// Number of distinct axis-2 keys.
    pub fn axis2_cardinality(&self) -> usize {
        self.axis2_labels.len()
    }

    /// The cell at zero-based positions `(u, n)`, if it received any sample.
    pub fn cell(&self, u: usize, n: usize) -> Option<&CellDurations> {
        self.cells.get(&(u, n))
    }

    /// Number of cells that received samples.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no sample was recorded.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The finished dataset with its derived statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregation {
    dataset: Dataset,
    max_cell_total: f64,
    diagnostics: Vec<DatasetDiagnostic>,
}

impl Aggregation {
    /// The dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Largest per-cell sum of durations; the raw upper bound of the value
    /// axis.
    pub fn max_cell_total(&self) -> f64 {
        self.max_cell_total
    }

    /// Inconsistencies found while building, in the order they were found.
    pub fn diagnostics(&self) -> &[DatasetDiagnostic] {
        &self.diagnostics
    }
}

// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend content.
//!
//! The legend panel lists the category swatches and the unit toggle. Only
//! its content is planned here; placement and drawing belong to the host.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

use crate::palette::{Category, CategoryPalette};
use crate::unit::Unit;

/// A swatch row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    /// The category shown.
    pub category: Category,
    /// Row label.
    pub label: &'static str,
    /// Swatch color.
    pub color: Color,
    /// Swatch color as packed `0xRRGGBB`.
    pub rgb: u32,
}

/// One choice of the unit toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitOption {
    /// The unit.
    pub unit: Unit,
    /// Toggle label.
    pub label: &'static str,
    /// Whether this is the unit the layout was built with.
    pub active: bool,
}

/// Everything the legend panel shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    /// Swatch rows in palette order.
    pub entries: Vec<LegendEntry>,
    /// Unit choices, exactly one of them active.
    pub units: Vec<UnitOption>,
}

impl Legend {
    /// Builds the legend for `palette` with `active` selected.
    pub fn new(palette: &CategoryPalette, active: Unit) -> Self {
        let entries = palette
            .iter()
            .map(|swatch| LegendEntry {
                category: swatch.category,
                label: swatch.category.name(),
                color: swatch.color(),
                rgb: swatch.rgb,
            })
            .collect();
        let units = Unit::ALL
            .into_iter()
            .map(|unit| UnitOption {
                unit,
                label: unit.display_name(),
                active: unit == active,
            })
            .collect();
        Self { entries, units }
    }

    /// The selected unit.
    pub fn active_unit(&self) -> Option<Unit> {
        self.units.iter().find(|o| o.active).map(|o| o.unit)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn entries_follow_the_palette() {
        let legend = Legend::new(&CategoryPalette::STANDARD, Unit::Seconds);
        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label).collect();
        assert_eq!(
            labels,
            ["checkout", "commit", "branch", "destruction", "disconnect"]
        );
        assert_eq!(legend.entries[1].rgb, 0x336699);
    }

    #[test]
    fn exactly_one_unit_is_active() {
        let legend = Legend::new(&CategoryPalette::STANDARD, Unit::Milliseconds);
        assert_eq!(legend.units.iter().filter(|o| o.active).count(), 1);
        assert_eq!(legend.active_unit(), Some(Unit::Milliseconds));
        assert_eq!(legend.units[0].label, "Seconds");
    }
}

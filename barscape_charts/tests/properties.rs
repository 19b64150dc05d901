// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for scales, aggregation and layout.
//!
//! 1. Nice scales cover the requested range with a positive, evenly dividing
//!    step.
//! 2. With ten ticks from zero, the scale never needs more than ten steps.
//! 3. Aggregation keeps first-seen label order and counts.
//! 4. Layout is deterministic.
//! 5. Stack heights are cell totals scaled by the nice upper bound.
//! 6. Bars sit exactly on their lower-axis ticks.
//! 7. Toggling the unit away and back reproduces the layout.

use barscape_charts::{
    Aggregation, Category, ChartConfig, ChartLayoutEngine, DatasetBuilder,
    HeuristicTextMeasurer, NiceScale, Unit, build_layout,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Distinct axis keys, a full grid of per-category durations, and the
/// aggregation built from them. At least one duration is positive.
fn grid_strategy() -> impl Strategy<Value = (Vec<u32>, Vec<u32>, Aggregation)> {
    (
        prop::collection::hash_set(0_u32..1000, 1..7),
        prop::collection::hash_set(0_u32..1000, 1..7),
    )
        .prop_flat_map(|(axis1, axis2)| {
            let axis1: Vec<u32> = axis1.into_iter().collect();
            let axis2: Vec<u32> = axis2.into_iter().collect();
            let cells = axis1.len() * axis2.len();
            (
                Just(axis1),
                Just(axis2),
                prop::collection::vec(prop::array::uniform5(0_u32..50_000), cells),
            )
        })
        .prop_map(|(axis1, axis2, mut durations)| {
            durations[0][0] += 1;
            let mut builder = DatasetBuilder::new();
            let mut next = durations.iter();
            for &u in &axis1 {
                for &n in &axis2 {
                    let cell = next.next().copied().unwrap_or_default();
                    builder
                        .insert_cell(u, n, Category::ALL.into_iter().zip(cell.map(f64::from)))
                        .unwrap();
                }
            }
            (axis1, axis2, builder.aggregate())
        })
}

fn layout(aggregation: &Aggregation, unit: Unit) -> barscape_charts::ChartLayout {
    build_layout(
        &ChartConfig::new(),
        aggregation,
        unit,
        &HeuristicTextMeasurer,
    )
    .unwrap()
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Nice scales
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nice_scale_covers_the_range(
        lower in -10_000_i32..10_000,
        span in 1_u32..1_000_000,
        max_ticks in 2_usize..20,
    ) {
        let lower = f64::from(lower);
        let upper = lower + f64::from(span);
        let s = NiceScale::compute(lower, upper, max_ticks).unwrap();
        let eps = 1e-9 * upper.abs().max(lower.abs()).max(1.0);

        prop_assert!(s.tick_spacing() > 0.0);
        prop_assert!(s.nice_upper_bound() >= upper - eps, "{:?}", s);
        prop_assert!(s.nice_lower_bound() <= lower + eps, "{:?}", s);

        let steps = (s.nice_upper_bound() - s.nice_lower_bound()) / s.tick_spacing();
        prop_assert!((steps - steps.round()).abs() < 1e-6, "{} steps in {:?}", steps, s);
    }

    #[test]
    fn ten_ticks_from_zero_fit(upper in 1_u32..10_000_000) {
        let s = NiceScale::compute(0.0, f64::from(upper), 10).unwrap();
        prop_assert!(s.step_count() <= 10, "{:?}", s);
        prop_assert!(s.nice_upper_bound() / s.tick_spacing() <= 10.0 + 1e-9);
    }

    #[test]
    fn nice_scale_is_deterministic(upper in 1_u32..10_000_000, max_ticks in 2_usize..20) {
        let a = NiceScale::compute(0.0, f64::from(upper), max_ticks).unwrap();
        let b = NiceScale::compute(0.0, f64::from(upper), max_ticks).unwrap();
        prop_assert_eq!(a.nice_upper_bound().to_bits(), b.nice_upper_bound().to_bits());
        prop_assert_eq!(a.tick_spacing().to_bits(), b.tick_spacing().to_bits());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Aggregation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn aggregation_keeps_first_seen_order((axis1, axis2, aggregation) in grid_strategy()) {
        let dataset = aggregation.dataset();
        let expected1: Vec<String> = axis1.iter().map(u32::to_string).collect();
        let expected2: Vec<String> = axis2.iter().map(u32::to_string).collect();
        prop_assert_eq!(dataset.axis1_labels(), expected1.as_slice());
        prop_assert_eq!(dataset.axis2_labels(), expected2.as_slice());
        prop_assert_eq!(dataset.cell_count(), axis1.len() * axis2.len());
        prop_assert!(aggregation.diagnostics().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–7. Layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic((_, _, aggregation) in grid_strategy()) {
        prop_assert_eq!(layout(&aggregation, Unit::Seconds), layout(&aggregation, Unit::Seconds));
    }

    #[test]
    fn stack_heights_are_normalized((_, _, aggregation) in grid_strategy()) {
        let l = layout(&aggregation, Unit::Seconds);
        let upper = l.scale.nice_upper_bound();
        for stack in &l.bars {
            let cell = aggregation
                .dataset()
                .cell(stack.axis1_index, stack.axis2_index)
                .unwrap();
            let heights: f64 = stack.segments.iter().map(|s| s.height).sum();
            prop_assert!((heights / 100.0 - cell.total() / upper).abs() <= 1e-9);
            prop_assert!(stack.total_height() <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn bars_align_with_axis_ticks((_, _, aggregation) in grid_strategy()) {
        let l = layout(&aggregation, Unit::Seconds);
        for stack in &l.bars {
            let t1 = &l.axis1.plan.ticks[stack.axis1_index];
            let t2 = &l.axis2.plan.ticks[stack.axis2_index];
            prop_assert_eq!(stack.position.x.to_bits(), t1.position.to_bits());
            prop_assert_eq!(stack.position.y.to_bits(), t2.position.to_bits());
        }
    }

    #[test]
    fn unit_toggle_round_trips((_, _, aggregation) in grid_strategy()) {
        let mut engine =
            ChartLayoutEngine::new(ChartConfig::new(), aggregation, HeuristicTextMeasurer)
                .unwrap();
        let seconds = engine.layout().clone();
        let ms = engine.set_unit("ms").unwrap().clone();
        prop_assert_ne!(&ms, &seconds);
        prop_assert_eq!(engine.set_unit("s").unwrap(), &seconds);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Fixed scenarios
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn two_by_two_scenario() {
    let mut b = DatasetBuilder::new();
    b.push(1.0, 1.0, Category::Checkout, 0.0).unwrap();
    b.push(1.0, 10.0, Category::Checkout, 3500.0).unwrap();
    b.push(5.0, 1.0, Category::Checkout, 3500.0).unwrap();
    b.push(5.0, 10.0, Category::Checkout, 17_500.0).unwrap();
    let aggregation = b.aggregate();
    assert_eq!(aggregation.max_cell_total(), 17_500.0);

    let l = layout(&aggregation, Unit::Seconds);
    assert!(l.scale.nice_upper_bound() >= 17_500.0);
    assert!(l.scale.step_count() <= 10);
    let steps = l.scale.nice_upper_bound() / l.scale.tick_spacing();
    assert_eq!(steps, steps.round());
}

#[test]
fn six_by_six_grid_has_six_labels_per_axis() {
    let users = [1.0, 5.0, 10.0, 15.0, 20.0, 25.0];
    let spaces = [1.0, 10.0, 20.0, 30.0, 40.0, 50.0];
    let mut b = DatasetBuilder::new();
    for (x, u) in users.into_iter().enumerate() {
        for (z, n) in spaces.into_iter().enumerate() {
            let base = (x * z) as f64 / 2.0;
            b.insert_cell(
                u,
                n,
                [
                    (Category::Checkout, 700.0 * base),
                    (Category::Commit, 300.0 * base),
                    (Category::Branch, 1000.0 * base),
                    (Category::Destruction, 100.0 * base),
                    (Category::Disconnect, 100.0 * base),
                ],
            )
            .unwrap();
        }
    }
    let aggregation = b.aggregate();
    let dataset = aggregation.dataset();
    assert_eq!(dataset.axis1_cardinality(), 6);
    assert_eq!(dataset.axis2_cardinality(), 6);
    assert_eq!(dataset.axis1_labels(), ["1", "5", "10", "15", "20", "25"]);
    assert_eq!(dataset.axis2_labels(), ["1", "10", "20", "30", "40", "50"]);
    assert_eq!(aggregation.max_cell_total(), 27_500.0);

    let l = layout(&aggregation, Unit::Seconds);
    assert_eq!(l.scale.tick_spacing(), 5000.0);
    assert_eq!(l.scale.nice_upper_bound(), 30_000.0);
    let labels: Vec<&str> = l
        .value_axis
        .plan
        .ticks
        .iter()
        .map(|t| t.label_text.as_str())
        .collect();
    assert_eq!(labels, ["0s", "5s", "10s", "15s", "20s", "25s", "30s"]);
}

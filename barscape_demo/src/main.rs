// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demo for `barscape_charts`.
//!
//! Builds the sample workspace-timing dataset, lays it out in seconds and in
//! milliseconds, and writes one SVG per unit. Set `RUST_LOG=debug` to see
//! the scale chosen for each build.

mod svg;

use std::error::Error;

use barscape_charts::{Aggregation, Category, ChartConfig, ChartLayoutEngine, DatasetBuilder};
use barscape_text::TextMeasurer;
use tracing_subscriber::EnvFilter;

/// Users on one axis, product spaces on the other.
const USERS: [u32; 6] = [1, 5, 10, 15, 20, 25];
const SPACES: [u32; 6] = [1, 10, 20, 30, 40, 50];

/// Relative cost of each operation; a cell's duration grows with the product
/// of its grid positions.
const WEIGHTS: [(Category, f64); 5] = [
    (Category::Checkout, 700.0),
    (Category::Commit, 300.0),
    (Category::Branch, 1000.0),
    (Category::Destruction, 100.0),
    (Category::Disconnect, 100.0),
];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let aggregation = sample_dataset()?;
    tracing::info!(
        axis1 = aggregation.dataset().axis1_cardinality(),
        axis2 = aggregation.dataset().axis2_cardinality(),
        max_cell_total = aggregation.max_cell_total(),
        "aggregated sample dataset"
    );

    let mut engine = ChartLayoutEngine::new(ChartConfig::new(), aggregation, demo_measurer())?;
    for unit in ["s", "ms"] {
        engine.set_unit(unit)?;
        let mut scene = svg::SvgScene::new(4.0);
        scene.add_layout(engine.config(), engine.layout());

        let path = format!("barscape_demo_{unit}.svg");
        std::fs::write(&path, scene.to_svg_string())?;
        tracing::info!(%path, "wrote chart");
    }
    Ok(())
}

fn sample_dataset() -> Result<Aggregation, Box<dyn Error>> {
    let mut builder = DatasetBuilder::new();
    for (x, users) in USERS.into_iter().enumerate() {
        for (z, spaces) in SPACES.into_iter().enumerate() {
            let base = (x * z) as f64 / 2.0;
            builder.insert_cell(
                users,
                spaces,
                WEIGHTS.map(|(category, weight)| (category, weight * base)),
            )?;
        }
    }
    Ok(builder.aggregate())
}

fn demo_measurer() -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(barscape_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(barscape_text::HeuristicTextMeasurer)
    }
}

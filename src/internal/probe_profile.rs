#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]

use plotters::prelude::*;
use primemap::{ChainedHashMap, QuadraticHashMap, TableError, hash_function_1, std_hash};
use rand::Rng;

// Profiling parameters
const NUM_KEYS: usize = 5_000;
const SAMPLE_EVERY: usize = 50;
const INITIAL_CAPACITY: usize = 53;
// Share of inserted keys removed again after every sample, in percent
const CHURN_PERCENT: usize = 10;

const LOAD_PLOT: &str = "table_load.png";
const EMPTY_PLOT: &str = "empty_buckets.png";

// Hashers to compare
const HASHERS: [(&str, fn(&str) -> usize); 2] =
    [("code point sum", hash_function_1), ("std DefaultHasher", std_hash)];

#[derive(Debug, Default, Clone)]
struct Series {
    label: String,
    load: Vec<(usize, f64)>,
    empty_ratio: Vec<(usize, f64)>,
}

fn load_points(series: &Series) -> &[(usize, f64)] {
    &series.load
}

fn empty_points(series: &Series) -> &[(usize, f64)] {
    &series.empty_ratio
}

fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.random_range(3..12);
    (0..len).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

fn profile_quadratic(
    label: &str,
    hasher: fn(&str) -> usize,
    keys: &[String],
) -> Result<Series, TableError> {
    let mut map = QuadraticHashMap::new(INITIAL_CAPACITY, hasher);
    let mut series = Series { label: format!("quadratic / {label}"), ..Series::default() };

    for (inserted, key) in keys.iter().enumerate() {
        map.put(key.as_str(), inserted)?;
        if inserted % SAMPLE_EVERY == SAMPLE_EVERY - 1 {
            // Leave some tombstones behind
            for stale in keys[..=inserted].iter().step_by(100 / CHURN_PERCENT) {
                map.remove(stale);
            }
            series.load.push((inserted + 1, map.table_load()));
            series
                .empty_ratio
                .push((inserted + 1, map.empty_buckets() as f64 / map.capacity() as f64));
        }
    }

    println!(
        "  {}: size = {}, capacity = {}, load = {:.2}, empty = {}",
        series.label,
        map.len(),
        map.capacity(),
        map.table_load(),
        map.empty_buckets()
    );
    Ok(series)
}

fn profile_chained(
    label: &str,
    hasher: fn(&str) -> usize,
    keys: &[String],
) -> Result<Series, TableError> {
    let mut map = ChainedHashMap::new(INITIAL_CAPACITY, hasher);
    let mut series = Series { label: format!("chained / {label}"), ..Series::default() };

    for (inserted, key) in keys.iter().enumerate() {
        map.put(key.as_str(), inserted)?;
        if inserted % SAMPLE_EVERY == SAMPLE_EVERY - 1 {
            for stale in keys[..=inserted].iter().step_by(100 / CHURN_PERCENT) {
                map.remove(stale);
            }
            series.load.push((inserted + 1, map.table_load()));
            series
                .empty_ratio
                .push((inserted + 1, map.empty_buckets() as f64 / map.capacity() as f64));
        }
    }

    println!(
        "  {}: size = {}, capacity = {}, load = {:.2}, empty = {}, longest chain = {}",
        series.label,
        map.len(),
        map.capacity(),
        map.table_load(),
        map.empty_buckets(),
        map.longest_chain()
    );
    Ok(series)
}

fn draw(
    path: &str,
    caption: &str,
    y_desc: &str,
    all_series: &[Series],
    value: fn(&Series) -> &[(usize, f64)],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = all_series
        .iter()
        .flat_map(|series| value(series).iter().map(|&(_, y)| y))
        .fold(0.0, f64::max)
        * 1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (index, series) in all_series.iter().enumerate() {
        let color = &colors[index % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(value(series).iter().copied(), line_style))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let keys: Vec<String> = (0..NUM_KEYS).map(|_| random_key(&mut rng)).collect();

    println!("Profiling {NUM_KEYS} random keys from capacity {INITIAL_CAPACITY}");

    let mut all_series = Vec::with_capacity(HASHERS.len() * 2);
    for &(label, hasher) in &HASHERS {
        all_series.push(profile_quadratic(label, hasher, &keys)?);
        all_series.push(profile_chained(label, hasher, &keys)?);
    }

    draw(LOAD_PLOT, "Table Load While Inserting", "size / capacity", &all_series, load_points)?;
    draw(
        EMPTY_PLOT,
        "Unused Buckets While Inserting",
        "empty / capacity",
        &all_series,
        empty_points,
    )?;

    println!("Generated plot images: {LOAD_PLOT}, {EMPTY_PLOT}");
    Ok(())
}

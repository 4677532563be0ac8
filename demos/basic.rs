//! QuickPlot demo - one line, one scatter and one histogram window.
//!
//! Run with `cargo run --example basic`.

use quickplot::{Figure, PlotConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    quickplot::configure(PlotConfig {
        window_size: [900.0, 600.0],
        ..Default::default()
    })?;

    let mut line = Figure::new("Sine and Cosine", "l");
    line.set_x_label("t");
    line.set_y_label("value");
    let ts: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
    line.add_numeric_series("sin", ts.iter().map(|&t| (t, t.sin())));
    line.add_numeric_series("cos", ts.iter().map(|&t| (t, t.cos())));
    line.show()?;

    let mut scatter = Figure::new("Squares", "S");
    scatter.set_x_label("n");
    scatter.set_y_label("n^2");
    scatter.add_numeric_series("squares", (0..20).map(|n| (n as f64, (n * n) as f64)));
    scatter.show()?;

    let mut histogram = Figure::new("Favourite Fruit", "h");
    histogram.set_x_label("Fruit");
    histogram.add_category_series(
        "Class A",
        ["apple", "pear", "apple", "kiwi", "pear", "apple"],
    );
    histogram.add_category_series("Class B", ["kiwi", "kiwi", "apple", "plum"]);
    histogram.show()?;
    histogram.save("fruit.png")?;

    quickplot::wait_until_closed();
    Ok(())
}

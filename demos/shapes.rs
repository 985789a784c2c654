//! Prints the shape generators' output as text grids.
//!
//! Usage:
//! ```text
//! cargo run --example shapes                  # every shape
//! cargo run --example shapes -- arc line      # selected shapes
//! RUST_LOG=sonogrid=debug cargo run --example shapes -- disc
//! ```

use std::f64::consts::FRAC_PI_4;

use sonogrid::operations::creation::{
    MakeArc, MakeCartCircle, MakeCircle, MakeDisc, MakeLine, Radius,
};
use sonogrid::{Grid, GridPoint, SonogridError};

const SHAPES: [&str; 6] = ["circle", "disc", "line", "ray", "arc", "cart_circle"];

fn show(name: &str, grid: &Grid<bool>) {
    println!("{name} ({} filled)\n{grid}\n", grid.count_filled());
}

fn run(shape: &str) -> Result<(), SonogridError> {
    match shape {
        "circle" => show("circle r=5", &MakeCircle::new(13, 13, 0, 0, 5.0).execute()?),
        "disc" => show("disc r=4", &MakeDisc::new(11, 11, 0, 0, 4.0).execute()?),
        "line" => show(
            "line (2,3)-(14,9)",
            &MakeLine::between(16, 12, GridPoint::new(2, 3), GridPoint::new(14, 9)).execute()?,
        ),
        "ray" => show(
            "ray at pi/4",
            &MakeLine::angled(12, 12, GridPoint::new(11, 11), FRAC_PI_4, f64::INFINITY)
                .execute()?,
        ),
        "arc" => show(
            "arc r=10 d=11",
            &MakeArc::new(
                [16, 16],
                GridPoint::new(8, 2),
                Radius::Finite(10),
                11,
                GridPoint::new(8, 16),
            )
            .execute()?,
        ),
        "cart_circle" => {
            let points = MakeCartCircle::new(1.0, 8).execute()?;
            println!("cart_circle r=1 n=8");
            for p in points.column_iter() {
                println!("  ({:+.3}, {:+.3})", p[0], p[1]);
            }
            println!();
        }
        other => tracing::warn!(shape = other, "unknown shape, expected one of {SHAPES:?}"),
    }
    Ok(())
}

fn main() -> Result<(), SonogridError> {
    // Default: WARN for everything, INFO for sonogrid.
    // Override with RUST_LOG env var (e.g. RUST_LOG=sonogrid=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("sonogrid=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let selected: Vec<String> = std::env::args().skip(1).collect();
    if selected.is_empty() {
        for shape in SHAPES {
            run(shape)?;
        }
    } else {
        for shape in &selected {
            run(shape)?;
        }
    }
    Ok(())
}

use chrono::TimeDelta;
use clap::{Parser, ValueEnum};
use fire_spread_core::core_types::units::{MetersPerSecond, Radians};
use fire_spread_core::{
    EllipseModelKind, FuelCatalog, IgnitionPoint, PerimeterSnapshot, SimulationConfig,
    SpreadSimulation, WindState,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EllipseArg {
    Alexander,
    Catchpole,
}

impl From<EllipseArg> for EllipseModelKind {
    fn from(arg: EllipseArg) -> Self {
        match arg {
            EllipseArg::Alexander => EllipseModelKind::Alexander,
            EllipseArg::Catchpole => EllipseModelKind::Catchpole,
        }
    }
}

/// Point ignition given as `x,y` or `x,y,delay_seconds`
#[derive(Debug, Clone, Copy)]
struct IgnitionArg {
    x: f64,
    y: f64,
    delay_seconds: i64,
}

fn parse_ignition(value: &str) -> Result<IgnitionArg, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("'{s}' is not a number: {e}"))
    };
    match parts.as_slice() {
        [x, y] => Ok(IgnitionArg {
            x: number(x)?,
            y: number(y)?,
            delay_seconds: 0,
        }),
        [x, y, delay] => Ok(IgnitionArg {
            x: number(x)?,
            y: number(y)?,
            delay_seconds: delay
                .parse()
                .map_err(|e| format!("'{delay}' is not a whole number of seconds: {e}"))?,
        }),
        _ => Err(format!("expected x,y or x,y,delay_seconds, got '{value}'")),
    }
}

/// Headless wildfire perimeter spread run
#[derive(Parser, Debug)]
#[command(name = "fire-spread-demo")]
#[command(about = "Grow wildfire perimeters from point ignitions", long_about = None)]
struct Args {
    /// Simulation configuration JSON (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fuel catalog JSON (standard 13 models when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Fuel model code used everywhere
    #[arg(short, long, default_value = "1")]
    fuel: String,

    /// Ignition as x,y or x,y,delay_seconds (repeatable)
    #[arg(short, long, value_parser = parse_ignition, default_value = "0,0")]
    ignition: Vec<IgnitionArg>,

    /// Simulated duration in seconds
    #[arg(short, long, default_value_t = 600)]
    duration: i64,

    /// Wind speed at midflame height in m/s (overrides the configuration)
    #[arg(short, long)]
    wind_speed: Option<f64>,

    /// Wind direction in degrees counter-clockwise from +y
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f64,

    /// Slope in degrees, rising towards +y (overrides the configuration)
    #[arg(long)]
    slope: Option<f64>,

    /// Fire shape model (overrides the configuration)
    #[arg(long, value_enum)]
    ellipse: Option<EllipseArg>,

    /// Write every perimeter snapshot to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn build_config(args: &Args) -> fire_spread_core::Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(speed) = args.wind_speed {
        config.default_wind = WindState::Vector {
            speed: MetersPerSecond::new(speed),
            direction: Radians::from_degrees(args.wind_direction),
        };
    }
    if let Some(slope) = args.slope {
        config.default_slope = Radians::from_degrees(slope);
    }
    if let Some(ellipse) = args.ellipse {
        config.ellipse_model = ellipse.into();
    }
    config.validate()?;
    Ok(config)
}

fn print_snapshot(snapshot: &PerimeterSnapshot) {
    let vertices: usize = snapshot.polygons.iter().map(|p| p.vertex_count()).sum();
    println!(
        "{}  perimeters: {:>3}  vertices: {:>5}  area: {:>12.1} m²",
        snapshot.timestamp_iso(),
        snapshot.polygons.len(),
        vertices,
        snapshot.total_area()
    );
}

fn main() -> fire_spread_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => FuelCatalog::from_json_file(path)?,
        None => FuelCatalog::standard(),
    };
    let fuel = catalog.require(&args.fuel)?;
    let config = build_config(&args)?;
    info!(
        "Fuel {} ({}), wind {:.1} m/s, slope {:.1}°",
        fuel.code,
        fuel.name,
        *config.default_wind.speed(),
        config.default_slope.to_degrees()
    );

    let start = config.start_time;
    let mut sim = SpreadSimulation::uniform(config, fuel)?;
    for ignition in &args.ignition {
        let time = start + TimeDelta::seconds(ignition.delay_seconds);
        if let Err(err) = sim.add_ignition(IgnitionPoint::new(ignition.x, ignition.y, time)) {
            warn!("Skipping ignition at ({}, {}): {}", ignition.x, ignition.y, err);
        }
    }

    println!("=== Fire Spread Demo ===\n");
    let end = start + TimeDelta::seconds(args.duration);
    while sim.current_time() < end {
        let report = sim.step()?;
        if !report.held_vertices.is_empty() {
            warn!("{} vertices held at degenerate tangents", report.held_vertices.len());
        }
        if let Some(snapshot) = sim.history().last() {
            print_snapshot(snapshot);
        }
        if sim.is_idle() {
            info!("No fire left to spread");
            break;
        }
    }

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string_pretty(sim.history())?)?;
        println!("\nWrote {} snapshots to {}", sim.history().len(), path.display());
    }
    Ok(())
}

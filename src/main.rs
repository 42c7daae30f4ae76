// src/main.rs
use anyhow::Context;
use clap::Parser;
use lines_to_polygon::io::{self, FeatureSource, JsonSink, Project, ResultSink, SvgSink};
use lines_to_polygon::{FeatureArena, Outcome, PolygoniseConfig, Polygoniser};
use std::path::PathBuf;
use std::process::ExitCode;

/// Setzt einen Ring aus ungeordneten Linien-Features zusammen
#[derive(Parser, Debug)]
#[command(name = "lines2poly")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Projektdatei (JSON) mit dem Linien-Layer
    input: PathBuf,

    /// Ergebnis (Polygon oder Fehlerpunkte) als JSON schreiben
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Zusätzlich eine SVG-Ansicht schreiben
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Konfigurationsdatei (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Toleranz für Punktgleichheit, überschreibt die Konfiguration
    #[arg(long)]
    tolerance: Option<f64>,

    /// Mehr Log-Ausgabe (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => PolygoniseConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PolygoniseConfig::default(),
    };
    if let Some(tolerance) = cli.tolerance {
        config = config.with_tolerance(tolerance);
    }

    let project = Project::from_path(&cli.input)
        .with_context(|| format!("reading project {}", cli.input.display()))?;
    let layer = project.active()?;
    log::info!("Layer '{}' with crs {}", layer.name, layer.crs());

    let mut sinks: Vec<Box<dyn ResultSink>> = Vec::new();
    if let Some(path) = &cli.output {
        sinks.push(Box::new(JsonSink::to_path(path)?));
    }
    if let Some(path) = &cli.svg {
        // Eingabelinien als Hintergrund; Eingabefehler meldet gleich `run`
        let background = layer.load_features().ok().and_then(|f| FeatureArena::new(f).ok());
        let mut sink = SvgSink::new(path);
        if let Some(arena) = &background {
            sink = sink.with_lines(arena);
        }
        sinks.push(Box::new(sink));
    }

    let polygoniser = Polygoniser::new(config);
    let outcome = io::run(layer, &polygoniser, &mut sinks)?;

    let code = match &outcome {
        Outcome::Assembled(assembly) => {
            println!(
                "Polygon from {} of {} lines, {} ring points",
                assembly.polygon.source_line_count(),
                assembly.feature_count,
                assembly.polygon.ring().len()
            );
            ExitCode::SUCCESS
        }
        Outcome::Defects(ledger) => {
            println!("{} geometry errors found", ledger.count());
            for (i, record) in ledger.iter().enumerate() {
                println!("  {:>3}: {}", i + 1, record);
            }
            ExitCode::from(2)
        }
        Outcome::Degenerate { error, .. } => {
            println!("{error}");
            ExitCode::from(3)
        }
    };

    Ok(code)
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_kml::{
    convert_file, extract_file, BuildReport, Bounds, Config, ConvertOptions, Error, Point, Result,
};

/// Convert survey tables (CSV, XLSX, XLS) into KML
#[derive(Parser, Debug)]
#[command(name = "survey-kml", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a KML document for the input table
    Convert {
        /// Input file (.csv, .xlsx or .xls)
        input: PathBuf,

        /// UTM zone for easting/northing columns, e.g. 51S
        #[arg(long, short)]
        zone: Option<String>,

        /// Output path; defaults to the input path with a .kml extension
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Document title; defaults to the input file name
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the extracted points as JSON
    Preview {
        /// Input file (.csv, .xlsx or .xls)
        input: PathBuf,

        /// UTM zone for easting/northing columns, e.g. 51S
        #[arg(long, short)]
        zone: Option<String>,
    },
}

#[derive(Serialize)]
struct Preview {
    zone: String,
    points: Vec<Point>,
    bounds: Option<Bounds>,
    report: BuildReport,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_kml=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Convert {
            input,
            zone,
            output,
            title,
        } => {
            let zone = zone.unwrap_or_else(|| config.default_zone.clone());
            let options = ConvertOptions {
                title,
                resolver: Some(config.resolver()),
            };

            let conversion = convert_file(&input, &zone, options)?;
            let output = output.unwrap_or_else(|| input.with_file_name(&conversion.file_name));
            std::fs::write(&output, &conversion.document)?;

            info!(output = %output.display(), "wrote KML");
            println!(
                "Wrote {} point(s) to {} ({} row(s) skipped)",
                conversion.points.len(),
                output.display(),
                conversion.report.rejected()
            );
        }
        Command::Preview { input, zone } => {
            let zone = zone.unwrap_or_else(|| config.default_zone.clone());

            let (zone, points, report) = extract_file(&input, &zone, Some(config.resolver()))?;
            let preview = Preview {
                zone: zone.to_string(),
                bounds: points.bounds(),
                points: points.into_vec(),
                report,
            };
            println!("{}", serde_json::to_string_pretty(&preview).map_err(|e| Error::Io(e.into()))?);
        }
    }

    Ok(())
}

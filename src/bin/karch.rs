//! karch - Kepler planetary architectures CLI
//!
//! Command-line interface for classifying planet-candidate catalogs.

use clap::{Args, Parser, Subcommand, ValueEnum};
use kepler_architectures::data::{
    export_classified, load_catalog, write_catalog_csv, Catalog, CatalogStore, ClassifiedCatalog,
};
use kepler_architectures::error::Result;
use kepler_architectures::filter::StatusFlag;
use kepler_architectures::pipeline::{process_catalog, PipelineConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// CLI-friendly status flag enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStatusFlag {
    /// Period-related status codes (`P...`)
    Period,
    /// Radius-related status codes (`P...` or `R...`)
    Radius,
    /// Radius disposition codes (`R...`)
    RDisposition,
}

impl From<CliStatusFlag> for StatusFlag {
    fn from(flag: CliStatusFlag) -> Self {
        match flag {
            CliStatusFlag::Period => StatusFlag::PeriodRelated,
            CliStatusFlag::Radius => StatusFlag::RadiusRelated,
            CliStatusFlag::RDisposition => StatusFlag::RDispositionRelated,
        }
    }
}

/// Kepler Planetary Architectures
#[derive(Parser)]
#[command(name = "karch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the catalog comes from and how it is classified.
#[derive(Args)]
struct ClassifyArgs {
    /// Project root holding data/raw and data/processed
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Raw catalog CSV (default: latest file in data/raw)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pipeline configuration files (TOML, YAML or JSON); several run in parallel
    #[arg(short, long, required = true, num_args = 1..)]
    config: Vec<PathBuf>,

    /// Keep only candidates whose status flag matches
    #[arg(short, long, value_enum)]
    status_flag: Option<CliStatusFlag>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw catalog CSV
    Normalize {
        /// Path to raw catalog CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the normalized CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Classify a catalog into singles and multis
    Classify {
        #[command(flatten)]
        args: ClassifyArgs,

        /// Output directory for singles.csv, multis.csv and summary.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print classification summaries
    Summary {
        #[command(flatten)]
        args: ClassifyArgs,

        /// Output format: text, json, or yaml
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate an example pipeline configuration
    Example {
        /// Output path for the example configuration
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize { input, output } => cmd_normalize(&input, &output),
        Commands::Classify { args, output } => cmd_classify(&args, output.as_deref()),
        Commands::Summary { args, format } => cmd_summary(&args, &format),
        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Normalize one raw file
fn cmd_normalize(input: &Path, output: &Path) -> Result<()> {
    eprintln!("Normalizing {:?}...", input);
    let catalog = load_catalog(input)?;

    write_catalog_csv(&catalog, output)?;
    eprintln!(
        "Wrote {} candidates in {} systems to {:?}",
        catalog.len(),
        catalog.n_systems(),
        output
    );

    Ok(())
}

/// Load the catalog and run every configuration over it
fn run_all(args: &ClassifyArgs) -> Result<Vec<(PathBuf, ClassifiedCatalog)>> {
    let store = CatalogStore::new(&args.root);
    let (catalog, source) = store.load(args.input.as_deref())?;
    eprintln!(
        "Loaded {} candidates in {} systems from {:?}",
        catalog.len(),
        catalog.n_systems(),
        source
    );

    let configs = args
        .config
        .iter()
        .map(|path| Ok((path.clone(), PipelineConfig::from_path(path)?)))
        .collect::<Result<Vec<_>>>()?;

    let status_flag = args.status_flag.map(StatusFlag::from);
    classify_all(&catalog, &configs, status_flag)
}

/// Run configurations in parallel over one shared catalog
fn classify_all(
    catalog: &Catalog,
    configs: &[(PathBuf, PipelineConfig)],
    status_flag: Option<StatusFlag>,
) -> Result<Vec<(PathBuf, ClassifiedCatalog)>> {
    configs
        .par_iter()
        .map(|(path, config)| {
            let classified = process_catalog(catalog, config, status_flag)?;
            Ok((path.clone(), classified))
        })
        .collect()
}

/// Classify and optionally export
fn cmd_classify(args: &ClassifyArgs, output: Option<&Path>) -> Result<()> {
    let results = run_all(args)?;
    let several = results.len() > 1;

    for (config_path, classified) in &results {
        eprintln!("Configuration {:?}:", config_path);
        eprintln!("{}", classified);

        if let Some(dir) = output {
            let target = if several {
                let stem = config_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "config".to_string());
                dir.join(stem)
            } else {
                dir.to_path_buf()
            };
            export_classified(classified, &target)?;
            eprintln!("Wrote results to {:?}", target);
        }
    }

    Ok(())
}

/// Print summaries in the requested format
fn cmd_summary(args: &ClassifyArgs, format: &str) -> Result<()> {
    let results = run_all(args)?;

    match format {
        "json" | "yaml" => {
            let summaries: Vec<serde_json::Value> = results
                .iter()
                .map(|(path, classified)| {
                    serde_json::json!({
                        "config": path.display().to_string(),
                        "summary": classified.summary(),
                    })
                })
                .collect();
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", serde_yaml::to_string(&summaries)?);
            }
        }
        _ => {
            for (path, classified) in &results {
                println!("Configuration: {}", path.display());
                println!("{}", classified.summary());
            }
        }
    }

    Ok(())
}

/// Write the default configuration
fn cmd_example(output_path: &Path) -> Result<()> {
    let config = PipelineConfig::default();
    let text = match output_path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        _ => config.to_toml()?,
    };

    std::fs::write(output_path, &text)?;
    eprintln!("Wrote example configuration to {:?}", output_path);
    eprintln!();
    eprintln!("Contents:");
    println!("{}", text);

    Ok(())
}

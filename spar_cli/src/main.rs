//! # Spar CLI
//!
//! Command-line front end for the spar geometry engine.
//!
//! ```bash
//! spar solve --site uk
//! spar solve --site sa --params overrides.json --units cm --json
//! spar params
//! spar equations
//! ```

mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use spar_core::equations::generate_equations_markdown;
use spar_core::params::{resolve_with_overrides, PARAMETER_DESCRIPTIONS};
use spar_core::{solve_with, LengthUnit, ParameterInput, ReportView, RootSearch, SiteId};
use tracing::info;

use crate::report::TextReport;

#[derive(Parser)]
#[command(name = "spar")]
#[command(about = "Parabolic dish spar geometry calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a dish and print its cut list
    Solve(SolveArgs),
    /// List the input parameters and their meanings
    Params,
    /// Print the equation reference as markdown
    Equations,
}

#[derive(Args)]
struct SolveArgs {
    /// Site preset (uk, sa, us)
    #[arg(long, default_value = "sa")]
    site: String,
    /// JSON file of parameter overrides layered on the preset
    #[arg(long)]
    params: Option<PathBuf>,
    /// Unit to solve and report in (mm, cm, in); preset lengths are converted
    #[arg(long)]
    units: Option<String>,
    /// Digits after the decimal point
    #[arg(long)]
    precision: Option<usize>,
    /// Radius search used to invert the arc length
    #[arg(long, value_enum, default_value_t = SearchMode::Sampled)]
    search: SearchMode,
    /// Print the derived geometry as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchMode {
    Sampled,
    Bisection,
}

impl From<SearchMode> for RootSearch {
    fn from(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Sampled => RootSearch::default(),
            SearchMode::Bisection => RootSearch::bisection(),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve(args) => solve(args),
        Command::Params => {
            print_params();
            Ok(())
        }
        Command::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

fn solve(args: SolveArgs) -> Result<()> {
    let site = SiteId::from_str_flexible(&args.site)?;

    let mut overrides = match &args.params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ParameterInput::from_json(&json)
                .with_context(|| format!("invalid parameter file {}", path.display()))?
        }
        None => ParameterInput::default(),
    };
    if let Some(units) = &args.units {
        overrides.units = Some(LengthUnit::from_str_flexible(units)?);
    }
    if args.precision.is_some() {
        overrides.precision = args.precision;
    }

    let params = resolve_with_overrides(site, overrides)
        .with_context(|| format!("failed to resolve parameters for site '{}'", site))?;
    let geometry = solve_with(&params, args.search.into())
        .with_context(|| format!("failed to solve dish geometry for site '{}'", site))?;
    info!(site = %site, units = %params.units, marks = geometry.spar_marks.len(), "dish solved");

    if args.json {
        let json = serde_json::to_string_pretty(&geometry).context("failed to serialize geometry")?;
        println!("{}", json);
    } else {
        println!("{}", TextReport(ReportView::new(&params, &geometry)));
    }
    Ok(())
}

fn print_params() {
    println!("Parameters (lengths in the site unit unless noted):");
    for (symbol, meaning) in PARAMETER_DESCRIPTIONS {
        println!("  {:<26} {}", symbol, meaning);
    }
    println!();
    println!("Sites: {}", SiteId::ALL.map(|s| s.code()).join(", "));
    println!("Units: {}", LengthUnit::ALL.map(|u| u.label()).join(", "));
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use tax_cli::{logging, profile, render};
use tax_core::registry::{EntityRuleRegistry, JurisdictionRegistry};
use tax_core::{Jurisdiction, TaxEngine};
use tax_data::BracketLoader;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Multi-jurisdiction tax estimator.
///
/// Runs a calculation profile through the built-in tax tables, optionally
/// overriding bracket schedules from a CSV file.
#[derive(Debug, Parser)]
#[command(name = "tax-engine", version, about, long_about = None)]
struct Cli {
    /// Log filter: a bare level or any `RUST_LOG` directive.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the tax for a profile.
    Calculate {
        /// TOML profile with jurisdiction, entity type and income figures.
        #[arg(short, long)]
        profile: PathBuf,

        /// CSV of extra custom income sources.
        #[arg(long)]
        income_csv: Option<PathBuf>,

        /// CSV of bracket overrides.
        #[arg(short, long)]
        brackets: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List supported jurisdictions.
    Jurisdictions,

    /// List the entity types offered in a jurisdiction.
    Entities {
        #[arg(short, long)]
        jurisdiction: String,
    },

    /// Show a jurisdiction's bracket schedule.
    Brackets {
        #[arg(short, long)]
        jurisdiction: String,

        /// CSV of bracket overrides to apply first.
        #[arg(short, long)]
        brackets: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

// ─── engine setup ────────────────────────────────────────────────────────────

fn build_engine(brackets: Option<&Path>) -> Result<TaxEngine> {
    let mut registry = JurisdictionRegistry::builtin().context("built-in tax tables are invalid")?;

    if let Some(path) = brackets {
        let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = BracketLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        info!(path = %path.display(), records = records.len(), "loading bracket overrides");
        registry = BracketLoader::apply(registry, &records)
            .with_context(|| format!("Rejected bracket overrides: {}", path.display()))?;
    }

    let entities = EntityRuleRegistry::builtin().context("built-in entity rules are invalid")?;
    Ok(TaxEngine::new(registry, entities)?)
}

fn parse_jurisdiction(code: &str) -> Result<Jurisdiction> {
    Jurisdiction::parse(code).ok_or_else(|| anyhow!("unknown jurisdiction '{code}'"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli.command, "starting");

    match cli.command {
        Command::Calculate {
            profile: profile_path,
            income_csv,
            brackets,
            format,
        } => {
            let engine = build_engine(brackets.as_deref())?;
            let mut input = profile::load_profile(&profile_path)?;
            if let Some(path) = income_csv {
                profile::append_income_csv(&mut input, &path)?;
            }

            let result = engine
                .calculate_total_tax(&input)
                .context("calculation failed")?;
            let output = match format {
                OutputFormat::Text => {
                    let config = engine.jurisdiction_config(input.jurisdiction)?;
                    render::render_text(&result, config)?
                }
                OutputFormat::Json => render::render_json(&result)?,
            };
            println!("{output}");
        }
        Command::Jurisdictions => {
            let engine = build_engine(None)?;
            print!("{}", render::render_jurisdictions(engine.jurisdictions().configs()));
        }
        Command::Entities { jurisdiction } => {
            let engine = build_engine(None)?;
            let jurisdiction = parse_jurisdiction(&jurisdiction)?;
            let entity_types = engine.entity_types_for_jurisdiction(jurisdiction)?;
            print!("{}", render::render_entity_types(entity_types));
        }
        Command::Brackets {
            jurisdiction,
            brackets,
        } => {
            let engine = build_engine(brackets.as_deref())?;
            let jurisdiction = parse_jurisdiction(&jurisdiction)?;
            let config = engine.jurisdiction_config(jurisdiction)?;
            print!("{}", render::render_brackets(config)?);
        }
    }

    Ok(())
}

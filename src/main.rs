use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use budget_sim::allocation::chart::{build_chart_slices, ChartSlice};
use budget_sim::allocation::AllocationVector;
use budget_sim::config::{Config, ConfigOverrides};
use budget_sim::model::{BudgetModel, SimulationReport};
use budget_sim::output::csv::{allocations_to_csv, chart_to_csv, report_to_csv};
use budget_sim::output::json::render_json;
use budget_sim::output::table::{
    render_allocation_table, render_chart_table, render_report_table, render_sectors_table,
};
use budget_sim::sector::{all_details, Sector, SectorDetails};
use budget_sim::server::run_server;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "budget-sim",
    about = "Finance Minister for a Day: allocate the budget and see the impact"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    allocations: AllocationArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Raw text per sector, coerced the same way as the numeric input field.
#[derive(Debug, clap::Args, Clone, Default)]
struct AllocationArgs {
    #[arg(long, global = true, allow_hyphen_values = true)]
    education: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    health: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    infrastructure: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    welfare: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    defense: Option<String>,
}

impl AllocationArgs {
    fn entries(&self) -> [(Sector, Option<&str>); 5] {
        [
            (Sector::Education, self.education.as_deref()),
            (Sector::Health, self.health.as_deref()),
            (Sector::Infrastructure, self.infrastructure.as_deref()),
            (Sector::Welfare, self.welfare.as_deref()),
            (Sector::Defense, self.defense.as_deref()),
        ]
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Simulate,
    Validate,
    Sectors,
    Chart,
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let (host, port) = match &cli.command {
        Commands::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        seed: cli.seed,
        host,
        port,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let format = resolve_output_format(cli.output, &config);
    let mut model = match config.simulation.seed {
        Some(seed) => BudgetModel::with_seed(seed),
        None => BudgetModel::new(),
    };
    for (sector, raw) in cli.allocations.entries() {
        if let Some(raw) = raw {
            model.set_raw(sector, raw);
        }
    }

    match &cli.command {
        Commands::Simulate => {
            if matches!(format, OutputFormat::Table) {
                println!("{}", render_allocation_table(model.allocations()));
            }
            let report = model.simulate()?;
            print_report(report, format)?;
        }
        Commands::Validate => print_validation(model.allocations(), format)?,
        Commands::Sectors => print_sectors(&all_details(), format)?,
        Commands::Chart => print_chart(&build_chart_slices(model.allocations()), format)?,
        Commands::Serve { .. } => {
            let bind = format!("{}:{}", config.server.host, config.server.port);
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            return run_server(config, model, addr).await;
        }
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    }

    Ok(())
}

fn resolve_output_format(cli_format: Option<OutputFormat>, config: &Config) -> OutputFormat {
    if let Some(format) = cli_format {
        return format;
    }
    OutputFormat::from_str(&config.output.format, true).unwrap_or_else(|_| {
        warn!(
            "unknown output format in config: {}, using table",
            config.output.format
        );
        OutputFormat::Table
    })
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_report(report: &SimulationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_report_table(report)),
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => println!("{}", report_to_csv(report)?),
    }
    Ok(())
}

fn print_validation(allocations: &AllocationVector, format: OutputFormat) -> Result<()> {
    let validation = allocations.validate();
    match format {
        OutputFormat::Table => {
            println!("{}", render_allocation_table(allocations));
            if validation.is_valid() {
                println!("Allocation is valid. Ready to simulate.");
            }
        }
        OutputFormat::Json => {
            let body = json!({
                "allocations": allocations,
                "total": allocations.total(),
                "validation": validation,
                "message": validation.message(),
            });
            println!("{}", render_json(&body)?);
        }
        OutputFormat::Csv => println!("{}", allocations_to_csv(allocations)?),
    }
    Ok(())
}

fn print_sectors(details: &[SectorDetails], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_sectors_table(details)),
        OutputFormat::Json => println!("{}", render_json(details)?),
        OutputFormat::Csv => {
            warn!("CSV output for sectors not implemented, using JSON");
            println!("{}", render_json(details)?);
        }
    }
    Ok(())
}

fn print_chart(slices: &[ChartSlice], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_chart_table(slices)),
        OutputFormat::Json => println!("{}", render_json(slices)?),
        OutputFormat::Csv => println!("{}", chart_to_csv(slices)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn sector_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["budget-sim", "simulate", "--education", "40"])
            .expect("flag after subcommand parses");
        assert!(matches!(cli.command, Commands::Simulate));
        assert_eq!(cli.allocations.education.as_deref(), Some("40"));

        let cli = Cli::try_parse_from(["budget-sim", "--defense", "-5", "chart"])
            .expect("flag before subcommand parses");
        assert!(matches!(cli.command, Commands::Chart));
        assert_eq!(cli.allocations.defense.as_deref(), Some("-5"));
    }
}

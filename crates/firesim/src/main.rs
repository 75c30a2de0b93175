use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use firesim::init_logging;
use firesim::report::{FireReport, OutputFormat, outlook_line, records, render_json, render_table};
use firesim::scenario::{load_inflation_history, load_scenario, scenario_to_yaml};
use firesim::util::format_percentage;
use firesim_core::config::SimulationConfig;
use firesim_core::inflation::{InflationSource, RateFrequency};
use firesim_core::model::{FireSearchResult, FireSimulation, RetirementOutlook};
use firesim_core::simulation::{run_fire_simulation, run_simulation};
use rust_decimal::prelude::ToPrimitive;

#[derive(Parser, Debug)]
#[command(name = "firesim")]
#[command(about = "Month-by-month financial independence simulator")]
struct Args {
    /// Scenario file (YAML); defaults are used when omitted
    #[arg(short, long, global = true)]
    scenario: Option<PathBuf>,

    /// Replay inflation from a `date,value` CSV history
    #[arg(long, global = true)]
    inflation_csv: Option<PathBuf>,

    /// Treat the CSV values as monthly rates instead of annual ones
    #[arg(long, global = true, requires = "inflation_csv")]
    monthly_rates: bool,

    /// Seed for the random inflation models
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,

    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the household forward with salary kept throughout
    Run {
        /// Months to simulate (scenario horizon by default)
        #[arg(short, long)]
        months: Option<usize>,
    },
    /// Search for the earliest month salary can stop
    Fire {
        /// Months the money must last (scenario horizon by default)
        #[arg(short, long)]
        months: Option<usize>,

        /// Evaluate candidates across all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Print the default scenario as YAML
    Defaults,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    if let Command::Defaults = args.command {
        print!("{}", scenario_to_yaml(&SimulationConfig::default())?);
        return Ok(());
    }

    let mut config = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(path) = &args.inflation_csv {
        let frequency = if args.monthly_rates {
            RateFrequency::Monthly
        } else {
            RateFrequency::Annual
        };
        config = config.with_inflation(load_inflation_history(path, frequency)?);
    }
    config.validate()?;

    let init = config.initial_state();
    tracing::info!(
        start = %init.date,
        properties = init.investment_properties.len(),
        inflation = %format_percentage(config.annual_inflation_rate.to_f64().unwrap_or_default()),
        surplus = config.invest_cash_surplus_strategy.label(),
        "simulation configured"
    );

    match args.command {
        Command::Run { months } => {
            let months = months.unwrap_or(config.horizon_months);
            let mut source = config.inflation_source(args.seed)?;
            let inflation = source.as_mut().map(|s| s as &mut dyn InflationSource);
            let simulations = run_simulation(&init, months, inflation);
            tracing::info!(months = simulations.len() - 1, "run finished");

            let records = records(&simulations);
            match args.format {
                OutputFormat::Table => print!("{}", render_table(&records)),
                OutputFormat::Json => println!("{}", render_json(&records)?),
            }
        }
        Command::Fire { months, parallel } => {
            let months = months.unwrap_or(config.horizon_months);
            let result = search(&config, &init, months, args.seed, parallel)?;
            tracing::info!(
                attempts = result.attempts,
                accepted = ?result.accepted_month,
                "search finished"
            );

            match args.format {
                OutputFormat::Table => {
                    let outlook = result.outlook();
                    println!("{}", outlook_line(&outlook));
                    if let RetirementOutlook::Retire { .. } = outlook
                        && !result.met_horizon()
                    {
                        println!("Money does not last the full {months} months.");
                    }
                    println!();
                    print!("{}", render_table(&records(&result.simulations)));
                }
                OutputFormat::Json => println!("{}", render_json(&FireReport::from(&result))?),
            }
        }
        Command::Defaults => {}
    }

    Ok(())
}

fn search(
    config: &SimulationConfig,
    init: &FireSimulation,
    months: usize,
    seed: u64,
    parallel: bool,
) -> Result<FireSearchResult> {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            return Ok(firesim_core::simulation::run_fire_simulation_par(
                init,
                months,
                || config.inflation_source(seed).ok().flatten(),
            ));
        }
        #[cfg(not(feature = "parallel"))]
        tracing::warn!("built without the parallel feature, searching sequentially");
    }

    let mut source = config.inflation_source(seed)?;
    let inflation = source.as_mut().map(|s| s as &mut dyn InflationSource);
    Ok(run_fire_simulation(init, months, inflation))
}

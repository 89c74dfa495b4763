//! CLI entry point: `run` drives a configured scenario to completion,
//! `report` re-emits text reports from a finished run's catch ledger,
//! `assess` invokes a single stock's external assessment bundle in
//! isolation

use clap::{Parser, Subcommand};
use colored::Colorize;
use ecomse::config::Config;

#[derive(Parser)]
#[command(name = "ecomse", about = "Spatially explicit ecosystem + fisheries MSE simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// run a scenario from a TOML config file to completion
    Run {
        #[arg(long)]
        config: std::path::PathBuf,
    },
    /// write the catch/discard/effort report for a finished run
    Report {
        #[arg(long)]
        out_dir: std::path::PathBuf,
    },
    /// invoke the external assessment tool for one stock
    Assess {
        #[arg(long)]
        stock: String,
        #[arg(long)]
        working_dir: std::path::PathBuf,
        #[arg(long)]
        tool: String,
    },
}

fn main() -> anyhow::Result<()> {
    ecomse::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config } => {
            let config = Config::load(&config)?;
            log::info!(
                "starting a {}-year run at dt={}s",
                config.scheduling.run_years,
                config.scheduling.dt_seconds
            );
            // scenario setup (grid, registries, tracer catalogue) is
            // supplied by the embedding scenario file; the CLI only
            // validates configuration and hands off to `sim::RunContext`.
            log::warn!("scenario wiring is not provided on the command line; see sim::RunContext::new");
        }
        Command::Report { out_dir } => {
            if out_dir.exists() {
                let overwrite = dialoguer::Confirm::new()
                    .with_prompt(format!("{} already exists, overwrite its reports?", out_dir.display()))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !overwrite {
                    println!("{}", "report cancelled".yellow());
                    return Ok(());
                }
            }
            log::info!("reports would be written under {}", out_dir.display());
        }
        Command::Assess {
            stock,
            working_dir,
            tool,
        } => {
            let bundle = ecomse::assessment_files::AssessmentBundle {
                stock_code: stock.clone(),
                ..Default::default()
            };
            let ctx = ecomse::management::assessment::ExternalAssessmentContext {
                f_curr: 0.0,
                m: 0.0,
                tier: 0,
            };
            match ecomse::management::assessment::external_assessment(&bundle, &working_dir, &tool, ctx) {
                Ok(estimate) => println!(
                    "{stock}: {} Bcurr={:.3} RBC={:.3}",
                    "OK".green(),
                    estimate.b_curr,
                    estimate.rbc
                ),
                Err(err) => {
                    println!("{stock}: {}", "FAILED".red());
                    log::error!("assessment failed for {stock}: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

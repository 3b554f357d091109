//! `bmit` - CLI for bmitrack
//!
//! Terminal front-end over the bmitrack library: one subcommand per
//! screen action.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use bmitrack::cli::{Cli, Command, ComputeCommand, ConfigCommand, HistoryCommand};
use bmitrack::{init_logging, Config, Session, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Compute(cmd) => handle_compute(&config, &cmd),
        Command::History(cmd) => handle_history(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_compute(config: &Config, cmd: &ComputeCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path()).context("opening measurement store")?;
    let mut session = Session::new(&store, config.input)?;

    session.set_weight(cmd.weight.clone());
    session.set_height(cmd.height.clone());
    let measurement = session.compute()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&measurement)?);
    } else {
        let result = session
            .last_result()
            .context("compute succeeded but no result was recorded")?;
        println!("Body Mass Index is {}", result.value);
        println!("({})", result.classification);
    }
    Ok(())
}

fn handle_history(config: &Config, cmd: &HistoryCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path()).context("opening measurement store")?;
    let mut history = store.history()?;

    if let Some(limit) = cmd.limit.or_else(|| config.history_limit()) {
        history.truncate(limit);
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else if history.is_empty() {
        println!("No measurements recorded yet.");
    } else {
        println!("BMI History");
        for measurement in &history {
            println!("{}", measurement.history_line());
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let path = config.database_path();

    // Don't create the database file just to report on it.
    let summary = if path.exists() {
        let store = Store::open(&path).context("opening measurement store")?;
        Some((store.count()?, store.latest()?))
    } else {
        None
    };

    if json {
        let status = match &summary {
            Some((count, latest)) => serde_json::json!({
                "database_path": path,
                "records": count,
                "latest": latest,
            }),
            None => serde_json::json!({
                "database_path": path,
                "records": 0,
                "latest": null,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("bmit status");
        println!("-----------");
        println!("Database:  {}", path.display());
        match summary {
            Some((count, latest)) => {
                println!("Records:   {count}");
                if let Some(m) = latest {
                    println!("Latest:    {}", m.history_line());
                }
            }
            None => println!("Records:   0 (database not created yet)"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[storage]");
                println!("  database_path  = {}", config.database_path().display());
                println!();
                println!("[input]");
                println!("  max_weight_lb  = {}", config.input.max_weight_lb);
                println!("  max_height_in  = {}", config.input.max_height_in);
                println!();
                println!("[display]");
                println!("  history_limit  = {}", config.display.history_limit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

//! Loan Advisor CLI
//!
//! # Usage
//!
//! ```bash
//! # Add a loan and look at it
//! loan-advisor add "Car" --balance 12000 --rate 6.5 --payment 300 --day 15
//! loan-advisor list
//! loan-advisor schedule Car --months 24
//!
//! # Ask for advice with $200/month to spare
//! loan-advisor analyze --goal payoff-all-loans --budget 200
//!
//! # Every rule-based strategy side by side
//! loan-advisor compare --budget 200
//! ```

use anyhow::Result;
use clap::Parser;
use log::debug;

use loan_advisor::LoanStore;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.config();
    debug!("loan data file: {}", config.data_file.display());
    let store = LoanStore::new(config.data_file.clone());

    match cli.command {
        Commands::List => commands::loans::list(&store)?,
        Commands::Add(args) => commands::loans::add(&store, args)?,
        Commands::Update(args) => commands::loans::update(&store, args)?,
        Commands::Remove(args) => commands::loans::remove(&store, args)?,
        Commands::Import(args) => commands::loans::import(&store, args)?,
        Commands::Schedule(args) => commands::schedule::execute(&store, args)?,
        Commands::Analyze(args) => commands::analyze::execute(&store, &config, args).await?,
        Commands::Compare(args) => commands::analyze::compare(&store, args)?,
    }

    Ok(())
}

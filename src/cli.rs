//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use loan_advisor::AdvisorConfig;

use crate::commands::{
    AddArgs, AnalyzeArgs, CompareArgs, ImportArgs, RemoveArgs, ScheduleArgs, UpdateArgs,
};

/// Loan Advisor - amortization projections and payment strategy advice
#[derive(Parser)]
#[command(name = "loan-advisor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Loan data file (overrides LOAN_ADVISOR_DATA)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Reasoning service base URL (overrides LOAN_ADVISOR_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Model identifier (overrides LOAN_ADVISOR_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Request timeout in seconds (overrides LOAN_ADVISOR_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> AdvisorConfig {
        let mut config = AdvisorConfig::from_env();
        if let Some(data) = &self.data {
            config.data_file = data.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List loans with monthly interest and estimated payoff date
    List,

    /// Add a loan
    Add(AddArgs),

    /// Change fields of an existing loan
    Update(UpdateArgs),

    /// Remove a loan
    Remove(RemoveArgs),

    /// Import loans from a CSV file
    Import(ImportArgs),

    /// Month-by-month amortization schedule for one loan
    Schedule(ScheduleArgs),

    /// Recommend payments for the portfolio
    Analyze(AnalyzeArgs),

    /// Run every rule-based strategy side by side
    Compare(CompareArgs),
}

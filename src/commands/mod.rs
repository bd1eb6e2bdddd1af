//! CLI command implementations

pub mod loans;
pub mod schedule;
pub mod analyze;

pub use loans::{AddArgs, ImportArgs, RemoveArgs, UpdateArgs};
pub use schedule::ScheduleArgs;
pub use analyze::{AnalyzeArgs, CompareArgs};

use anyhow::{anyhow, Result};
use loan_advisor::Loan;

/// Index of the loan named `name`, ignoring case
pub fn find_loan(loans: &[Loan], name: &str) -> Result<usize> {
    loans
        .iter()
        .position(|l| l.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("no loan named '{}'", name))
}

//! Schedule command: month-by-month amortization of one loan

use anyhow::Result;
use chrono::Local;
use clap::Args;

use loan_advisor::amortization::{ScheduleEnd, MAX_PROJECTION_MONTHS};
use loan_advisor::format::currency;
use loan_advisor::{AmortizationEngine, LoanStore};

use super::find_loan;

/// Arguments for the schedule command
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Loan to project
    pub name: String,

    /// Stop after this many months
    #[arg(long, default_value_t = MAX_PROJECTION_MONTHS)]
    pub months: u32,

    /// Print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(store: &LoanStore, args: ScheduleArgs) -> Result<()> {
    let loans = store.load()?;
    let loan = &loans[find_loan(&loans, &args.name)?];

    let engine = AmortizationEngine::with_max_months(args.months);
    let schedule = engine.project_schedule(loan, Local::now().date_naive());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!("Amortization schedule: {}", schedule.loan_name);
    println!("{:>5} {:>12} {:>14} {:>12} {:>12} {:>12} {:>14}",
        "Month", "Date", "Opening", "Interest", "Principal", "Payment", "Closing");
    println!("{}", "-".repeat(87));

    for row in &schedule.rows {
        println!("{:>5} {:>12} {:>14} {:>12} {:>12} {:>12} {:>14}",
            row.month,
            row.payment_date.format("%Y-%m-%d"),
            currency(row.opening_balance),
            currency(row.interest),
            currency(row.principal),
            currency(row.payment),
            currency(row.closing_balance),
        );
    }

    let summary = schedule.summary();
    println!("{}", "-".repeat(87));
    println!("Months:         {}", summary.months);
    println!("Total interest: {}", currency(summary.total_interest));
    println!("Total paid:     {}", currency(summary.total_paid));
    match schedule.end {
        ScheduleEnd::PaidOff => match summary.payoff_date {
            Some(date) => println!("Paid off:       {}", date.format("%Y-%m-%d")),
            None => println!("Paid off:       already"),
        },
        ScheduleEnd::NotAmortizing => {
            println!("Payment does not cover interest; the balance never reaches zero")
        }
        ScheduleEnd::Truncated => println!("Remaining after {} months: {}",
            args.months, currency(summary.final_balance)),
    }

    Ok(())
}

//! Loan collection commands: list, add, update, remove, import

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use log::{info, warn};
use rust_decimal::Decimal;
use std::path::PathBuf;

use loan_advisor::format::{currency, percent};
use loan_advisor::loan::{import_csv, MIN_PAYMENT_DAY};
use loan_advisor::{estimate_payoff_from, Loan, LoanStore};

use super::find_loan;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Loan name (must be unique)
    pub name: String,

    /// Outstanding principal
    #[arg(long)]
    pub balance: Decimal,

    /// Annual interest rate as a percentage, e.g. 6.5
    #[arg(long)]
    pub rate: Decimal,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Decimal,

    /// Day of month the payment is due (1-28)
    #[arg(long, default_value_t = MIN_PAYMENT_DAY)]
    pub day: u32,
}

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Loan to change
    pub name: String,

    /// New name
    #[arg(long = "rename")]
    pub new_name: Option<String>,

    #[arg(long)]
    pub balance: Option<Decimal>,

    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub payment: Option<Decimal>,

    #[arg(long)]
    pub day: Option<u32>,
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Loan to remove
    pub name: String,
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file with Name,CurrentBalance,InterestRate,MonthlyPayment,PaymentDay columns
    pub file: PathBuf,

    /// Replace the stored loans instead of appending
    #[arg(long)]
    pub replace: bool,
}

pub fn list(store: &LoanStore) -> Result<()> {
    let loans = store.load()?;
    if loans.is_empty() {
        println!("No loans stored in {}", store.path().display());
        return Ok(());
    }
    print_loans(&loans, Local::now().date_naive());
    Ok(())
}

fn print_loans(loans: &[Loan], today: NaiveDate) {
    println!("{:<24} {:>14} {:>8} {:>12} {:>4} {:>12} {:>12}",
        "Name", "Balance", "Rate", "Payment", "Day", "Interest/mo", "Payoff");
    println!("{}", "-".repeat(94));

    for loan in loans {
        let payoff = estimate_payoff_from(loan, today)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!("{:<24} {:>14} {:>8} {:>12} {:>4} {:>12} {:>12}",
            loan.name(),
            currency(loan.current_balance()),
            percent(loan.interest_rate()),
            currency(loan.monthly_payment()),
            loan.payment_day(),
            currency(loan.monthly_interest()),
            payoff,
        );
    }

    let total_balance: Decimal = loans.iter().map(Loan::current_balance).sum();
    let total_payment: Decimal = loans.iter().map(Loan::monthly_payment).sum();
    println!("{}", "-".repeat(94));
    println!("{:<24} {:>14} {:>8} {:>12}", "Total", currency(total_balance), "", currency(total_payment));
}

pub fn add(store: &LoanStore, args: AddArgs) -> Result<()> {
    let mut loans = store.load()?;
    if find_loan(&loans, &args.name).is_ok() {
        bail!("a loan named '{}' already exists", args.name);
    }

    let loan = Loan::new(args.name, args.balance, args.rate, args.payment, args.day)
        .context("invalid loan")?;
    info!("adding loan '{}'", loan.name());
    println!("Added {} ({} at {})", loan.name(), currency(loan.current_balance()), percent(loan.interest_rate()));

    loans.push(loan);
    store.save(&loans)?;
    Ok(())
}

/// Apply every supplied field; a rejected value is reported and leaves that field unchanged
pub fn update(store: &LoanStore, args: UpdateArgs) -> Result<()> {
    let mut loans = store.load()?;
    let index = find_loan(&loans, &args.name)?;

    if let Some(new_name) = &args.new_name {
        if find_loan(&loans, new_name).is_ok_and(|i| i != index) {
            bail!("a loan named '{}' already exists", new_name);
        }
    }

    let loan = &mut loans[index];
    let mut rejected = Vec::new();
    if let Some(name) = args.new_name {
        if let Err(e) = loan.set_name(name) {
            rejected.push(e);
        }
    }
    if let Some(balance) = args.balance {
        if let Err(e) = loan.set_current_balance(balance) {
            rejected.push(e);
        }
    }
    if let Some(rate) = args.rate {
        if let Err(e) = loan.set_interest_rate(rate) {
            rejected.push(e);
        }
    }
    if let Some(payment) = args.payment {
        if let Err(e) = loan.set_monthly_payment(payment) {
            rejected.push(e);
        }
    }
    if let Some(day) = args.day {
        if let Err(e) = loan.set_payment_day(day) {
            rejected.push(e);
        }
    }

    for err in &rejected {
        warn!("rejected update of '{}': {}", args.name, err);
        println!("Rejected: {}", err);
    }
    println!("Updated {}", loan.name());

    store.save(&loans)?;
    Ok(())
}

pub fn remove(store: &LoanStore, args: RemoveArgs) -> Result<()> {
    let mut loans = store.load()?;
    let index = find_loan(&loans, &args.name)?;
    let removed = loans.remove(index);

    store.save(&loans)?;
    println!("Removed {}", removed.name());
    Ok(())
}

/// Append imported loans; names already present are skipped
pub fn import(store: &LoanStore, args: ImportArgs) -> Result<()> {
    let imported = import_csv(&args.file)?;
    let mut loans = if args.replace { Vec::new() } else { store.load()? };

    let mut added = 0;
    for loan in imported {
        if find_loan(&loans, loan.name()).is_ok() {
            warn!("skipping '{}': a loan with that name already exists", loan.name());
            continue;
        }
        loans.push(loan);
        added += 1;
    }

    store.save(&loans)?;
    println!("Imported {} loan(s) from {}", added, args.file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LoanStore {
        LoanStore::new(dir.path().join("loans.json"))
    }

    fn add_args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            balance: dec!(1000),
            rate: dec!(5),
            payment: dec!(100),
            day: 10,
        }
    }

    #[test]
    fn test_add_rejects_duplicate_names() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        add(&store, add_args("Car")).unwrap();
        assert!(add(&store, add_args("car")).is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_update_keeps_rejected_fields() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        add(&store, add_args("Car")).unwrap();

        update(&store, UpdateArgs {
            name: "Car".to_string(),
            new_name: None,
            balance: Some(dec!(800)),
            rate: Some(dec!(-1)),
            payment: None,
            day: Some(31),
        })
        .unwrap();

        let loans = store.load().unwrap();
        assert_eq!(loans[0].current_balance(), dec!(800));
        assert_eq!(loans[0].interest_rate(), dec!(5));
        assert_eq!(loans[0].payment_day(), 10);
    }

    #[test]
    fn test_remove_unknown_loan_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        add(&store, add_args("Car")).unwrap();

        assert!(remove(&store, RemoveArgs { name: "Boat".to_string() }).is_err());
        remove(&store, RemoveArgs { name: "Car".to_string() }).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}

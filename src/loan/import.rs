//! Bulk loan import from CSV

use csv::Reader;
use log::warn;
use rust_decimal::Decimal;
use std::path::Path;

use super::Loan;
use crate::error::{LoanError, PersistenceError};

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CurrentBalance")]
    current_balance: Decimal,
    #[serde(rename = "InterestRate")]
    interest_rate: Decimal,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: Decimal,
    #[serde(rename = "PaymentDay")]
    payment_day: u32,
}

impl CsvRow {
    fn to_loan(self) -> Result<Loan, LoanError> {
        Loan::new(
            self.name,
            self.current_balance,
            self.interest_rate,
            self.monthly_payment,
            self.payment_day,
        )
    }
}

/// Import loans from a CSV file; rows with invalid values are skipped
pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Loan>, PersistenceError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path).map_err(|source| PersistenceError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(reader).map_err(|source| PersistenceError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Import loans from any reader (e.g., string buffer, stdin)
pub fn import_csv_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Loan>, PersistenceError> {
    read_rows(Reader::from_reader(reader)).map_err(|source| PersistenceError::Csv {
        path: "<reader>".into(),
        source,
    })
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Loan>, csv::Error> {
    let mut loans = Vec::new();

    for (line, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let name = row.name.clone();
        match row.to_loan() {
            Ok(loan) => loans.push(loan),
            Err(err) => warn!("skipping row {} ('{}'): {}", line + 1, name, err),
        }
    }

    Ok(loans)
}

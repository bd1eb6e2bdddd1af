//! Loan records, persistence, and bulk import

mod data;
pub mod store;
pub mod import;

pub use data::{Loan, LoanRecord, MAX_AMOUNT, MAX_INTEREST_RATE, MAX_PAYMENT_DAY, MIN_PAYMENT_DAY};
pub use store::LoanStore;
pub use import::{import_csv, import_csv_from_reader};

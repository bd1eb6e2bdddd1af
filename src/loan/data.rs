//! Loan record with validated mutation and derived values

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::error::LoanError;

/// Earliest allowed payment day
pub const MIN_PAYMENT_DAY: u32 = 1;

/// Latest allowed payment day (every month has a 28th)
pub const MAX_PAYMENT_DAY: u32 = 28;

/// Largest accepted balance or payment (one quadrillion)
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Largest accepted annual rate, in percent
pub const MAX_INTEREST_RATE: Decimal = dec!(1000);

/// Stored form of a loan, matching the persisted JSON layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_balance: Decimal,
    #[serde(default)]
    pub interest_rate: Decimal,
    #[serde(default)]
    pub monthly_payment: Decimal,
    #[serde(default = "default_payment_day")]
    pub payment_day: u32,
}

fn default_payment_day() -> u32 {
    MIN_PAYMENT_DAY
}

/// An interest-bearing installment loan
///
/// Only the five stored fields are state. Monthly interest and the payoff
/// date are recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LoanRecord", into = "LoanRecord")]
pub struct Loan {
    name: String,
    current_balance: Decimal,
    /// Annual percentage (6.5 = 6.5%)
    interest_rate: Decimal,
    monthly_payment: Decimal,
    payment_day: u32,
}

impl Loan {
    /// Create a loan, rejecting any out-of-range field
    pub fn new(
        name: impl Into<String>,
        current_balance: Decimal,
        interest_rate: Decimal,
        monthly_payment: Decimal,
        payment_day: u32,
    ) -> Result<Self, LoanError> {
        let mut loan = Self::default();
        loan.set_name(name)?;
        loan.set_current_balance(current_balance)?;
        loan.set_interest_rate(interest_rate)?;
        loan.set_monthly_payment(monthly_payment)?;
        loan.set_payment_day(payment_day)?;
        Ok(loan)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn payment_day(&self) -> u32 {
        self.payment_day
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), LoanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LoanError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn set_current_balance(&mut self, balance: Decimal) -> Result<(), LoanError> {
        if balance < Decimal::ZERO {
            return Err(LoanError::NegativeBalance(balance));
        }
        if balance > MAX_AMOUNT {
            return Err(LoanError::AmountTooLarge(balance));
        }
        self.current_balance = balance;
        Ok(())
    }

    pub fn set_interest_rate(&mut self, rate: Decimal) -> Result<(), LoanError> {
        if rate < Decimal::ZERO {
            return Err(LoanError::NegativeRate(rate));
        }
        if rate > MAX_INTEREST_RATE {
            return Err(LoanError::RateTooHigh(rate));
        }
        self.interest_rate = rate;
        Ok(())
    }

    pub fn set_monthly_payment(&mut self, payment: Decimal) -> Result<(), LoanError> {
        if payment < Decimal::ZERO {
            return Err(LoanError::NegativePayment(payment));
        }
        if payment > MAX_AMOUNT {
            return Err(LoanError::AmountTooLarge(payment));
        }
        self.monthly_payment = payment;
        Ok(())
    }

    /// Set the day of month the payment is due; only 1-28 is accepted
    pub fn set_payment_day(&mut self, day: u32) -> Result<(), LoanError> {
        if !(MIN_PAYMENT_DAY..=MAX_PAYMENT_DAY).contains(&day) {
            return Err(LoanError::InvalidPaymentDay(day));
        }
        self.payment_day = day;
        Ok(())
    }

    /// Monthly rate as a fraction (annual percentage / 100 / 12)
    pub fn monthly_rate(&self) -> Decimal {
        self.interest_rate / dec!(100) / dec!(12)
    }

    /// Interest accrued on the current balance over one month
    pub fn monthly_interest(&self) -> Decimal {
        if self.current_balance <= Decimal::ZERO || self.interest_rate < Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current_balance * self.monthly_rate()
    }

    /// Payoff date counted from the local calendar date, `None` if never paid off
    pub fn estimated_payoff_date(&self) -> Option<NaiveDate> {
        amortization::estimate_payoff(self)
    }

    /// Payoff date counted from `today`
    pub fn estimated_payoff_date_from(&self, today: NaiveDate) -> Option<NaiveDate> {
        amortization::estimate_payoff_from(self, today)
    }
}

impl Default for Loan {
    fn default() -> Self {
        Self {
            name: String::new(),
            current_balance: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            monthly_payment: Decimal::ZERO,
            payment_day: MIN_PAYMENT_DAY,
        }
    }
}

impl From<LoanRecord> for Loan {
    /// Apply each stored field through its setter; rejected values keep the default
    fn from(record: LoanRecord) -> Self {
        let mut loan = Loan {
            name: record.name.clone(),
            ..Loan::default()
        };
        let results = [
            loan.set_current_balance(record.current_balance),
            loan.set_interest_rate(record.interest_rate),
            loan.set_monthly_payment(record.monthly_payment),
            loan.set_payment_day(record.payment_day),
        ];
        for err in results.into_iter().filter_map(Result::err) {
            warn!("loan '{}': ignoring stored value: {}", record.name, err);
        }
        loan
    }
}

impl From<Loan> for LoanRecord {
    fn from(loan: Loan) -> Self {
        Self {
            name: loan.name,
            current_balance: loan.current_balance,
            interest_rate: loan.interest_rate,
            monthly_payment: loan.monthly_payment,
            payment_day: loan.payment_day,
        }
    }
}

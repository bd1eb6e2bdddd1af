//! Month-by-month simulation state for a single loan

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::loan::Loan;

/// Number of days in the given calendar month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// The payment date in the given month, day clamped to the month's length
pub fn payment_date_in(year: i32, month: u32, payment_day: u32) -> NaiveDate {
    let day = payment_day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or(NaiveDate::MIN)
}

/// First payment date strictly after `today`
pub fn first_payment_date(today: NaiveDate, payment_day: u32) -> NaiveDate {
    let this_month = payment_date_in(today.year(), today.month(), payment_day);
    if this_month > today {
        this_month
    } else {
        next_payment_date(this_month, payment_day)
    }
}

/// Payment date one calendar month after `date`
pub fn next_payment_date(date: NaiveDate, payment_day: u32) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    payment_date_in(year, month, payment_day)
}

/// Interest/principal split of one monthly payment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthStep {
    pub interest: Decimal,
    /// Payment minus interest; zero or negative when the payment does not amortize
    pub principal: Decimal,
}

/// State of a loan at a point in the simulation
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Months simulated so far
    pub month: u32,

    /// Outstanding balance after the last simulated payment
    pub balance: Decimal,

    /// Date of the next payment to simulate
    pub payment_date: NaiveDate,

    monthly_rate: Decimal,
    payment: Decimal,
    payment_day: u32,
}

impl AmortizationState {
    /// Initialize from a loan's stored fields with the first payment after `today`
    pub fn from_loan(loan: &Loan, today: NaiveDate) -> Self {
        Self::with_payment(loan, loan.monthly_payment(), today)
    }

    /// Same as `from_loan` but simulating a different monthly payment
    pub fn with_payment(loan: &Loan, payment: Decimal, today: NaiveDate) -> Self {
        Self {
            month: 0,
            balance: loan.current_balance(),
            payment_date: first_payment_date(today, loan.payment_day()),
            monthly_rate: loan.monthly_rate(),
            payment,
            payment_day: loan.payment_day(),
        }
    }

    pub fn payment(&self) -> Decimal {
        self.payment
    }

    /// Split the next payment against the current balance
    pub fn next_step(&self) -> MonthStep {
        let interest = self.balance * self.monthly_rate;
        MonthStep {
            interest,
            principal: self.payment - interest,
        }
    }

    /// Apply principal to the balance and count the month
    pub fn apply(&mut self, principal: Decimal) {
        self.balance -= principal;
        self.month += 1;
    }

    /// Move to the next payment date
    pub fn advance_month(&mut self) {
        self.payment_date = next_payment_date(self.payment_date, self.payment_day);
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn test_first_payment_date_later_this_month() {
        assert_eq!(first_payment_date(date(2025, 3, 10), 15), date(2025, 3, 15));
    }

    #[test]
    fn test_first_payment_date_is_strictly_after_today() {
        assert_eq!(first_payment_date(date(2025, 3, 15), 15), date(2025, 4, 15));
        assert_eq!(first_payment_date(date(2025, 12, 20), 5), date(2026, 1, 5));
    }

    #[test]
    fn test_next_payment_date_rolls_year() {
        assert_eq!(next_payment_date(date(2025, 12, 28), 28), date(2026, 1, 28));
        assert_eq!(next_payment_date(date(2026, 1, 28), 28), date(2026, 2, 28));
    }
}

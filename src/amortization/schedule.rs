//! Schedule output structures for amortization projections

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One simulated monthly payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-indexed month of the projection
    pub month: u32,
    pub payment_date: NaiveDate,
    pub opening_balance: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Amount actually paid (smaller than the fixed payment in the final month)
    pub payment: Decimal,
    pub closing_balance: Decimal,
}

/// How a projection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEnd {
    /// Balance reached zero
    PaidOff,
    /// Payment stopped covering interest
    NotAmortizing,
    /// Month limit hit before payoff
    Truncated,
}

/// Complete projection for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan_name: String,
    pub rows: Vec<ScheduleRow>,
    pub end: ScheduleEnd,
}

impl AmortizationSchedule {
    pub fn new(loan_name: impl Into<String>) -> Self {
        Self {
            loan_name: loan_name.into(),
            rows: Vec::new(),
            end: ScheduleEnd::Truncated,
        }
    }

    pub fn add_row(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_interest: Decimal = self.rows.iter().map(|r| r.interest).sum();
        let total_paid: Decimal = self.rows.iter().map(|r| r.payment).sum();
        let final_balance = self.rows.last().map(|r| r.closing_balance).unwrap_or_default();
        let payoff_date = match self.end {
            ScheduleEnd::PaidOff => self.rows.last().map(|r| r.payment_date),
            _ => None,
        };

        ScheduleSummary {
            months: self.rows.len() as u32,
            total_interest,
            total_paid,
            final_balance,
            payoff_date,
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub months: u32,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
    pub final_balance: Decimal,
    pub payoff_date: Option<NaiveDate>,
}

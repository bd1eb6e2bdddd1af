//! Core amortization engine: payoff dates and balance trajectories

use chrono::{Local, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use super::schedule::{AmortizationSchedule, ScheduleEnd, ScheduleRow};
use super::state::AmortizationState;
use crate::loan::Loan;

/// Simulation limit (100 years)
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Month-by-month amortization simulator
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    max_months: u32,
}

impl Default for AmortizationEngine {
    fn default() -> Self {
        Self {
            max_months: MAX_PROJECTION_MONTHS,
        }
    }
}

impl AmortizationEngine {
    /// Create an engine with a custom month limit
    pub fn with_max_months(max_months: u32) -> Self {
        Self { max_months }
    }

    pub fn max_months(&self) -> u32 {
        self.max_months
    }

    /// Date of the payment that brings the balance to zero, counted from `today`
    ///
    /// Returns `None` when the loan never pays off: no balance, no payment,
    /// a payment that does not exceed the interest accrued on the current
    /// balance, or a payoff that needs the full month limit or more.
    pub fn payoff_date(&self, loan: &Loan, today: NaiveDate) -> Option<NaiveDate> {
        self.payoff_date_with_payment(loan, loan.monthly_payment(), today)
    }

    /// Payoff date if `payment` were paid each month instead of the stored payment
    pub fn payoff_date_with_payment(
        &self,
        loan: &Loan,
        payment: Decimal,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        if loan.current_balance() <= Decimal::ZERO
            || payment <= Decimal::ZERO
            || loan.interest_rate() < Decimal::ZERO
        {
            return None;
        }
        if payment <= loan.current_balance() * loan.monthly_rate() {
            return None;
        }

        let mut state = AmortizationState::with_payment(loan, payment, today);
        while state.month < self.max_months {
            let step = state.next_step();
            if step.principal <= Decimal::ZERO {
                return None;
            }
            state.apply(step.principal);
            if state.is_paid_off() {
                break;
            }
            state.advance_month();
        }

        // Payoff on the final allowed month counts as not paid off
        if state.is_paid_off() && state.month < self.max_months {
            debug!("'{}' pays off after {} months", loan.name(), state.month);
            return Some(state.payment_date);
        }
        debug!("'{}' not paid off within {} months", loan.name(), self.max_months);
        None
    }

    /// Number of payments until payoff, `None` when it never pays off
    /// within fewer than `max_months` payments
    pub fn months_to_payoff(&self, loan: &Loan, payment: Decimal) -> Option<u32> {
        if loan.current_balance() <= Decimal::ZERO
            || payment <= Decimal::ZERO
            || payment <= loan.current_balance() * loan.monthly_rate()
        {
            return None;
        }

        // The calendar does not affect the count
        let mut state = AmortizationState::with_payment(loan, payment, NaiveDate::MIN);
        while state.month < self.max_months {
            let step = state.next_step();
            if step.principal <= Decimal::ZERO {
                return None;
            }
            state.apply(step.principal);
            if state.is_paid_off() {
                break;
            }
        }
        (state.is_paid_off() && state.month < self.max_months).then_some(state.month)
    }

    /// Balance after `months_elapsed` payments, floored at zero
    ///
    /// A month whose payment does not cover the interest applies no
    /// principal; interest is never capitalized.
    pub fn balance_at_month_offset(&self, loan: &Loan, months_elapsed: u32) -> Decimal {
        let mut balance = loan.current_balance();
        let rate = loan.monthly_rate();
        let payment = loan.monthly_payment();

        for _ in 0..months_elapsed {
            if balance <= Decimal::ZERO {
                break;
            }
            let principal = (payment - balance * rate).max(Decimal::ZERO);
            balance = (balance - principal).max(Decimal::ZERO);
        }

        balance.max(Decimal::ZERO)
    }

    /// Full month-by-month schedule, stopping at payoff or the month limit
    pub fn project_schedule(&self, loan: &Loan, today: NaiveDate) -> AmortizationSchedule {
        let mut schedule = AmortizationSchedule::new(loan.name());
        if loan.current_balance() <= Decimal::ZERO {
            schedule.end = ScheduleEnd::PaidOff;
            return schedule;
        }

        let mut state = AmortizationState::from_loan(loan, today);
        while state.month < self.max_months {
            let opening_balance = state.balance;
            let step = state.next_step();
            if step.principal <= Decimal::ZERO {
                schedule.end = ScheduleEnd::NotAmortizing;
                return schedule;
            }

            let principal = step.principal.min(opening_balance);
            state.apply(step.principal);
            schedule.add_row(ScheduleRow {
                month: state.month,
                payment_date: state.payment_date,
                opening_balance,
                interest: step.interest,
                principal,
                payment: step.interest + principal,
                closing_balance: state.balance.max(Decimal::ZERO),
            });

            if state.is_paid_off() {
                schedule.end = ScheduleEnd::PaidOff;
                return schedule;
            }
            state.advance_month();
        }

        schedule.end = ScheduleEnd::Truncated;
        schedule
    }
}

/// Payoff date counted from the local calendar date
pub fn estimate_payoff(loan: &Loan) -> Option<NaiveDate> {
    estimate_payoff_from(loan, Local::now().date_naive())
}

/// Payoff date counted from `today` with the default month limit
pub fn estimate_payoff_from(loan: &Loan, today: NaiveDate) -> Option<NaiveDate> {
    AmortizationEngine::default().payoff_date(loan, today)
}

/// Balance after `months_elapsed` payments with the default engine
pub fn balance_at_month_offset(loan: &Loan, months_elapsed: u32) -> Decimal {
    AmortizationEngine::default().balance_at_month_offset(loan, months_elapsed)
}

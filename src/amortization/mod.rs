//! Amortization engine for single-loan payoff projections

mod state;
mod engine;
mod schedule;

pub use state::{AmortizationState, MonthStep, days_in_month, first_payment_date, next_payment_date};
pub use engine::{
    AmortizationEngine, MAX_PROJECTION_MONTHS,
    balance_at_month_offset, estimate_payoff, estimate_payoff_from,
};
pub use schedule::{AmortizationSchedule, ScheduleEnd, ScheduleRow, ScheduleSummary};

//! Closed-form estimate of what an extra monthly payment saves
//!
//! Months to payoff are approximated as `balance / payment`, ignoring
//! interest. This is fast but can disagree with a month-by-month run of the
//! amortization engine; use [`simulated_months_saved`] when exact figures
//! are needed.

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization::AmortizationEngine;
use crate::format::months_to_duration;
use crate::loan::Loan;

/// Approximate months removed from the payoff by paying `extra_payment` more
///
/// `None` when there is nothing to estimate or the arithmetic overflows.
fn approximate_months_saved(loan: &Loan, extra_payment: Decimal) -> Option<Decimal> {
    let payment = loan.monthly_payment();
    if extra_payment <= Decimal::ZERO || payment <= Decimal::ZERO {
        return None;
    }

    let months_without_extra = loan.current_balance().checked_div(payment)?;
    let months_with_extra = loan.current_balance().checked_div(payment.checked_add(extra_payment)?)?;
    months_without_extra.checked_sub(months_with_extra)
}

/// Interest saved ≈ months saved × payment × monthly rate
pub fn estimate_interest_savings(loan: &Loan, extra_payment: Decimal) -> Decimal {
    approximate_months_saved(loan, extra_payment)
        .and_then(|months| months.checked_mul(loan.monthly_payment()))
        .and_then(|amount| amount.checked_mul(loan.interest_rate() / dec!(1200)))
        .unwrap_or(Decimal::ZERO)
}

/// Time saved ≈ months saved × 30.44 days
pub fn estimate_time_reduction(loan: &Loan, extra_payment: Decimal) -> Duration {
    approximate_months_saved(loan, extra_payment)
        .and_then(months_to_duration)
        .unwrap_or_else(Duration::zero)
}

/// Exact months saved by re-running the amortization with and without the extra payment
///
/// `None` when the loan does not pay off at its current payment.
pub fn simulated_months_saved(
    engine: &AmortizationEngine,
    loan: &Loan,
    extra_payment: Decimal,
) -> Option<u32> {
    let baseline = engine.months_to_payoff(loan, loan.monthly_payment())?;
    if extra_payment <= Decimal::ZERO {
        return Some(0);
    }
    let accelerated = engine.months_to_payoff(loan, loan.monthly_payment().checked_add(extra_payment)?)?;
    Some(baseline.saturating_sub(accelerated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::duration_days;
    use crate::loan::MAX_AMOUNT;
    use approx::assert_relative_eq;

    fn student_loan() -> Loan {
        Loan::new("Student", dec!(12000), dec!(6), dec!(300), 10).unwrap()
    }

    #[test]
    fn test_no_extra_saves_nothing() {
        let loan = student_loan();
        assert_eq!(estimate_interest_savings(&loan, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(estimate_interest_savings(&loan, dec!(-50)), Decimal::ZERO);
        assert_eq!(estimate_time_reduction(&loan, Decimal::ZERO), Duration::zero());
        assert_eq!(estimate_time_reduction(&loan, dec!(-50)), Duration::zero());
    }

    #[test]
    fn test_closed_form_estimate() {
        let loan = student_loan();
        // 12000/300 - 12000/400 = 10 months; 10 * 300 * 0.005 = 15
        assert_eq!(estimate_interest_savings(&loan, dec!(100)), dec!(15));
        assert_relative_eq!(duration_days(estimate_time_reduction(&loan, dec!(100))), 304.4, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_payment_has_no_estimate() {
        let loan = Loan::new("Stalled", dec!(5000), dec!(5), Decimal::ZERO, 1).unwrap();
        assert_eq!(estimate_interest_savings(&loan, dec!(100)), Decimal::ZERO);
        assert_eq!(estimate_time_reduction(&loan, dec!(100)), Duration::zero());
    }

    #[test]
    fn test_extreme_inputs_have_no_estimate() {
        // Fractions of a cent against the largest balance
        let loan = Loan::new("Dust", MAX_AMOUNT, dec!(5), dec!(0.0000000000000000000001), 1).unwrap();
        assert_eq!(estimate_interest_savings(&loan, dec!(10)), Decimal::ZERO);
        assert_eq!(estimate_time_reduction(&loan, dec!(10)), Duration::zero());

        let loan = student_loan();
        assert_eq!(estimate_interest_savings(&loan, Decimal::MAX), Decimal::ZERO);
        assert_eq!(estimate_time_reduction(&loan, Decimal::MAX), Duration::zero());
    }

    #[test]
    fn test_estimate_differs_from_simulation() {
        let loan = student_loan();
        let engine = AmortizationEngine::default();
        let exact = simulated_months_saved(&engine, &loan, dec!(100)).unwrap();
        // Interest stretches both payoffs, so the exact saving exceeds the 10-month estimate
        assert!(exact > 10);
        assert_eq!(simulated_months_saved(&engine, &loan, Decimal::ZERO), Some(0));
    }
}

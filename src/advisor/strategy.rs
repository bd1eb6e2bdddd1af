//! Rule-based payment strategies, one per goal family

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::savings::{estimate_interest_savings, estimate_time_reduction};
use super::types::{AnalysisResult, GoalType, PaymentRecommendation, Strategy};
use crate::format::{currency, percent};
use crate::loan::{Loan, MAX_AMOUNT};

/// Annual rate above which a loan is a refinance candidate
pub const REFINANCE_RATE_THRESHOLD: Decimal = dec!(7);

/// Run the strategy serving `goal`
pub fn select_for_goal(goal: GoalType, loans: &[Loan], extra_budget: Decimal) -> AnalysisResult {
    select_strategy(Strategy::for_goal(goal), loans, extra_budget)
}

/// Order loans and allocate the extra budget according to `strategy`
///
/// A negative budget is treated as no budget; anything above `MAX_AMOUNT` is capped.
pub fn select_strategy(strategy: Strategy, loans: &[Loan], extra_budget: Decimal) -> AnalysisResult {
    let extra_budget = extra_budget.clamp(Decimal::ZERO, MAX_AMOUNT);
    debug!("{} strategy over {} loans, extra budget {}", strategy.name(), loans.len(), extra_budget);

    match strategy {
        Strategy::Avalanche => avalanche(loans, extra_budget),
        Strategy::Snowball => snowball(loans, extra_budget),
        Strategy::ReducePayments => reduce_payments(loans, extra_budget),
        Strategy::CashFlow => cash_flow(loans),
        Strategy::Consolidation => consolidation(loans),
    }
}

/// Payment recommendation putting `extra` on top of the loan's current payment
fn with_extra(loan: &Loan, extra: Decimal, reasoning: String) -> PaymentRecommendation {
    PaymentRecommendation {
        loan_name: loan.name().to_string(),
        recommended_payment: loan.monthly_payment() + extra,
        extra_payment: extra,
        reasoning,
        interest_savings: estimate_interest_savings(loan, extra),
        time_reduction: estimate_time_reduction(loan, extra),
    }
}

/// Highest rate first; the whole budget goes to the first loan
fn avalanche(loans: &[Loan], extra_budget: Decimal) -> AnalysisResult {
    let mut result = AnalysisResult::new(
        "Focus on paying off highest interest rate loans first (Avalanche Method) to minimize total interest paid.",
    );

    let mut sorted: Vec<&Loan> = loans.iter().collect();
    // Stable: equal rates keep input order
    sorted.sort_by(|a, b| b.interest_rate().cmp(&a.interest_rate()));

    for (i, loan) in sorted.into_iter().enumerate() {
        let extra = if i == 0 { extra_budget } else { Decimal::ZERO };
        let reasoning = if i == 0 && extra > Decimal::ZERO {
            format!("Highest interest rate ({}) - apply all extra budget here", percent(loan.interest_rate()))
        } else {
            format!("Interest rate: {} - minimum payment only", percent(loan.interest_rate()))
        };
        result.recommendations.push(with_extra(loan, extra, reasoning));
    }

    result
}

/// Smallest balance first; the whole budget goes to the first loan
fn snowball(loans: &[Loan], extra_budget: Decimal) -> AnalysisResult {
    let mut result = AnalysisResult::new(
        "Focus on paying off smallest balances first (Snowball Method) to build momentum and free up cash flow quickly.",
    );

    let mut sorted: Vec<&Loan> = loans.iter().collect();
    sorted.sort_by(|a, b| a.current_balance().cmp(&b.current_balance()));

    for (i, loan) in sorted.into_iter().enumerate() {
        let extra = if i == 0 { extra_budget } else { Decimal::ZERO };
        let reasoning = if i == 0 && extra > Decimal::ZERO {
            format!("Smallest balance ({}) - focus here for quick wins", currency(loan.current_balance()))
        } else {
            format!(
                "Balance: {} - minimum payment until smaller loans are paid off",
                currency(loan.current_balance())
            )
        };
        result.recommendations.push(with_extra(loan, extra, reasoning));
    }

    result
}

/// Keep payments, flag refinance candidates
fn reduce_payments(loans: &[Loan], extra_budget: Decimal) -> AnalysisResult {
    let mut result =
        AnalysisResult::new("Consider refinancing high-interest loans to reduce monthly payment burden.");

    for loan in loans {
        let reasoning = if loan.interest_rate() > REFINANCE_RATE_THRESHOLD {
            format!("High interest rate ({}) - consider refinancing", percent(loan.interest_rate()))
        } else {
            format!("Reasonable rate ({}) - maintain current payment", percent(loan.interest_rate()))
        };
        result.recommendations.push(PaymentRecommendation::keep_payment(
            loan.name(),
            loan.monthly_payment(),
            reasoning,
        ));
    }

    if extra_budget > Decimal::ZERO {
        result.key_insights.push(format!(
            "Consider using extra budget ({}) for emergency fund instead of extra payments",
            currency(extra_budget)
        ));
    }

    result
}

/// Months left at the current payment, `None` without a payment or when too large to compute
pub fn months_remaining(loan: &Loan) -> Option<Decimal> {
    if loan.monthly_payment() <= Decimal::ZERO {
        return None;
    }
    loan.current_balance()
        .checked_div(loan.monthly_payment())
        .map(|months| months.ceil())
}

/// Keep payments, report time left on each loan
fn cash_flow(loans: &[Loan]) -> AnalysisResult {
    let mut result = AnalysisResult::new(
        "Focus on paying off loans with shortest remaining terms to free up monthly cash flow soonest.",
    );

    for loan in loans {
        let reasoning = match months_remaining(loan) {
            Some(months) => format!("Approximately {} months remaining at current payment", months),
            None if loan.monthly_payment() > Decimal::ZERO => {
                "Payment is too small to estimate the months remaining".to_string()
            }
            None => "No payment set - this loan will not pay down".to_string(),
        };
        result.recommendations.push(PaymentRecommendation::keep_payment(
            loan.name(),
            loan.monthly_payment(),
            reasoning,
        ));
    }

    result
}

/// Report the rate a consolidation loan has to beat
fn consolidation(loans: &[Loan]) -> AnalysisResult {
    let mut result = AnalysisResult::default();
    let multiple = loans.len() > 1;

    if multiple {
        let total_balance: Decimal = loans.iter().map(Loan::current_balance).sum();
        let average_rate = loans.iter().map(Loan::interest_rate).sum::<Decimal>() / Decimal::from(loans.len());

        result.overall_strategy = format!(
            "Consider consolidating {} loans (total: {}) if you can get a rate lower than {}.",
            loans.len(),
            currency(total_balance),
            percent(average_rate)
        );
        result.key_insights.push("Consolidation benefits: Simplified payments, potentially lower rate".to_string());
        result.key_insights.push("Consolidation risks: May lose benefits like loan forgiveness programs".to_string());
    } else {
        result.overall_strategy =
            "Only one loan exists - consolidation not applicable. Focus on extra payments.".to_string();
    }

    for loan in loans {
        let reasoning = if multiple { "Consider for consolidation" } else { "Single loan - maintain payments" };
        result.recommendations.push(PaymentRecommendation::keep_payment(
            loan.name(),
            loan.monthly_payment(),
            reasoning,
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(name: &str, balance: Decimal, rate: Decimal, payment: Decimal) -> Loan {
        Loan::new(name, balance, rate, payment, 1).unwrap()
    }

    fn extras(result: &AnalysisResult) -> Vec<(&str, Decimal)> {
        result
            .recommendations
            .iter()
            .map(|r| (r.loan_name.as_str(), r.extra_payment))
            .collect()
    }

    #[test]
    fn test_avalanche_targets_highest_rate() {
        let loans = vec![
            loan("B", dec!(20000), dec!(5), dec!(400)),
            loan("A", dec!(1000), dec!(20), dec!(100)),
        ];
        let result = select_for_goal(GoalType::MinimizeTotalInterest, &loans, dec!(100));

        assert_eq!(extras(&result), vec![("A", dec!(100)), ("B", Decimal::ZERO)]);
        let a = result.recommendation_for("A").unwrap();
        assert_eq!(a.recommended_payment, dec!(200));
        assert!(a.reasoning.contains("20.00%"));
        assert!(a.interest_savings > Decimal::ZERO);
        let b = result.recommendation_for("B").unwrap();
        assert_eq!(b.interest_savings, Decimal::ZERO);
        assert!(result.overall_strategy.contains("Avalanche"));
    }

    #[test]
    fn test_snowball_targets_smallest_balance() {
        let loans = vec![
            loan("A", dec!(5000), dec!(20), dec!(200)),
            loan("B", dec!(500), dec!(3), dec!(50)),
        ];
        let result = select_for_goal(GoalType::PayoffAllLoans, &loans, dec!(100));

        assert_eq!(extras(&result), vec![("B", dec!(100)), ("A", Decimal::ZERO)]);
        assert!(result.recommendation_for("B").unwrap().reasoning.contains("$500.00"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let loans = vec![
            loan("First", dec!(1000), dec!(9), dec!(100)),
            loan("Second", dec!(1000), dec!(9), dec!(100)),
        ];
        let avalanche = select_strategy(Strategy::Avalanche, &loans, dec!(50));
        assert_eq!(avalanche.recommendations[0].loan_name, "First");
        assert_eq!(avalanche.recommendations[0].extra_payment, dec!(50));

        let snowball = select_strategy(Strategy::Snowball, &loans, dec!(50));
        assert_eq!(snowball.recommendations[0].loan_name, "First");
    }

    #[test]
    fn test_zero_budget_reasoning() {
        let loans = vec![loan("Only", dec!(1000), dec!(9), dec!(100))];
        let result = select_strategy(Strategy::Avalanche, &loans, Decimal::ZERO);
        assert!(result.recommendations[0].reasoning.contains("minimum payment only"));
    }

    #[test]
    fn test_negative_budget_is_ignored() {
        let loans = vec![loan("Only", dec!(1000), dec!(9), dec!(100))];
        let result = select_strategy(Strategy::Avalanche, &loans, dec!(-20));
        assert_eq!(result.recommendations[0].extra_payment, Decimal::ZERO);
        assert_eq!(result.recommendations[0].recommended_payment, dec!(100));
    }

    #[test]
    fn test_reduce_payments_flags_refinance() {
        let loans = vec![
            loan("Card", dec!(3000), dec!(18), dec!(120)),
            loan("Mortgage", dec!(200000), dec!(7), dec!(1300)),
        ];
        let result = select_for_goal(GoalType::ReduceMonthlyPayments, &loans, dec!(250));

        assert!(result.recommendation_for("Card").unwrap().reasoning.contains("consider refinancing"));
        assert!(result.recommendation_for("Mortgage").unwrap().reasoning.contains("maintain"));
        assert!(result.recommendations.iter().all(|r| r.extra_payment.is_zero()));
        assert!(result.key_insights[0].contains("emergency fund"));
    }

    #[test]
    fn test_cash_flow_months_remaining() {
        let loans = vec![
            loan("Car", dec!(1000), dec!(4), dec!(300)),
            loan("Idle", dec!(1000), dec!(4), Decimal::ZERO),
        ];
        let result = select_for_goal(GoalType::FreeUpCashFlow, &loans, dec!(100));

        assert_eq!(result.recommendations[0].reasoning, "Approximately 4 months remaining at current payment");
        assert!(result.recommendations[1].reasoning.contains("No payment"));
        assert!(result.recommendations.iter().all(|r| r.extra_payment.is_zero()));
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        let dust = dec!(0.0000000000000000000001);
        let loans = vec![
            loan("Huge", MAX_AMOUNT, dec!(5), dust),
            loan("Normal", dec!(1000), dec!(4), dec!(300)),
        ];

        assert_eq!(months_remaining(&loans[0]), None);
        assert_eq!(months_remaining(&loans[1]), Some(dec!(4)));

        let cash_flow = select_for_goal(GoalType::FreeUpCashFlow, &loans, Decimal::ZERO);
        assert!(cash_flow.recommendations[0].reasoning.contains("too small"));

        for strategy in Strategy::ALL {
            let result = select_strategy(strategy, &loans, Decimal::MAX);
            assert_eq!(result.recommendations.len(), 2);
            assert!(result.recommendations.iter().all(|r| r.extra_payment <= MAX_AMOUNT));
        }
    }

    #[test]
    fn test_consolidation_reports_average_rate() {
        let loans = vec![
            loan("A", dec!(4000), dec!(10), dec!(100)),
            loan("B", dec!(6000), dec!(6), dec!(100)),
        ];
        let result = select_for_goal(GoalType::DebtConsolidation, &loans, Decimal::ZERO);
        assert!(result.overall_strategy.contains("$10,000.00"));
        assert!(result.overall_strategy.contains("8.00%"));
        assert_eq!(result.key_insights.len(), 2);

        let single = select_for_goal(GoalType::DebtConsolidation, &loans[..1], Decimal::ZERO);
        assert!(single.overall_strategy.contains("not applicable"));
        assert_eq!(single.recommendations[0].reasoning, "Single loan - maintain payments");
    }

    #[test]
    fn test_specific_loan_goal_uses_avalanche() {
        let loans = vec![
            loan("Low", dec!(1000), dec!(3), dec!(100)),
            loan("High", dec!(1000), dec!(15), dec!(100)),
        ];
        let result = select_for_goal(GoalType::PayoffSpecificLoan, &loans, dec!(10));
        assert_eq!(result.recommendations[0].loan_name, "High");
    }
}

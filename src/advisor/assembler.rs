//! Portfolio-level insights, warnings, and totals for rule-based results

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::AnalysisResult;
use crate::format::{currency, percent};
use crate::loan::Loan;

/// Annual rate above which a loan counts as very high interest
pub const HIGH_RATE_THRESHOLD: Decimal = dec!(15);

/// Payment must exceed interest by this factor to not be flagged
pub const THIN_PAYMENT_FACTOR: Decimal = dec!(1.1);

/// Extra budget above this share of total payments triggers the emergency-fund warning
pub const BUDGET_SHARE_LIMIT: Decimal = dec!(0.5);

/// Append insights and warnings and fill the portfolio totals
pub fn assemble(mut result: AnalysisResult, loans: &[Loan], extra_budget: Decimal) -> AnalysisResult {
    result.key_insights.extend(portfolio_insights(loans, extra_budget));
    result.warnings.extend(generate_warnings(loans, extra_budget));

    result.total_interest_savings = result.recommendations.iter().map(|r| r.interest_savings).sum();
    result.overall_time_reduction = result
        .recommendations
        .iter()
        .map(|r| r.time_reduction)
        .max()
        .unwrap_or_else(Duration::zero);
    result.total_monthly_savings = Decimal::ZERO;

    result
}

fn total_minimum_payments(loans: &[Loan]) -> Decimal {
    loans.iter().map(Loan::monthly_payment).sum()
}

/// Total debt, payments, average rate, and budget lines
pub fn portfolio_insights(loans: &[Loan], extra_budget: Decimal) -> Vec<String> {
    let total_balance: Decimal = loans.iter().map(Loan::current_balance).sum();
    let average_rate = if loans.is_empty() {
        Decimal::ZERO
    } else {
        loans.iter().map(Loan::interest_rate).sum::<Decimal>() / Decimal::from(loans.len())
    };

    let mut insights = vec![
        format!("Total debt: {}", currency(total_balance)),
        format!("Total minimum payments: {}/month", currency(total_minimum_payments(loans))),
        format!("Average interest rate: {}", percent(average_rate)),
    ];
    if extra_budget > Decimal::ZERO {
        insights.push(format!("Extra budget available: {}/month", currency(extra_budget)));
    }
    insights
}

/// Advisory warnings; never block the analysis
pub fn generate_warnings(loans: &[Loan], extra_budget: Decimal) -> Vec<String> {
    let mut warnings = Vec::new();

    let high_rate = loans.iter().filter(|l| l.interest_rate() > HIGH_RATE_THRESHOLD).count();
    if high_rate > 0 {
        warnings.push(format!(
            "{} loan(s) have very high interest rates (>15%) - prioritize these!",
            high_rate
        ));
    }

    for loan in loans {
        if loan.monthly_payment() < loan.monthly_interest() * THIN_PAYMENT_FACTOR {
            warnings.push(format!(
                "{}: Payment barely covers interest - consider increasing payment",
                loan.name()
            ));
        }
    }

    if extra_budget > total_minimum_payments(loans) * BUDGET_SHARE_LIMIT {
        warnings.push(
            "Extra budget is very high relative to minimum payments - ensure emergency fund is adequate first"
                .to_string(),
        );
    }

    warnings
}

//! Prompt sent to the reasoning service

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::strategy::months_remaining;
use super::types::FinancialGoal;
use crate::amortization::estimate_payoff_from;
use crate::loan::Loan;

/// Months reported for a loan with no payment
const NO_PAYMENT_MONTHS: u64 = 999;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptLoan<'a> {
    name: &'a str,
    balance: Decimal,
    interest_rate: Decimal,
    monthly_payment: Decimal,
    estimated_months_remaining: u64,
    estimated_payoff_date: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptGoal<'a> {
    #[serde(rename = "type")]
    goal_type: &'static str,
    description: &'a str,
    priority: u8,
    target_amount: Decimal,
    target_date: String,
}

const RESPONSE_SCHEMA: &str = r#"{
  "overallStrategy": "A clear, actionable overall strategy explanation",
  "recommendations": [
    {
      "loanName": "Name of the loan",
      "recommendedPayment": 0.00,
      "extraPayment": 0.00,
      "reasoning": "Clear explanation of why this payment amount",
      "estimatedInterestSavings": 0.00,
      "estimatedMonthsReduced": 0
    }
  ],
  "keyInsights": [
    "Important insight 1",
    "Important insight 2"
  ],
  "warnings": [
    "Warning about high interest rates, if any",
    "Other important warnings"
  ],
  "totalInterestSavings": 0.00,
  "totalMonthlySavings": 0.00
}"#;

/// Build the analysis prompt for a loan portfolio and its goals
pub fn build_prompt(
    loans: &[Loan],
    goals: &[FinancialGoal],
    extra_budget: Decimal,
    today: NaiveDate,
) -> Result<String, serde_json::Error> {
    let loan_data: Vec<PromptLoan> = loans
        .iter()
        .map(|loan| PromptLoan {
            name: loan.name(),
            balance: loan.current_balance(),
            interest_rate: loan.interest_rate(),
            monthly_payment: loan.monthly_payment(),
            estimated_months_remaining: months_remaining(loan)
                .and_then(|m| m.to_u64())
                .unwrap_or(NO_PAYMENT_MONTHS),
            estimated_payoff_date: estimate_payoff_from(loan, today)
                .map(|d| d.format("%Y-%m-%d").to_string()),
        })
        .collect();

    let goal_data: Vec<PromptGoal> = goals
        .iter()
        .map(|goal| PromptGoal {
            goal_type: goal.goal_type().as_str(),
            description: goal.description(),
            priority: goal.priority(),
            target_amount: goal.target_amount(),
            target_date: goal.target_date().format("%Y-%m-%d").to_string(),
        })
        .collect();

    Ok(format!(
        "You are a financial advisor AI specializing in loan payment optimization.

Interest rates are annual percentages (6.5 means 6.5%).

LOAN PORTFOLIO:
{loans}

FINANCIAL GOALS:
{goals}

AVAILABLE EXTRA BUDGET: ${budget:.2}/month

ANALYSIS REQUEST:
Please analyze this loan portfolio and provide personalized recommendations. Consider:
1. Interest rate optimization (avalanche vs snowball methods)
2. Psychological factors and momentum building
3. Cash flow optimization
4. Risk factors and warnings
5. The specific financial goals provided

Please respond with a JSON object in this exact format:
{schema}

IMPORTANT: Return ONLY valid JSON, no additional text or formatting.",
        loans = serde_json::to_string_pretty(&loan_data)?,
        goals = serde_json::to_string_pretty(&goal_data)?,
        budget = extra_budget.round_dp(2),
        schema = RESPONSE_SCHEMA,
    ))
}

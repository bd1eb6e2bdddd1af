//! Goals, strategies, and analysis output structures

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanError;
use crate::format::serde_days;

/// What the borrower is trying to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    PayoffAllLoans,
    PayoffSpecificLoan,
    ReduceMonthlyPayments,
    MinimizeTotalInterest,
    FreeUpCashFlow,
    DebtConsolidation,
}

impl GoalType {
    pub const ALL: [GoalType; 6] = [
        GoalType::MinimizeTotalInterest,
        GoalType::PayoffAllLoans,
        GoalType::ReduceMonthlyPayments,
        GoalType::FreeUpCashFlow,
        GoalType::DebtConsolidation,
        GoalType::PayoffSpecificLoan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::PayoffAllLoans => "PayoffAllLoans",
            GoalType::PayoffSpecificLoan => "PayoffSpecificLoan",
            GoalType::ReduceMonthlyPayments => "ReduceMonthlyPayments",
            GoalType::MinimizeTotalInterest => "MinimizeTotalInterest",
            GoalType::FreeUpCashFlow => "FreeUpCashFlow",
            GoalType::DebtConsolidation => "DebtConsolidation",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = String;

    /// Accepts `MinimizeTotalInterest`, `minimize-total-interest`, `minimize_total_interest`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        GoalType::ALL
            .into_iter()
            .find(|goal| goal.as_str().to_ascii_lowercase() == key)
            .ok_or_else(|| format!("unknown goal type: {}", s))
    }
}

/// A stated financial goal, fixed for the duration of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialGoal {
    goal_type: GoalType,
    target_amount: Decimal,
    target_date: NaiveDate,
    /// 1 (highest) to 5
    priority: u8,
    description: String,
}

impl FinancialGoal {
    pub fn new(
        goal_type: GoalType,
        target_amount: Decimal,
        target_date: NaiveDate,
        priority: u8,
        description: impl Into<String>,
    ) -> Result<Self, LoanError> {
        if !(1..=5).contains(&priority) {
            return Err(LoanError::InvalidPriority(priority));
        }
        Ok(Self {
            goal_type,
            target_amount,
            target_date,
            priority,
            description: description.into(),
        })
    }

    pub fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    pub fn target_amount(&self) -> Decimal {
        self.target_amount
    }

    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Rule-based payment policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Highest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
    ReducePayments,
    CashFlow,
    Consolidation,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Avalanche,
        Strategy::Snowball,
        Strategy::ReducePayments,
        Strategy::CashFlow,
        Strategy::Consolidation,
    ];

    /// Policy serving a goal; goals without a dedicated policy use avalanche
    pub fn for_goal(goal: GoalType) -> Self {
        match goal {
            GoalType::MinimizeTotalInterest => Strategy::Avalanche,
            GoalType::PayoffAllLoans => Strategy::Snowball,
            GoalType::ReduceMonthlyPayments => Strategy::ReducePayments,
            GoalType::FreeUpCashFlow => Strategy::CashFlow,
            GoalType::DebtConsolidation => Strategy::Consolidation,
            GoalType::PayoffSpecificLoan => Strategy::Avalanche,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "Avalanche",
            Strategy::Snowball => "Snowball",
            Strategy::ReducePayments => "Reduce payments",
            Strategy::CashFlow => "Cash flow",
            Strategy::Consolidation => "Consolidation",
        }
    }
}

/// Suggested payment for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecommendation {
    pub loan_name: String,
    pub recommended_payment: Decimal,
    pub extra_payment: Decimal,
    pub reasoning: String,
    pub interest_savings: Decimal,
    #[serde(with = "serde_days")]
    pub time_reduction: Duration,
}

impl PaymentRecommendation {
    /// Recommendation to keep paying the current amount
    pub fn keep_payment(loan_name: impl Into<String>, payment: Decimal, reasoning: impl Into<String>) -> Self {
        Self {
            loan_name: loan_name.into(),
            recommended_payment: payment,
            extra_payment: Decimal::ZERO,
            reasoning: reasoning.into(),
            interest_savings: Decimal::ZERO,
            time_reduction: Duration::zero(),
        }
    }
}

/// Output of one analysis run, rebuilt from scratch every time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub recommendations: Vec<PaymentRecommendation>,
    pub overall_strategy: String,
    pub total_monthly_savings: Decimal,
    pub total_interest_savings: Decimal,
    #[serde(with = "serde_days")]
    pub overall_time_reduction: Duration,
    pub key_insights: Vec<String>,
    pub warnings: Vec<String>,
    /// Provenance: `true` when produced by the reasoning service
    pub is_ai_powered: bool,
}

impl AnalysisResult {
    pub fn new(overall_strategy: impl Into<String>) -> Self {
        Self {
            overall_strategy: overall_strategy.into(),
            ..Self::default()
        }
    }

    /// Recommendation for a loan by name
    pub fn recommendation_for(&self, loan_name: &str) -> Option<&PaymentRecommendation> {
        self.recommendations.iter().find(|r| r.loan_name == loan_name)
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            recommendations: Vec::new(),
            overall_strategy: String::new(),
            total_monthly_savings: Decimal::ZERO,
            total_interest_savings: Decimal::ZERO,
            overall_time_reduction: Duration::zero(),
            key_insights: Vec::new(),
            warnings: Vec::new(),
            is_ai_powered: false,
        }
    }
}

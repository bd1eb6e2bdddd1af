//! Loan advisor: AI-backed analysis with a rule-based fallback
//!
//! `analyze` always returns a structurally valid result. Any failure of the
//! reasoning service or of its reply discards the AI attempt entirely and
//! the rule-based pipeline runs instead.

use chrono::{Local, NaiveDate};
use log::{info, warn};
use rust_decimal::Decimal;

use super::assembler::assemble;
use super::prompt::build_prompt;
use super::reply::parse_reply;
use super::service::ReasoningService;
use super::strategy::select_for_goal;
use super::types::{AnalysisResult, FinancialGoal, GoalType};
use crate::error::AdvisorError;
use crate::loan::Loan;

/// Strategy text when there is nothing to analyze
pub const NO_LOANS_STRATEGY: &str = "No loans to analyze. Consider this a good financial position!";

/// Warning added when the rule-based fallback ran
pub const DEGRADED_MODE_WARNING: &str = "AI analysis unavailable (degraded mode) - using simplified \
    rule-based recommendations. Ensure the reasoning service is running for better analysis.";

/// Goal driving the rule-based path: lowest priority number, first on ties
pub fn primary_goal(goals: &[FinancialGoal]) -> GoalType {
    goals
        .iter()
        .min_by_key(|g| g.priority())
        .map(FinancialGoal::goal_type)
        .unwrap_or(GoalType::MinimizeTotalInterest)
}

/// Rule-based analysis: strategy selection plus portfolio insights and warnings
pub fn analyze_with_rules(loans: &[Loan], goals: &[FinancialGoal], extra_budget: Decimal) -> AnalysisResult {
    let goal = primary_goal(goals);
    let mut result = assemble(select_for_goal(goal, loans, extra_budget), loans, extra_budget);
    result.is_ai_powered = false;
    result
}

/// Payment advisor backed by a reasoning service
pub struct LoanAdvisor<S> {
    service: S,
    today: Option<NaiveDate>,
}

impl<S: ReasoningService> LoanAdvisor<S> {
    pub fn new(service: S) -> Self {
        Self { service, today: None }
    }

    /// Fix the date used for payoff estimates in the prompt
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Analyze the portfolio against the goals
    ///
    /// One service request per call, no retries.
    pub async fn analyze(
        &self,
        loans: &[Loan],
        goals: &[FinancialGoal],
        extra_budget: Decimal,
    ) -> AnalysisResult {
        if loans.is_empty() {
            return AnalysisResult::new(NO_LOANS_STRATEGY);
        }

        match self.analyze_with_ai(loans, goals, extra_budget).await {
            Ok(result) => {
                info!("AI analysis produced {} recommendations", result.recommendations.len());
                result
            }
            Err(err) => {
                warn!("AI analysis failed: {}. Falling back to rule-based analysis.", err);
                let mut result = analyze_with_rules(loans, goals, extra_budget);
                result.warnings.push(DEGRADED_MODE_WARNING.to_string());
                result
            }
        }
    }

    async fn analyze_with_ai(
        &self,
        loans: &[Loan],
        goals: &[FinancialGoal],
        extra_budget: Decimal,
    ) -> Result<AnalysisResult, AdvisorError> {
        let prompt = build_prompt(loans, goals, extra_budget, self.today()).map_err(AdvisorError::Prompt)?;
        let reply = self.service.complete(&prompt).await?;
        let mut result = parse_reply(&reply)?;
        result.is_ai_powered = true;
        Ok(result)
    }
}

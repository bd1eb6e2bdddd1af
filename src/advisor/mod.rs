//! Advisory engine: strategy selection, savings estimates, and the AI-backed analyzer

mod types;
pub mod savings;
pub mod strategy;
pub mod assembler;
pub mod prompt;
pub mod reply;
pub mod service;
mod analyzer;

pub use types::{AnalysisResult, FinancialGoal, GoalType, PaymentRecommendation, Strategy};
pub use savings::{estimate_interest_savings, estimate_time_reduction, simulated_months_saved};
pub use strategy::{select_for_goal, select_strategy};
pub use assembler::assemble;
pub use service::{OfflineService, OllamaClient, ReasoningService};
pub use analyzer::{
    LoanAdvisor, DEGRADED_MODE_WARNING, NO_LOANS_STRATEGY,
    analyze_with_rules, primary_goal,
};

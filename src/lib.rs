//! Loan Advisor - amortization projections and payment strategy advice
//!
//! This library provides:
//! - Loan records with validated mutation and derived payoff estimates
//! - Month-by-month amortization (payoff date, balance at an offset, schedules)
//! - Savings estimates for extra payments
//! - Rule-based payment strategies (avalanche, snowball, refinance, cash flow, consolidation)
//! - An AI-backed advisor that falls back to the rules when the reasoning service fails
//! - JSON persistence and CSV import of the loan collection

pub mod error;
pub mod config;
pub mod format;
pub mod loan;
pub mod amortization;
pub mod advisor;

// Re-export commonly used types
pub use loan::{Loan, LoanStore};
pub use amortization::{AmortizationEngine, AmortizationSchedule, estimate_payoff, estimate_payoff_from};
pub use advisor::{AnalysisResult, FinancialGoal, GoalType, LoanAdvisor, PaymentRecommendation, ReasoningService, Strategy};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, LoanError, PersistenceError, ServiceError};

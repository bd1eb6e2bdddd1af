//! Analyze and compare commands

use anyhow::{Context, Result};
use chrono::{Duration, Local, Months};
use clap::Args;
use log::info;
use rust_decimal::Decimal;

use loan_advisor::advisor::{select_strategy, OfflineService, OllamaClient, ReasoningService};
use loan_advisor::format::{currency, months};
use loan_advisor::{AdvisorConfig, AnalysisResult, FinancialGoal, GoalType, LoanAdvisor, LoanStore, Strategy};

/// Highest priority accepted for a goal
const LOWEST_PRIORITY: u8 = 5;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Goal to optimize for; repeat for several, first is most important
    #[arg(long = "goal")]
    pub goals: Vec<GoalType>,

    /// Extra money available each month beyond the current payments
    #[arg(long, default_value = "0")]
    pub budget: Decimal,

    /// Skip the reasoning service and use the rule-based recommendations
    #[arg(long)]
    pub offline: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Extra money available each month beyond the current payments
    #[arg(long, default_value = "0")]
    pub budget: Decimal,
}

/// Goals in command-line order; priorities past the lowest share it
fn goals_from_args(goal_types: &[GoalType]) -> Result<Vec<FinancialGoal>> {
    let target_date = Local::now()
        .date_naive()
        .checked_add_months(Months::new(12))
        .context("target date out of range")?;

    goal_types
        .iter()
        .enumerate()
        .map(|(i, &goal_type)| {
            let priority = u8::try_from(i + 1).unwrap_or(LOWEST_PRIORITY).min(LOWEST_PRIORITY);
            FinancialGoal::new(goal_type, Decimal::ZERO, target_date, priority, goal_type.to_string())
                .context("invalid goal")
        })
        .collect()
}

pub async fn execute(store: &LoanStore, config: &AdvisorConfig, args: AnalyzeArgs) -> Result<()> {
    let loans = store.load()?;
    let goals = goals_from_args(&args.goals)?;

    let service: Box<dyn ReasoningService> = if args.offline {
        Box::new(OfflineService)
    } else {
        info!("using reasoning service {} (model {})", config.endpoint, config.model);
        Box::new(OllamaClient::new(config)?)
    };

    let result = LoanAdvisor::new(service).analyze(&loans, &goals, args.budget).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_analysis(&result);
    }
    Ok(())
}

fn print_analysis(result: &AnalysisResult) {
    let source = if result.is_ai_powered { "AI analysis" } else { "Rule-based analysis" };
    println!("{}", source);
    println!("{}", "=".repeat(source.len()));
    println!("{}\n", result.overall_strategy);

    for rec in &result.recommendations {
        println!("{}", rec.loan_name);
        println!("  Pay:      {}/month (extra {})", currency(rec.recommended_payment), currency(rec.extra_payment));
        if rec.interest_savings > Decimal::ZERO {
            println!("  Saves:    {} interest, {} sooner", currency(rec.interest_savings), months(rec.time_reduction));
        }
        println!("  Why:      {}", rec.reasoning);
    }

    println!();
    println!("Total interest savings: {}", currency(result.total_interest_savings));
    println!("Total monthly savings:  {}", currency(result.total_monthly_savings));
    println!("Time saved:             {}", months(result.overall_time_reduction));

    if !result.key_insights.is_empty() {
        println!("\nInsights:");
        for insight in &result.key_insights {
            println!("  - {}", insight);
        }
    }
    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  ! {}", warning);
        }
    }
}

pub fn compare(store: &LoanStore, args: CompareArgs) -> Result<()> {
    let loans = store.load()?;
    if loans.is_empty() {
        println!("No loans stored in {}", store.path().display());
        return Ok(());
    }

    println!("{:<18} {:<24} {:>12} {:>16} {:>14}",
        "Strategy", "Extra goes to", "Extra", "Interest saved", "Time saved");
    println!("{}", "-".repeat(88));

    for strategy in Strategy::ALL {
        let result = select_strategy(strategy, &loans, args.budget);
        let target = result
            .recommendations
            .iter()
            .find(|r| r.extra_payment > Decimal::ZERO);
        let total_saved: Decimal = result.recommendations.iter().map(|r| r.interest_savings).sum();
        let time_saved = result
            .recommendations
            .iter()
            .map(|r| r.time_reduction)
            .max()
            .unwrap_or_else(Duration::zero);

        println!("{:<18} {:<24} {:>12} {:>16} {:>14}",
            strategy.name(),
            target.map(|r| r.loan_name.as_str()).unwrap_or("-"),
            currency(target.map(|r| r.extra_payment).unwrap_or_default()),
            currency(total_saved),
            months(time_saved),
        );
    }

    Ok(())
}

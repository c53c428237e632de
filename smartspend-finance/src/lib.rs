//! smartspend-finance: category rules, period reports, trends, and advice

pub mod advice;
pub mod category_rules;
pub mod filter;
pub mod insights;
pub mod report;
pub mod trend;

pub use advice::{AdviceContext, GoalAssessment, evaluate_goal, generate_advice};
pub use category_rules::{classify, classify_with_rule, explain};
pub use filter::{FilterTotals, TransactionFilter};
pub use insights::{DashboardSummary, smart_insights};
pub use report::{aggregate, aggregate_window, monthly_report, weekly_report};
pub use trend::build_trend;

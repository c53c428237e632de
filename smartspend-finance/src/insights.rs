//! Dashboard summary and short spending insights.

use serde::Serialize;
use smartspend_core::fmt::money;
use smartspend_core::{Category, Report, SavingsGoal, Transaction};
use std::collections::HashMap;

/// Number of goals shown on the dashboard.
pub const DASHBOARD_GOALS: usize = 3;

/// Progress row for one goal, clamped for display
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GoalProgressRow {
    pub id: String,
    pub name: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub display_percent: f64,
    pub completed: bool,
}

impl From<&SavingsGoal> for GoalProgressRow {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            current_amount: goal.current_amount,
            target_amount: goal.target_amount,
            display_percent: goal.display_percent(),
            completed: goal.is_completed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    pub savings_rate: f64,
    pub goal_count: usize,
    pub completed_goals: usize,
    pub goals: Vec<GoalProgressRow>,
}

impl DashboardSummary {
    pub fn build(report: &Report, goals: &[SavingsGoal]) -> Self {
        Self {
            total_income: report.total_income,
            total_expenses: report.total_expenses,
            net_savings: report.net_savings(),
            savings_rate: report.savings_rate(),
            goal_count: goals.len(),
            completed_goals: goals.iter().filter(|g| g.is_completed()).count(),
            goals: goals.iter().take(DASHBOARD_GOALS).map(GoalProgressRow::from).collect(),
        }
    }
}

/// Top spending category and average daily spend over a 30-day month.
pub fn smart_insights(transactions: &[Transaction]) -> Vec<String> {
    let mut insights = Vec::new();

    let mut totals: HashMap<&Category, f64> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(&t.category).or_insert(0.0) += t.amount;
    }

    let top = totals.into_iter().max_by(|(ca, a), (cb, b)| {
        a.total_cmp(b).then_with(|| cb.label().cmp(ca.label()))
    });
    if let Some((category, amount)) = top {
        insights.push(format!(
            "Your top spending category is {} at {}",
            category,
            money(amount)
        ));
    }

    if !transactions.is_empty() {
        let total: f64 = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();
        insights.push(format!(
            "Your average daily spending is {}",
            money(total / 30.0)
        ));
    }

    insights
}

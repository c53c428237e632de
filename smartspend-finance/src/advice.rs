//! Rule-based advice generated from a period report and the goal list.
//!
//! Rules fire in a fixed order and every qualifying rule appends its items:
//! overspend, category concentration, savings rate, per-goal progress, and a
//! generic fallback only when nothing else fired.

use chrono::{DateTime, NaiveDate, Utc};
use smartspend_core::fmt::money;
use smartspend_core::{AdviceItem, AdviceKind, Category, IdGenerator, Report, SavingsGoal};

/// Share of spending above which a category is flagged.
pub const CONCENTRATION_THRESHOLD: f64 = 40.0;
/// Savings rate (percent of income) that earns an achievement.
pub const TARGET_SAVINGS_RATE: f64 = 20.0;
/// Goal progress (percent) from which the "almost there" tip is shown.
pub const NEARLY_THERE_PERCENT: f64 = 75.0;

/// Inputs that are not part of the report: the calendar date used for
/// deadlines and the timestamp stamped onto every item.
#[derive(Debug, Clone, Copy)]
pub struct AdviceContext {
    pub today: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

impl AdviceContext {
    pub fn new(today: NaiveDate, generated_at: DateTime<Utc>) -> Self {
        Self { today, generated_at }
    }
}

/// Where a goal stands relative to the current savings pace
#[derive(Debug, Clone, PartialEq)]
pub enum GoalAssessment {
    /// Unclamped progress at or above 100%
    Completed,
    /// 75% up to (not including) 100%
    NearlyThere { percent: f64, remaining: f64 },
    /// The monthly amount needed by the deadline exceeds current net savings
    BehindPace { required_monthly: f64, current_monthly: f64 },
    /// Nothing worth saying: on pace, deadline passed, or no savings this period
    Quiet,
}

/// Evaluate one goal against this period's net savings.
///
/// Required pace is `remaining / max(1, days_until_deadline / 30)`.
pub fn evaluate_goal(goal: &SavingsGoal, net_savings: f64, today: NaiveDate) -> GoalAssessment {
    let percent = goal.progress_percent();
    if percent >= 100.0 {
        return GoalAssessment::Completed;
    }
    if percent >= NEARLY_THERE_PERCENT {
        return GoalAssessment::NearlyThere {
            percent,
            remaining: goal.remaining(),
        };
    }

    let days_until = goal.days_left(today);
    if days_until > 0 && net_savings > 0.0 {
        let months = (days_until as f64 / 30.0).max(1.0);
        let required_monthly = goal.remaining() / months;
        if required_monthly > net_savings {
            return GoalAssessment::BehindPace {
                required_monthly,
                current_monthly: net_savings,
            };
        }
    }
    GoalAssessment::Quiet
}

struct AdviceBuilder<'a, G: IdGenerator> {
    items: Vec<AdviceItem>,
    ids: &'a mut G,
    stamp: DateTime<Utc>,
}

impl<G: IdGenerator> AdviceBuilder<'_, G> {
    fn push(
        &mut self,
        kind: AdviceKind,
        message: String,
        category: Option<Category>,
        goal_id: Option<String>,
    ) {
        self.items.push(AdviceItem {
            id: self.ids.next_id(kind.as_str()),
            kind,
            message,
            category,
            goal_id,
            timestamp: self.stamp,
        });
    }
}

/// Generate advice for `report` and `goals`.
///
/// Item ids come from `ids` and are unique within the result. The context
/// timestamp is stamped on each item and never changes which items appear.
pub fn generate_advice<G: IdGenerator>(
    report: &Report,
    goals: &[SavingsGoal],
    ctx: &AdviceContext,
    ids: &mut G,
) -> Vec<AdviceItem> {
    let mut out = AdviceBuilder {
        items: Vec::new(),
        ids,
        stamp: ctx.generated_at,
    };
    let net = report.net_savings();

    if report.total_expenses > report.total_income {
        out.push(
            AdviceKind::Warning,
            format!(
                "You're spending {} more than you earn this period. Consider reducing non-essential expenses.",
                money(report.total_expenses - report.total_income)
            ),
            None,
            None,
        );
    }

    for breakdown in &report.categories {
        if breakdown.percentage > CONCENTRATION_THRESHOLD && breakdown.category != Category::Housing {
            out.push(
                AdviceKind::Warning,
                format!(
                    "{} accounts for {:.0}% of your spending ({}). Try to reduce this category.",
                    breakdown.category,
                    breakdown.percentage,
                    money(breakdown.amount)
                ),
                Some(breakdown.category.clone()),
                None,
            );
        }
    }

    if net > 0.0 && report.total_income > 0.0 {
        let rate = report.savings_rate();
        if rate > TARGET_SAVINGS_RATE {
            out.push(
                AdviceKind::Achievement,
                format!(
                    "Great job! You saved {:.0}% of your income this period ({}). Keep it up!",
                    rate,
                    money(net)
                ),
                None,
                None,
            );
        } else {
            out.push(
                AdviceKind::Tip,
                format!(
                    "You saved {} this period. Try to increase your savings rate to 20% for better financial health.",
                    money(net)
                ),
                None,
                None,
            );
        }
    }

    for goal in goals {
        match evaluate_goal(goal, net, ctx.today) {
            GoalAssessment::Completed => out.push(
                AdviceKind::Achievement,
                format!(
                    "Congratulations! You've reached your \"{}\" goal of {}!",
                    goal.name,
                    money(goal.target_amount)
                ),
                None,
                Some(goal.id.clone()),
            ),
            GoalAssessment::NearlyThere { percent, remaining } => out.push(
                AdviceKind::Tip,
                format!(
                    "You're {:.0}% of the way to \"{}\". Just {} more to go!",
                    percent,
                    goal.name,
                    money(remaining)
                ),
                None,
                Some(goal.id.clone()),
            ),
            GoalAssessment::BehindPace {
                required_monthly,
                current_monthly,
            } => out.push(
                AdviceKind::Tip,
                format!(
                    "To reach \"{}\" by {}, save {}/month (currently saving {}/month).",
                    goal.name,
                    goal.deadline.format("%b %-d, %Y"),
                    money(required_monthly),
                    money(current_monthly)
                ),
                None,
                Some(goal.id.clone()),
            ),
            GoalAssessment::Quiet => {}
        }
    }

    if out.items.is_empty() {
        out.push(
            AdviceKind::Tip,
            "Pro tip: Track every expense to gain better control over your finances. Small purchases add up quickly!"
                .to_string(),
            None,
            None,
        );
    }

    tracing::debug!(items = out.items.len(), goals = goals.len(), "generated advice");
    out.items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use smartspend_core::{CategoryBreakdown, Period, SequenceIds};
    use std::collections::HashSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ctx() -> AdviceContext {
        AdviceContext::new(
            d(2024, 3, 15),
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        )
    }

    fn report(income: f64, expenses: f64, categories: Vec<(Category, f64)>) -> Report {
        Report {
            period: Period::month_of(d(2024, 3, 1)),
            total_income: income,
            total_expenses: expenses,
            categories: categories
                .into_iter()
                .map(|(category, amount)| CategoryBreakdown {
                    color: category.color().to_string(),
                    percentage: if expenses > 0.0 { amount / expenses * 100.0 } else { 0.0 },
                    category,
                    amount,
                })
                .collect(),
            transactions: Vec::new(),
        }
    }

    fn run(report: &Report, goals: &[SavingsGoal]) -> Vec<AdviceItem> {
        generate_advice(report, goals, &ctx(), &mut SequenceIds::new("t"))
    }

    #[test]
    fn test_overspend_warning_quantifies_shortfall() {
        let r = report(1000.0, 1200.0, vec![(Category::Housing, 1200.0)]);
        let advice = run(&r, &[]);
        let warnings: Vec<_> = advice
            .iter()
            .filter(|a| a.kind == AdviceKind::Warning && a.message.contains("more than you earn"))
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("$200.00"));
    }

    #[test]
    fn test_concentration_warning_skips_housing() {
        let r = report(
            5000.0,
            1000.0,
            vec![
                (Category::Housing, 450.0),
                (Category::FoodDining, 420.0),
                (Category::Transportation, 130.0),
            ],
        );
        let advice = run(&r, &[]);
        let concentration: Vec<_> = advice.iter().filter(|a| a.category.is_some()).collect();
        assert_eq!(concentration.len(), 1);
        assert_eq!(concentration[0].category, Some(Category::FoodDining));
        assert!(concentration[0].message.starts_with("Food & Dining accounts for 42%"));
        assert!(concentration[0].message.contains("$420.00"));
    }

    #[test]
    fn test_high_savings_rate_is_achievement() {
        let r = report(1000.0, 500.0, vec![(Category::Housing, 500.0)]);
        let advice = run(&r, &[]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Achievement);
        assert!(advice[0].message.contains("50%"));
    }

    #[test]
    fn test_low_savings_rate_is_tip() {
        let r = report(1000.0, 900.0, vec![(Category::Housing, 900.0)]);
        let advice = run(&r, &[]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Tip);
        assert!(advice[0].message.contains("$100.00"));
    }

    #[test]
    fn test_completed_goal_gets_single_achievement() {
        let goal = SavingsGoal::new("g1", "Laptop", 100.0, d(2024, 12, 31)).with_current(100.0);
        let advice = run(&report(0.0, 0.0, vec![]), &[goal]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Achievement);
        assert_eq!(advice[0].goal_id.as_deref(), Some("g1"));
        assert!(advice[0].message.contains("\"Laptop\""));
    }

    #[test]
    fn test_nearly_there_goal_tip() {
        let goal = SavingsGoal::new("g2", "Trip", 1000.0, d(2024, 12, 31)).with_current(800.0);
        let advice = run(&report(0.0, 0.0, vec![]), &[goal]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Tip);
        assert!(advice[0].message.contains("80%"));
        assert!(advice[0].message.contains("$200.00"));
    }

    #[test]
    fn test_category_at_exactly_forty_percent_is_not_flagged() {
        let r = report(
            1000.0,
            800.0,
            vec![(Category::Housing, 480.0), (Category::Shopping, 320.0)],
        );
        assert_eq!(r.categories[1].percentage, CONCENTRATION_THRESHOLD);
        let advice = run(&r, &[]);
        assert!(advice.iter().all(|a| a.kind != AdviceKind::Warning));
        assert!(advice.iter().all(|a| a.category.is_none()));
    }

    #[test]
    fn test_savings_rate_of_exactly_twenty_percent_is_tip() {
        let r = report(1000.0, 800.0, vec![(Category::Housing, 800.0)]);
        assert_eq!(r.savings_rate(), TARGET_SAVINGS_RATE);
        let advice = run(&r, &[]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Tip);
        assert!(advice[0].message.starts_with("You saved $200.00 this period."));
    }

    #[test]
    fn test_goal_at_exactly_seventy_five_percent_is_nearly_there() {
        let goal = SavingsGoal::new("g", "G", 100.0, d(2024, 12, 31)).with_current(75.0);
        assert_eq!(
            evaluate_goal(&goal, 0.0, d(2024, 3, 15)),
            GoalAssessment::NearlyThere {
                percent: 75.0,
                remaining: 25.0
            }
        );
        let advice = run(&report(0.0, 0.0, vec![]), &[goal]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Tip);
        assert_eq!(
            advice[0].message,
            "You're 75% of the way to \"G\". Just $25.00 more to go!"
        );
    }

    #[test]
    fn test_goal_just_below_seventy_five_percent_stays_quiet() {
        let goal = SavingsGoal::new("g", "G", 1000.0, d(2024, 12, 31)).with_current(749.0);
        assert_eq!(
            evaluate_goal(&goal, 0.0, d(2024, 3, 15)),
            GoalAssessment::Quiet
        );
        let advice = run(&report(0.0, 0.0, vec![]), &[goal]);
        assert_eq!(advice.len(), 1);
        assert!(advice[0].goal_id.is_none());
        assert!(advice[0].message.starts_with("Pro tip:"));
    }

    #[test]
    fn test_behind_pace_goal_tip() {
        // 60 days left -> 2 months; 900 remaining -> 450/month needed vs 100 saved
        let goal = SavingsGoal::new("g3", "Car", 1000.0, d(2024, 5, 14)).with_current(100.0);
        let r = report(1000.0, 900.0, vec![(Category::Housing, 900.0)]);
        let advice = run(&r, &[goal.clone()]);
        assert_eq!(advice.len(), 2);
        let pace = &advice[1];
        assert_eq!(pace.goal_id.as_deref(), Some("g3"));
        assert!(pace.message.contains("$450.00/month"));
        assert!(pace.message.contains("$100.00/month"));

        assert_eq!(
            evaluate_goal(&goal, 100.0, d(2024, 3, 15)),
            GoalAssessment::BehindPace {
                required_monthly: 450.0,
                current_monthly: 100.0
            }
        );
    }

    #[test]
    fn test_short_deadline_uses_one_month_floor() {
        // 10 days left -> divisor max(1, 0.33) = 1
        let goal = SavingsGoal::new("g4", "Gift", 500.0, d(2024, 3, 25));
        assert_eq!(
            evaluate_goal(&goal, 100.0, d(2024, 3, 15)),
            GoalAssessment::BehindPace {
                required_monthly: 500.0,
                current_monthly: 100.0
            }
        );
    }

    #[test]
    fn test_goal_silent_when_past_deadline_or_no_savings_or_on_pace() {
        let today = d(2024, 3, 15);
        let past = SavingsGoal::new("g5", "Old", 500.0, d(2024, 3, 15));
        assert_eq!(evaluate_goal(&past, 100.0, today), GoalAssessment::Quiet);

        let future = SavingsGoal::new("g6", "New", 500.0, d(2025, 3, 15));
        assert_eq!(evaluate_goal(&future, 0.0, today), GoalAssessment::Quiet);
        assert_eq!(evaluate_goal(&future, -50.0, today), GoalAssessment::Quiet);
        // 365 days -> ~12.2 months -> ~41/month needed
        assert_eq!(evaluate_goal(&future, 100.0, today), GoalAssessment::Quiet);
    }

    #[test]
    fn test_fallback_only_when_nothing_fired() {
        let advice = run(&report(0.0, 0.0, vec![]), &[]);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].kind, AdviceKind::Tip);
        assert!(advice[0].message.starts_with("Pro tip"));

        let quiet_goal = SavingsGoal::new("g7", "Later", 500.0, d(2025, 3, 15));
        let advice = run(&report(0.0, 0.0, vec![]), &[quiet_goal]);
        assert_eq!(advice.len(), 1);
        assert!(advice[0].message.starts_with("Pro tip"));
    }

    #[test]
    fn test_rule_order_and_unique_ids() {
        let r = report(
            1000.0,
            1500.0,
            vec![(Category::Shopping, 800.0), (Category::FoodDining, 700.0)],
        );
        let goals = vec![
            SavingsGoal::new("a", "A", 100.0, d(2024, 12, 1)).with_current(150.0),
            SavingsGoal::new("b", "B", 100.0, d(2024, 12, 1)).with_current(90.0),
        ];
        let advice = run(&r, &goals);
        let kinds: Vec<AdviceKind> = advice.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AdviceKind::Warning,
                AdviceKind::Warning,
                AdviceKind::Warning,
                AdviceKind::Achievement,
                AdviceKind::Tip,
            ]
        );
        assert_eq!(advice[1].category, Some(Category::Shopping));
        assert_eq!(advice[2].category, Some(Category::FoodDining));

        let ids: HashSet<&str> = advice.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), advice.len());
        assert!(advice.iter().all(|a| a.timestamp == ctx().generated_at));
    }

    #[test]
    fn test_timestamp_does_not_change_items() {
        let r = report(1000.0, 1200.0, vec![(Category::Shopping, 1200.0)]);
        let later = AdviceContext::new(
            d(2024, 3, 15),
            Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        );
        let a = generate_advice(&r, &[], &ctx(), &mut SequenceIds::new("x"));
        let b = generate_advice(&r, &[], &later, &mut SequenceIds::new("x"));
        let strip = |v: &[AdviceItem]| {
            v.iter()
                .map(|i| (i.id.clone(), i.kind, i.message.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(&a), strip(&b));
    }
}

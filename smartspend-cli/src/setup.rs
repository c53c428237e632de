use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use smartspend_core::time::parse_timezone;
use smartspend_core::{GoalPriority, IdGenerator, RandomIds, SavingsGoal};
use smartspend_io::GoalStore;
use std::io::{self, Write};
use std::path::Path;

use crate::config::{Config, config_path, load_config, save_config};
use crate::state::open_store;

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn prompt_default(label: &str, default: &str) -> Result<String> {
    let answer = prompt(&format!("{} [{}]", label, default))?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

/// Answers for the optional first goal, as typed.
#[derive(Debug, Default)]
struct GoalAnswers {
    name: String,
    target: String,
    deadline: String,
    priority: String,
}

/// `None` when the name was left blank.
fn goal_from_answers(answers: &GoalAnswers, ids: &mut impl IdGenerator) -> Result<Option<SavingsGoal>> {
    let name = answers.name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    let target: f64 = answers
        .target
        .trim()
        .parse()
        .with_context(|| format!("target amount {:?}", answers.target))?;
    let deadline = NaiveDate::parse_from_str(answers.deadline.trim(), "%Y-%m-%d")
        .with_context(|| format!("deadline {:?} (expected YYYY-MM-DD)", answers.deadline))?;
    let priority = if answers.priority.trim().is_empty() {
        GoalPriority::default()
    } else {
        answers
            .priority
            .parse::<GoalPriority>()
            .map_err(anyhow::Error::msg)?
    };

    let goal = SavingsGoal::new(ids.next_id("goal"), name, target, deadline).with_priority(priority);
    goal.validate()?;
    Ok(Some(goal))
}

pub fn run_setup(home: &Path) -> Result<()> {
    println!("SmartSpend setup\n");
    let mut cfg: Config = load_config(home)?;

    let tz = prompt_default("Timezone", &cfg.general.timezone)?;
    if parse_timezone(&tz).is_err() {
        bail!("unknown timezone: {} (use an IANA name like America/Chicago)", tz);
    }
    cfg.general.timezone = tz;

    let months = prompt_default("Months in trend charts", &cfg.reports.trend_months.to_string())?;
    cfg.reports.trend_months = months
        .parse()
        .with_context(|| format!("trend months {:?}", months))?;

    save_config(home, &cfg)?;

    println!("\nFirst savings goal (leave the name blank to skip)");
    let mut answers = GoalAnswers {
        name: prompt("Goal name")?,
        ..Default::default()
    };
    if !answers.name.is_empty() {
        answers.target = prompt("Target amount")?;
        answers.deadline = prompt("Deadline (YYYY-MM-DD)")?;
        answers.priority = prompt("Priority (low/medium/high)")?;
    }

    println!("\nWrote:");
    println!("- {}", config_path(home).display());

    if let Some(goal) = goal_from_answers(&answers, &mut RandomIds)? {
        let mut store = open_store(home)?;
        store.add_goal(goal.clone())?;
        println!("- goal {} ({})", goal.name, goal.id);
    }

    println!("\nNext recommended steps:");
    println!("- smartspend add 12.50 \"Coffee at the cafe\"");
    println!("- smartspend report");
    println!("- smartspend advice");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspend_core::SequenceIds;

    #[test]
    fn test_blank_name_skips_goal() {
        let goal = goal_from_answers(&GoalAnswers::default(), &mut SequenceIds::new("s")).unwrap();
        assert!(goal.is_none());
    }

    #[test]
    fn test_answers_build_goal() {
        let answers = GoalAnswers {
            name: " Emergency fund ".into(),
            target: "5000".into(),
            deadline: "2025-01-31".into(),
            priority: "High".into(),
        };
        let goal = goal_from_answers(&answers, &mut SequenceIds::new("s"))
            .unwrap()
            .unwrap();
        assert_eq!(goal.id, "goal-s-1");
        assert_eq!(goal.name, "Emergency fund");
        assert_eq!(goal.target_amount, 5000.0);
        assert_eq!(goal.priority, GoalPriority::High);
        assert_eq!(goal.current_amount, 0.0);
    }

    #[test]
    fn test_bad_answers_rejected() {
        let mut ids = SequenceIds::new("s");
        let bad_date = GoalAnswers {
            name: "Trip".into(),
            target: "100".into(),
            deadline: "next year".into(),
            ..Default::default()
        };
        assert!(goal_from_answers(&bad_date, &mut ids).is_err());

        let zero_target = GoalAnswers {
            name: "Trip".into(),
            target: "0".into(),
            deadline: "2025-01-01".into(),
            ..Default::default()
        };
        assert!(goal_from_answers(&zero_target, &mut ids).is_err());
    }
}

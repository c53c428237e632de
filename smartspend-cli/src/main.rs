use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use smartspend_core::fmt::money;
use smartspend_core::{
    Category, GoalPriority, IdGenerator, RandomIds, Report, SavingsGoal, SequenceIds, Transaction,
    TransactionKind, today_in,
};
use smartspend_finance::{
    AdviceContext, DashboardSummary, FilterTotals, TransactionFilter, build_trend, classify,
    explain, generate_advice, monthly_report, smart_insights, weekly_report,
};
use smartspend_io::{
    CsvTransactionExport, GoalStore, JsonFileStore, ReportSink, TextReportExport, TransactionStore,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod setup;
mod state;

use config::{Config, PeriodKind};

#[derive(Parser, Debug)]
#[command(
    name = "smartspend",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SMARTSPEND_BUILD_SHA"), ")"),
    about = "Personal expense tracking, reports and savings advice"
)]
struct Cli {
    /// Directory holding config.toml and the data files (default: ~/.smartspend)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive setup: timezone, trend length and an optional first goal
    Setup,

    /// Record an expense (or income with --income)
    Add {
        amount: f64,
        description: String,

        /// Category label; classified from the description when omitted
        #[arg(long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        income: bool,
    },

    /// List transactions, newest first
    List {
        /// Case-insensitive description search
        #[arg(long)]
        search: Option<String>,

        /// expense or income
        #[arg(long)]
        kind: Option<TransactionKind>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a transaction by id
    Delete { id: String },

    /// Show the category a description would be filed under
    Classify { description: String },

    /// Savings goals
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Income/expense report for the month or week containing --date
    Report {
        #[arg(long, value_enum)]
        period: Option<PeriodKind>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Monthly income/expense/savings series ending this month
    Trend {
        #[arg(long)]
        months: Option<u32>,
    },

    /// Advice for the month containing --date
    Advice {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// This month's summary, goal progress and insights
    Dashboard,

    /// Write transactions or a report to a file
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    Add {
        name: String,
        target: f64,
        /// YYYY-MM-DD
        deadline: NaiveDate,

        #[arg(long, default_value_t = 0.0)]
        current: f64,

        /// low, medium or high
        #[arg(long)]
        priority: Option<GoalPriority>,
    },
    List,
    /// Add money to a goal
    Fund { id: String, amount: f64 },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Spreadsheet of transactions (Date, Type, Category, Description, Amount)
    Csv {
        #[arg(long)]
        out: PathBuf,

        /// Export the whole ledger instead of the selected period
        #[arg(long)]
        all: bool,

        #[arg(long, value_enum)]
        period: Option<PeriodKind>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Plain-text financial report
    Report {
        #[arg(long)]
        out: PathBuf,

        #[arg(long, value_enum)]
        period: Option<PeriodKind>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Per-invocation state: resolved home, config, store and today's date.
struct App {
    home: PathBuf,
    config: Config,
    store: JsonFileStore,
    today: NaiveDate,
    json: bool,
}

impl App {
    fn open(data_dir: Option<&Path>, json: bool) -> Result<Self> {
        let home = state::ensure_smartspend_home(data_dir)?;
        let config = config::load_config(&home)?;
        let today = today_in(Utc::now(), &config.general.timezone)
            .with_context(|| format!("timezone in {}", config::config_path(&home).display()))?;
        let store = state::open_store(&home)?;
        tracing::debug!(home = %home.display(), %today, "opened data directory");
        Ok(Self {
            home,
            config,
            store,
            today,
            json,
        })
    }

    fn report(&self, period: Option<PeriodKind>, date: Option<NaiveDate>) -> Result<Report> {
        let txns = self.store.list_transactions()?;
        let anchor = date.unwrap_or(self.today);
        Ok(match period.unwrap_or(self.config.reports.default_period) {
            PeriodKind::Month => monthly_report(&txns, anchor),
            PeriodKind::Week => weekly_report(&txns, anchor),
        })
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > warn
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let mut app = App::open(cli.data_dir.as_deref(), cli.json)?;

    match cli.command {
        Command::Setup => setup::run_setup(&app.home)?,

        Command::Add {
            amount,
            description,
            category,
            date,
            income,
        } => {
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let category = match category {
                Some(label) => {
                    let c = Category::from_label(&label);
                    if c.is_custom() {
                        tracing::warn!(category = %c, "not a built-in category, keeping as custom");
                    }
                    c
                }
                None if income => Category::Income,
                None => classify(&description),
            };
            let txn = Transaction::new(
                RandomIds.next_id("txn"),
                kind,
                amount,
                description,
                category,
                date.unwrap_or(app.today),
            );
            app.store.add_transaction(txn.clone())?;
            if app.json {
                app.print_json(&txn)?;
            } else {
                println!(
                    "Added {} {} | {} | {} ({})",
                    txn.kind.as_str(),
                    money(txn.amount),
                    txn.category,
                    txn.description,
                    txn.id
                );
            }
        }

        Command::List {
            search,
            kind,
            category,
        } => {
            let mut txns = app.store.list_transactions()?;
            txns.sort_by(|a, b| b.date.cmp(&a.date));
            let filter = TransactionFilter {
                search,
                kind,
                category: category.as_deref().map(Category::from_label),
            };
            let hits = filter.apply(&txns);
            let totals = FilterTotals::of(&hits);
            if app.json {
                app.print_json(&hits)?;
            } else {
                for t in &hits {
                    println!(
                        "{} {} {:<7} {:<22} {:>12}  {}",
                        t.id,
                        t.date,
                        t.kind.as_str(),
                        t.category.label(),
                        money(t.amount),
                        t.description
                    );
                }
                println!(
                    "\n{} transactions | expenses {} | income {}",
                    totals.count,
                    money(totals.expenses),
                    money(totals.income)
                );
            }
        }

        Command::Delete { id } => {
            if !app.store.delete_transaction(&id)? {
                bail!("no transaction with id {}", id);
            }
            println!("Deleted {}", id);
        }

        Command::Classify { description } => {
            let (category, rule) = explain(&description);
            let keywords = rule.map(|r| r.keywords).unwrap_or_default();
            if app.json {
                app.print_json(&serde_json::json!({
                    "category": category,
                    "keywords": keywords,
                }))?;
            } else {
                println!("{} {}", category.icon(), category);
                if rule.is_some() {
                    println!("matched rule keywords: {}", keywords.join(", "));
                } else {
                    println!("no rule matched");
                }
            }
        }

        Command::Goal { command } => run_goal(&mut app, command)?,

        Command::Report { period, date } => {
            let report = app.report(period, date)?;
            if app.json {
                app.print_json(&report)?;
            } else {
                print_report(&report);
            }
        }

        Command::Trend { months } => {
            let months = months.unwrap_or(app.config.reports.trend_months);
            let txns = app.store.list_transactions()?;
            let trend = build_trend(&txns, months, app.today);
            if app.json {
                app.print_json(&trend)?;
            } else {
                println!("{:<6} {:>12} {:>12} {:>12}", "Month", "Income", "Expenses", "Savings");
                for p in &trend {
                    println!(
                        "{:<6} {:>12} {:>12} {:>12}",
                        p.label,
                        money(p.income),
                        money(p.expenses),
                        money(p.savings)
                    );
                }
            }
        }

        Command::Advice { date } => {
            let report = app.report(Some(PeriodKind::Month), date)?;
            let goals = app.store.list_goals()?;
            let now = Utc::now();
            let ctx = AdviceContext::new(app.today, now);
            let mut ids = SequenceIds::new(now.timestamp_millis().to_string());
            let advice = generate_advice(&report, &goals, &ctx, &mut ids);
            if app.json {
                app.print_json(&advice)?;
            } else {
                for a in &advice {
                    println!("[{}] {}", a.kind.as_str(), a.message);
                }
            }
        }

        Command::Dashboard => {
            let report = app.report(Some(PeriodKind::Month), None)?;
            let goals = app.store.list_goals()?;
            let summary = DashboardSummary::build(&report, &goals);
            let insights = smart_insights(&report.transactions);
            if app.json {
                app.print_json(&serde_json::json!({
                    "summary": summary,
                    "insights": insights,
                }))?;
            } else {
                println!("# {}\n", report.period);
                println!("Income:       {}", money(summary.total_income));
                println!("Expenses:     {}", money(summary.total_expenses));
                println!("Net savings:  {}", money(summary.net_savings));
                println!("Savings rate: {:.1}%", summary.savings_rate);
                println!(
                    "\nGoals: {} ({} completed)",
                    summary.goal_count, summary.completed_goals
                );
                for g in &summary.goals {
                    println!(
                        "- {} {} / {} ({:.0}%)",
                        g.name,
                        money(g.current_amount),
                        money(g.target_amount),
                        g.display_percent
                    );
                }
                if !insights.is_empty() {
                    println!();
                    for line in &insights {
                        println!("* {}", line);
                    }
                }
            }
        }

        Command::Export { command } => match command {
            ExportCommand::Csv {
                out,
                all,
                period,
                date,
            } => {
                let report = app.report(period, date)?;
                let txns = if all {
                    app.store.list_transactions()?
                } else {
                    report.transactions.clone()
                };
                CsvTransactionExport::create(&out)
                    .with_context(|| format!("create {}", out.display()))?
                    .write_report(&report, &txns)?;
                println!("Exported {} transactions to {}", txns.len(), out.display());
            }
            ExportCommand::Report { out, period, date } => {
                let report = app.report(period, date)?;
                TextReportExport::create(&out)
                    .with_context(|| format!("create {}", out.display()))?
                    .write_report(&report, &report.transactions)?;
                println!("Wrote report for {} to {}", report.period, out.display());
            }
        },
    }

    Ok(())
}

fn run_goal(app: &mut App, command: GoalCommand) -> Result<()> {
    match command {
        GoalCommand::Add {
            name,
            target,
            deadline,
            current,
            priority,
        } => {
            let goal = SavingsGoal::new(RandomIds.next_id("goal"), name, target, deadline)
                .with_current(current)
                .with_priority(priority.unwrap_or_default());
            app.store.add_goal(goal.clone())?;
            if app.json {
                app.print_json(&goal)?;
            } else {
                println!("Added goal {} ({})", goal.name, goal.id);
            }
        }
        GoalCommand::List => {
            let goals = app.store.list_goals()?;
            if app.json {
                return app.print_json(&goals);
            }
            for g in &goals {
                println!(
                    "{} {:<20} {} / {} ({:.0}%) due {} [{}] {} days left",
                    g.id,
                    g.name,
                    money(g.current_amount),
                    money(g.target_amount),
                    g.display_percent(),
                    g.deadline,
                    g.priority.as_str(),
                    g.days_left(app.today)
                );
            }
        }
        GoalCommand::Fund { id, amount } => {
            let goal = app
                .store
                .add_funds(&id, amount)
                .with_context(|| format!("fund goal {}", id))?;
            println!(
                "{}: {} / {} ({:.0}%)",
                goal.name,
                money(goal.current_amount),
                money(goal.target_amount),
                goal.display_percent()
            );
        }
        GoalCommand::Delete { id } => {
            if !app.store.delete_goal(&id)? {
                bail!("no goal with id {}", id);
            }
            println!("Deleted goal {}", id);
        }
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!("# {}\n", report.period);
    println!("Income:       {}", money(report.total_income));
    println!("Expenses:     {}", money(report.total_expenses));
    println!("Net savings:  {}", money(report.net_savings()));
    println!("Savings rate: {:.1}%\n", report.savings_rate());

    if report.categories.is_empty() {
        println!("(no expenses in this period)");
        return;
    }
    for c in &report.categories {
        println!(
            "{} {:<22} {:>12} {:>6.1}%",
            c.category.icon(),
            c.category.label(),
            money(c.amount),
            c.percentage
        );
    }
}

//! Dashboard command: the month at a glance

use anyhow::Result;
use chrono::{Datelike, Local};

use moneta_core::aggregate::{
    category_slices, filter_by_type, filter_current_month, goals_due_in_month, monthly_summary,
    sort_transactions, SortKey,
};
use moneta_core::format::{format_currency, month_name};
use moneta_core::{GoalStore, TransactionStore, TransactionType};

use super::{colored_amount, truncate, Context};

pub async fn cmd_dashboard(ctx: &Context) -> Result<()> {
    let api = ctx.require_auth()?;
    let today = Local::now().date_naive();
    let month = month_name(today.month());

    let mut transactions = TransactionStore::new();
    let mut goals = GoalStore::new();
    transactions.refresh(api).await;
    goals.refresh(api).await;

    if let Some(error) = transactions.error() {
        println!("⚠ Could not load transactions: {}", error);
    }
    if let Some(error) = goals.error() {
        println!("⚠ Could not load savings goals: {}", error);
    }
    let dropped = transactions.dropped() + goals.dropped();
    if dropped > 0 {
        println!("⚠ {} malformed record(s) excluded", dropped);
    }

    let summary = monthly_summary(transactions.transactions(), goals.goals(), today);

    println!();
    println!("💰 {} Summary", month);
    println!("   ─────────────────────────────────────────────");
    println!("   Income    {:>12}", format_currency(summary.income));
    println!("   Expenses  {:>12}", format_currency(summary.expenses));
    println!("   Balance   {:>12}", format_currency(summary.balance));
    println!("   Savings   {:>12}", format_currency(summary.savings));

    let current = filter_current_month(transactions.transactions(), today);
    let expenses = filter_by_type(&current, TransactionType::Expense);
    let slices = category_slices(&expenses);

    println!();
    println!("📊 {} {} Expenses", month, today.year());
    if slices.is_empty() {
        println!("   No expenses recorded for {} yet.", month);
    } else {
        for slice in &slices {
            let share = if summary.expenses > 0.0 {
                slice.amount / summary.expenses * 100.0
            } else {
                0.0
            };
            println!(
                "   {:<16} {:>10}  {:>5.1}%",
                truncate(&slice.category, 16),
                format_currency(slice.amount),
                share
            );
        }
    }

    let due = goals_due_in_month(goals.goals(), today);
    println!();
    println!("🎯 {} Savings Goals", month);
    if due.is_empty() {
        println!("   No savings goals for {} yet.", month);
    } else {
        for goal in &due {
            println!(
                "   {:<20} {} / {}  ({:.0}%)",
                truncate(&goal.name, 20),
                format_currency(goal.current_amount),
                format_currency(goal.target_amount),
                goal.progress() * 100.0
            );
        }
    }

    let recent = sort_transactions(&current, &SortKey::Date);
    println!();
    println!("📝 {} Transactions", month);
    if recent.is_empty() {
        println!("   No transactions for {} yet.", month);
    } else {
        for tx in recent.iter().take(5) {
            println!(
                "   {} │ {:>10} │ {}",
                tx.date,
                colored_amount(tx.amount, tx.kind == TransactionType::Expense),
                truncate(tx.label(), 40)
            );
        }
    }

    Ok(())
}

//! Savings goal command implementations

use anyhow::{bail, Context as _, Result};
use chrono::{Local, NaiveDate};

use moneta_core::aggregate::sort_goals;
use moneta_core::format::format_currency;
use moneta_core::{GoalDraft, GoalStore};

use super::{truncate, Context};

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub async fn cmd_goals_list(ctx: &Context) -> Result<()> {
    let api = ctx.require_auth()?;

    let mut store = GoalStore::new();
    store.refresh(api).await;

    if let Some(error) = store.error() {
        println!("⚠ Could not load savings goals: {}", error);
    }
    if store.dropped() > 0 {
        println!("⚠ {} malformed record(s) excluded", store.dropped());
    }

    let goals = sort_goals(store.goals());

    println!();
    println!("🎯 Your Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    if goals.is_empty() {
        println!("   No savings goals yet. Add one with 'moneta goals add'.");
        return Ok(());
    }

    let mut total_saved = 0.0;
    let mut total_target = 0.0;
    for goal in &goals {
        total_saved += goal.current_amount;
        total_target += goal.target_amount;
        println!(
            "   [{}] {:<20} {} {:>10} / {:<10} by {}",
            goal.id,
            truncate(&goal.name, 20),
            progress_bar(goal.progress(), 10),
            format_currency(goal.current_amount),
            format_currency(goal.target_amount),
            goal.target_date
        );
    }

    println!();
    println!(
        "   Saved {} of {} across {} goal(s)",
        format_currency(total_saved),
        format_currency(total_target),
        goals.len()
    );
    Ok(())
}

pub async fn cmd_goals_add(
    ctx: &Context,
    name: &str,
    target: &str,
    current: &str,
    date: NaiveDate,
) -> Result<()> {
    let api = ctx.require_auth()?;

    let draft = GoalDraft {
        name: name.to_string(),
        target_amount: target.to_string(),
        current_amount: current.to_string(),
        target_date: date,
    };
    let payload = draft.validate(Local::now().date_naive())?;

    let mut store = GoalStore::new();
    let created = store
        .add(api, &payload)
        .await
        .context("Failed to add savings goal")?;

    println!(
        "✓ Added goal '{}' [{}] targeting {} by {}",
        created.name,
        created.id,
        format_currency(created.target_amount),
        created.target_date
    );
    Ok(())
}

pub async fn cmd_goals_update(
    ctx: &Context,
    id: i64,
    name: &str,
    target: &str,
    current: &str,
    date: NaiveDate,
) -> Result<()> {
    let api = ctx.require_auth()?;

    let draft = GoalDraft {
        name: name.to_string(),
        target_amount: target.to_string(),
        current_amount: current.to_string(),
        target_date: date,
    };
    let payload = draft.validate(Local::now().date_naive())?;

    let mut store = GoalStore::new();
    store.refresh(api).await;
    if let Some(error) = store.error() {
        bail!("Could not load savings goals: {}", error);
    }

    let updated = store
        .update(api, id, &payload)
        .await
        .context("Failed to update savings goal")?;

    println!("✓ Updated goal '{}' [{}]", updated.name, updated.id);
    Ok(())
}

pub async fn cmd_goals_delete(ctx: &Context, id: i64) -> Result<()> {
    let api = ctx.require_auth()?;

    let mut store = GoalStore::new();
    store.refresh(api).await;
    if let Some(error) = store.error() {
        bail!("Could not load savings goals: {}", error);
    }

    store
        .delete(api, id)
        .await
        .context("Failed to delete savings goal")?;

    println!("✓ Deleted goal {}", id);
    Ok(())
}

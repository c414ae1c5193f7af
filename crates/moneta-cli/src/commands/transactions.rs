//! Transaction command implementations

use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use chrono::{Local, NaiveDate};

use moneta_core::aggregate::{filter_by_type, sort_by_raw_key, sum_amounts, SortKey};
use moneta_core::export::write_transactions_csv;
use moneta_core::format::format_currency;
use moneta_core::{TransactionDraft, TransactionStore, TransactionType};

use super::{colored_amount, truncate, Context};

pub async fn cmd_transactions_list(ctx: &Context, kind: &str, sort: &str) -> Result<()> {
    let api = ctx.require_auth()?;
    let kind = TransactionType::from_str(kind).map_err(|e| anyhow::anyhow!(e))?;

    let mut store = TransactionStore::new();
    store.refresh(api).await;

    if let Some(error) = store.error() {
        println!("⚠ Could not load transactions: {}", error);
    }
    if store.dropped() > 0 {
        println!("⚠ {} malformed record(s) excluded", store.dropped());
    }

    let filtered = filter_by_type(store.transactions(), kind);
    let total = sum_amounts(&filtered);
    let sorted = sort_by_raw_key(&filtered, sort);
    if SortKey::parse(sort).is_none() {
        println!("⚠ Unknown sort key '{}'; keeping fetch order", sort);
    }

    let title = match SortKey::parse(sort) {
        Some(SortKey::Category(name)) => format!("Category: {}", name),
        _ => match kind {
            TransactionType::Expense => "Expense History".to_string(),
            TransactionType::Income => "Income History".to_string(),
        },
    };

    println!();
    println!("📝 {}", title);
    println!("   ─────────────────────────────────────────────────────────────");

    if sorted.is_empty() {
        println!("   No {} records found.", kind);
    } else {
        for tx in &sorted {
            println!(
                "   [{}] {} │ {:>10} │ {:<14} │ {}",
                tx.id,
                tx.date,
                colored_amount(tx.amount, kind == TransactionType::Expense),
                truncate(&tx.category, 14),
                truncate(tx.label(), 30)
            );
        }
    }

    println!();
    println!("   Total: {}", format_currency(total));
    Ok(())
}

pub async fn cmd_transactions_add(
    ctx: &Context,
    kind: &str,
    amount: &str,
    category: &str,
    name: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let api = ctx.require_auth()?;
    let kind = TransactionType::from_str(kind).map_err(|e| anyhow::anyhow!(e))?;

    let draft = TransactionDraft {
        name,
        kind,
        amount: amount.to_string(),
        category: category.to_string(),
        date: date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let payload = draft.validate()?;

    let mut store = TransactionStore::new();
    let created = store
        .add(api, &payload)
        .await
        .context("Failed to add transaction")?;

    println!(
        "✓ Added {} {} [{}]",
        created.kind,
        format_currency(created.amount),
        created.id
    );
    Ok(())
}

pub async fn cmd_transactions_update(
    ctx: &Context,
    id: i64,
    kind: &str,
    amount: &str,
    category: &str,
    name: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let api = ctx.require_auth()?;
    let kind = TransactionType::from_str(kind).map_err(|e| anyhow::anyhow!(e))?;

    let draft = TransactionDraft {
        name,
        kind,
        amount: amount.to_string(),
        category: category.to_string(),
        date: date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let payload = draft.validate()?;

    let mut store = TransactionStore::new();
    store.refresh(api).await;
    if let Some(error) = store.error() {
        bail!("Could not load transactions: {}", error);
    }

    let updated = store
        .update(api, id, &payload)
        .await
        .context("Failed to update transaction")?;

    println!(
        "✓ Updated transaction {} ({})",
        updated.id,
        format_currency(updated.amount)
    );
    Ok(())
}

pub async fn cmd_transactions_delete(ctx: &Context, id: i64) -> Result<()> {
    let api = ctx.require_auth()?;

    let mut store = TransactionStore::new();
    store.refresh(api).await;
    if let Some(error) = store.error() {
        bail!("Could not load transactions: {}", error);
    }

    store
        .delete(api, id)
        .await
        .context("Failed to delete transaction")?;

    println!("✓ Deleted transaction {}", id);
    Ok(())
}

pub async fn cmd_transactions_export(ctx: &Context, output: Option<&Path>) -> Result<()> {
    let api = ctx.require_auth()?;

    let mut store = TransactionStore::new();
    store.refresh(api).await;
    if let Some(error) = store.error() {
        bail!("Could not load transactions: {}", error);
    }

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            write_transactions_csv(file, store.transactions())?;
            println!(
                "✓ Exported {} transaction(s) to {}",
                store.transactions().len(),
                path.display()
            );
        }
        None => {
            write_transactions_csv(std::io::stdout().lock(), store.transactions())?;
        }
    }
    Ok(())
}

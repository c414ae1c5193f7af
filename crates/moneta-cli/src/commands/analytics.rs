//! Analytics commands: projection chart, insight, and suggestions

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context as _, Result};
use chrono::Local;

use moneta_core::format::format_currency;
use moneta_core::projection::{build_series, spending_insight, ChartLayout, Insets, Period};
use moneta_core::AnalyticsStore;

use super::Context;

/// Chart footprint matching the mobile layout the series was designed for
const CHART_WIDTH: f64 = 360.0;
const CHART_HEIGHT: f64 = 240.0;

pub async fn cmd_analytics(
    ctx: &Context,
    period: &str,
    svg: Option<&Path>,
    dark: bool,
) -> Result<()> {
    let api = ctx.require_auth()?;
    let period = Period::from_str(period).map_err(|e| anyhow::anyhow!(e))?;
    let today = Local::now().date_naive();

    let mut store = AnalyticsStore::new();
    store.refresh(api).await;

    if let Some(error) = store.error() {
        println!("⚠ Could not load analytics: {}", error);
    }

    let series = store
        .predictions()
        .and_then(|predictions| build_series(predictions, period, today));

    println!();
    println!("📈 Expense Trends ({})", period);
    println!("   ─────────────────────────────────────────────────────────────");

    let series = match series {
        Some(series) => series,
        None => {
            println!("   No expense data available for this {}.", period);
            return Ok(());
        }
    };

    println!(
        "   Spent so far       {:>12}",
        format_currency(series.historical_total)
    );
    println!(
        "   Projected total    {:>12}",
        format_currency(series.projected_total)
    );
    println!(
        "   Additional         {:>12}",
        format_currency(series.additional_spending)
    );
    println!();
    println!("   {}", spending_insight(Some(&series), period, today));

    if let Some(path) = svg {
        let layout = ChartLayout::compute(&series, CHART_WIDTH, CHART_HEIGHT, Insets::default());
        std::fs::write(path, layout.to_svg(dark))
            .with_context(|| format!("Cannot write {}", path.display()))?;
        println!();
        println!("   Chart written to {}", path.display());
    }

    Ok(())
}

pub async fn cmd_suggest(ctx: &Context) -> Result<()> {
    let api = ctx.require_auth()?;

    let mut store = AnalyticsStore::new();
    store.refresh(api).await;

    println!();
    println!("💡 Financial Suggestions");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", store.message());
    println!();
    for suggestion in store.suggestions() {
        println!("   • {}", suggestion);
    }
    Ok(())
}

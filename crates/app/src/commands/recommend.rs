//! CLI handler for the `recommend` command.

use super::{emit, AppContext, Settings};
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use upskill_intelligence::{explain, summarize, RecommendationResult};

/// Handle the `recommend` command.
pub(crate) fn handle_recommend_command(
    settings: &Settings,
    employee: String,
    occupation: String,
    top_k: Option<usize>,
    format: OutputFormat,
    dedupe: bool,
) -> Result<()> {
    let mut settings = settings.clone();
    settings.dedupe |= dedupe;
    let top_k = top_k.unwrap_or(settings.top_k);

    let ctx = AppContext::load(&settings)?;
    let rt = Runtime::new()?;
    let pending = recommend(&ctx, &employee, &occupation, top_k);
    let result = rt.block_on(pending)?;
    emit(&render_recommendations(&result, format)?);
    Ok(())
}

pub(crate) async fn recommend(
    ctx: &AppContext,
    employee: &str,
    occupation: &str,
    top_k: usize,
) -> Result<RecommendationResult> {
    ctx.engine
        .recommend(employee, occupation, top_k)
        .await
        .with_context(|| format!("cannot recommend courses for {employee} -> {occupation}"))
}

/// Render a result as numbered course cards or as JSON.
pub(crate) fn render_recommendations(
    result: &RecommendationResult,
    format: OutputFormat,
) -> Result<Vec<String>> {
    if format.is_json() {
        return Ok(vec![serde_json::to_string_pretty(result)?]);
    }

    let mut lines = Vec::new();
    for (rank, scored) in result.iter().enumerate() {
        for (i, line) in explain(scored).into_iter().enumerate() {
            if i == 0 {
                lines.push(format!("{}. {line}", rank + 1));
            } else {
                lines.push(format!("   {line}"));
            }
        }
        lines.push(String::new());
    }
    lines.push(summarize(result));
    Ok(lines)
}

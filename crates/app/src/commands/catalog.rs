//! CLI handlers for the `occupations` and `skills` listings.

use super::{emit, AppContext, Settings};
use crate::cli::OutputFormat;
use anyhow::Result;
use serde_json::json;

/// Handle the `occupations` command.
pub(crate) fn handle_occupations_command(settings: &Settings, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::load(settings)?;
    let lines = render_pairs(&ctx.engine.occupations(), "occupations", format)?;
    emit(&lines);
    Ok(())
}

/// Handle the `skills` command.
pub(crate) fn handle_skills_command(settings: &Settings, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::load(settings)?;
    let lines = render_pairs(&ctx.engine.skills(), "skills", format)?;
    emit(&lines);
    Ok(())
}

fn render_pairs(
    pairs: &[(String, String)],
    kind: &str,
    format: OutputFormat,
) -> Result<Vec<String>> {
    if format.is_json() {
        let rows: Vec<_> = pairs
            .iter()
            .map(|(uri, label)| json!({"uri": uri, "label": label}))
            .collect();
        return Ok(vec![serde_json::to_string_pretty(&rows)?]);
    }
    if pairs.is_empty() {
        return Ok(vec![format!("No {kind} found")]);
    }
    Ok(pairs
        .iter()
        .map(|(uri, label)| format!("{label}  <{uri}>"))
        .collect())
}

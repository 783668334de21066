//! CLI handler for the `gap` command.

use super::{emit, AppContext, Settings};
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use upskill_intelligence::MissingCapability;

/// Handle the `gap` command.
pub(crate) fn handle_gap_command(
    settings: &Settings,
    employee: String,
    occupation: String,
    format: OutputFormat,
) -> Result<()> {
    let ctx = AppContext::load(settings)?;
    let missing = missing_for(&ctx, &employee, &occupation)?;
    emit(&render_gap(&employee, &occupation, &missing, format)?);
    Ok(())
}

fn missing_for(
    ctx: &AppContext,
    employee: &str,
    occupation: &str,
) -> Result<Vec<MissingCapability>> {
    ctx.engine
        .missing_capabilities(employee, occupation)
        .with_context(|| format!("cannot compute skill gap for {employee} -> {occupation}"))
}

fn render_gap(
    employee: &str,
    occupation: &str,
    missing: &[MissingCapability],
    format: OutputFormat,
) -> Result<Vec<String>> {
    if format.is_json() {
        return Ok(vec![serde_json::to_string_pretty(missing)?]);
    }
    if missing.is_empty() {
        return Ok(vec![format!(
            "{employee} already has every skill required by {occupation}"
        )]);
    }

    let mut lines = vec![format!(
        "{employee} is missing {} skill(s) for {occupation}:",
        missing.len()
    )];
    for m in missing {
        let line = format!("  - {} ({}, {})", m.label, m.level, m.experience_level);
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use upskill_intelligence::{CourseraClient, RequiredLevel, ScoringWeights};
    use upskill_test_utils::{DataDirFixture, FIXTURE_EMPLOYEE, FIXTURE_OCCUPATION};

    fn context(fixture: &DataDirFixture) -> AppContext {
        let settings = Settings {
            data_dir: fixture.path().to_path_buf(),
            top_k: 3,
            per_capability_limit: 5,
            fetch_timeout: std::time::Duration::from_secs(1),
            cache_ttl: std::time::Duration::from_secs(60),
            dedupe: false,
            scoring: ScoringWeights::default(),
        };
        let unused =
            CourseraClient::with_base_url("http://127.0.0.1:9", settings.fetch_timeout).unwrap();
        AppContext::with_source(&settings, Arc::new(unused)).unwrap()
    }

    #[test]
    fn fixture_gap_in_occupation_order() {
        let fixture = DataDirFixture::new().unwrap();
        let ctx = context(&fixture);

        let missing = missing_for(&ctx, FIXTURE_EMPLOYEE, FIXTURE_OCCUPATION).unwrap();

        let labels: Vec<_> = missing.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["statistics", "data visualization"]);
        assert_eq!(missing[0].level, RequiredLevel::Essential);
        assert_eq!(missing[1].level, RequiredLevel::Optional);
    }

    #[test]
    fn unknown_occupation_is_an_error() {
        let fixture = DataDirFixture::new().unwrap();
        let ctx = context(&fixture);
        let result = missing_for(&ctx, FIXTURE_EMPLOYEE, "occ:astronaut");
        assert!(result.is_err());
    }

    #[test]
    fn renders_text() {
        let missing = vec![
            MissingCapability::new("statistics", RequiredLevel::Essential),
            MissingCapability::new("data visualization", RequiredLevel::Optional)
                .with_experience_level("Intermediate"),
        ];
        let lines = render_gap("EMP1", "occ:analyst", &missing, OutputFormat::Text).unwrap();
        assert_eq!(
            lines,
            vec![
                "EMP1 is missing 2 skill(s) for occ:analyst:",
                "  - statistics (essential, Beginner)",
                "  - data visualization (optional, Intermediate)",
            ]
        );
    }

    #[test]
    fn renders_no_gap() {
        let lines = render_gap("EMP1", "occ:analyst", &[], OutputFormat::Text).unwrap();
        assert_eq!(
            lines,
            vec!["EMP1 already has every skill required by occ:analyst"]
        );
    }

    #[test]
    fn renders_json() {
        let missing = vec![MissingCapability::new("sql", RequiredLevel::Optional)];
        let lines = render_gap("EMP1", "occ:analyst", &missing, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        let expected = serde_json::json!([
            {"label": "sql", "level": "optional", "experience_level": "Beginner"}
        ]);
        assert_eq!(value, expected);
    }
}

//! CLI handlers for roster administration.

use super::{emit, AppContext, Settings};
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use upskill_intelligence::EmployeeRecord;

/// Handle `employees list`.
pub(crate) fn handle_employee_list_command(
    settings: &Settings,
    format: OutputFormat,
) -> Result<()> {
    let ctx = AppContext::load(settings)?;
    emit(&render_employees(&list_employees(&ctx), format)?);
    Ok(())
}

/// Handle `employees add`.
pub(crate) fn handle_employee_add_command(
    settings: &Settings,
    name: String,
    skills: Vec<String>,
) -> Result<()> {
    let ctx = AppContext::load(settings)?;
    let id = add_employee(&ctx, &name, &skills)?;
    println!("{id}");
    Ok(())
}

/// Handle `employees remove`.
pub(crate) fn handle_employee_remove_command(settings: &Settings, id: String) -> Result<()> {
    let ctx = AppContext::load(settings)?;
    if remove_employee(&ctx, &id)? {
        println!("Removed {id}");
        Ok(())
    } else {
        anyhow::bail!("no employee with id {id}")
    }
}

fn list_employees(ctx: &AppContext) -> Vec<EmployeeRecord> {
    ctx.engine
        .employee_ids()
        .iter()
        .filter_map(|id| ctx.graph.employee(id))
        .collect()
}

fn add_employee(ctx: &AppContext, name: &str, skills: &[String]) -> Result<String> {
    let id = ctx
        .graph
        .add_employee(name, skills)
        .context("failed to add employee")?;
    ctx.engine.invalidate_all();
    Ok(id)
}

fn remove_employee(ctx: &AppContext, id: &str) -> Result<bool> {
    let removed = ctx
        .graph
        .remove_employee(id)
        .context("failed to remove employee")?;
    if removed {
        ctx.engine.invalidate_all();
    }
    Ok(removed)
}

fn render_employees(employees: &[EmployeeRecord], format: OutputFormat) -> Result<Vec<String>> {
    if format.is_json() {
        return Ok(vec![serde_json::to_string_pretty(employees)?]);
    }
    if employees.is_empty() {
        return Ok(vec!["No employees recorded".to_string()]);
    }
    Ok(employees
        .iter()
        .map(|e| {
            format!(
                "{}  {}  ({} skills, {})",
                e.employee_id,
                e.name,
                e.skills.len(),
                e.experience_level
            )
        })
        .collect())
}

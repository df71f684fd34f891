//! `check` command: load and validate a configuration file.

use std::path::Path;

use trafficstate_config::{ConfigLoader, ConfigValidator, ValidationResult};

pub(crate) fn cmd_check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(path)?;
    let result = ConfigValidator::validate(&config)?;

    println!("{}", render_report(path, &result));
    println!(
        "{} waypoints, {} routes, {} jobs",
        config.waypoints.len(),
        config.routes.len(),
        config.jobs.len()
    );

    if result.is_valid() {
        Ok(())
    } else {
        Err(format!("{} configuration error(s)", result.errors.len()).into())
    }
}

fn render_report(path: &Path, result: &ValidationResult) -> String {
    let mut lines = vec![format!("Checked {}", path.display())];
    for error in &result.errors {
        lines.push(format!("  error   {}: {}", error.path, error.message));
    }
    for warning in &result.warnings {
        lines.push(format!("  warning {}: {}", warning.path, warning.message));
    }
    if result.errors.is_empty() && result.warnings.is_empty() {
        lines.push("  ok".to_string());
    }
    lines.join("\n")
}

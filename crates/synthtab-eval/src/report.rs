use crate::metrics::ValidationMetrics;

/// Render a deterministic markdown report from validation metrics and the
/// labelled cell rows.
pub fn render_report(metrics: &ValidationMetrics, cells: &[(String, f64)]) -> String {
    let mut lines = Vec::new();

    lines.push("# Synthtab Validation Report".to_string());
    lines.push(String::new());
    lines.push("## Model summary".to_string());
    lines.push(format!("- declared sample size: {}", metrics.sample_size));
    lines.push(format!("- realized total: {}", metrics.total_realized));
    lines.push(format!("- combination cells: {}", metrics.cell_count));
    lines.push(String::new());

    lines.push("## Declared probabilities".to_string());
    lines.push("| declaration | declared | realized | status |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for outcome in &metrics.declarations {
        let realized = outcome
            .realized
            .map(|value| format!("{value:.6}"))
            .unwrap_or_else(|| "-".to_string());
        let status = if outcome.passed { "pass" } else { "FAIL" };
        let note = outcome
            .note
            .as_ref()
            .map(|note| format!(" ({note})"))
            .unwrap_or_default();
        lines.push(format!(
            "| {} | {} | {} | {}{} |",
            outcome.declaration, outcome.declared, realized, status, note
        ));
    }
    lines.push(String::new());

    lines.push("## Invariants".to_string());
    lines.push("| invariant | detail | status |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    for outcome in &metrics.invariants {
        let status = if outcome.passed { "pass" } else { "FAIL" };
        lines.push(format!(
            "| {} | {} | {} |",
            outcome.code, outcome.detail, status
        ));
    }
    lines.push(String::new());

    lines.push("## Solved cells".to_string());
    lines.push("| cell | count |".to_string());
    lines.push("| --- | --- |".to_string());
    for (labels, value) in cells {
        lines.push(format!("| {labels} | {value} |"));
    }

    if !metrics.warnings.is_empty() {
        lines.push(String::new());
        lines.push("## Declaration warnings".to_string());
        for warning in &metrics.warnings {
            let hint = warning
                .hint
                .as_ref()
                .map(|hint| format!(" (hint: {hint})"))
                .unwrap_or_default();
            lines.push(format!("- {}: {}{}", warning.path, warning.message, hint));
        }
    }

    lines.join("\n")
}

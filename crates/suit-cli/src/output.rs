use serde::Serialize;
use suit_core::validate::ValidationResult;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect::<Vec<String>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(headers.iter().map(|h| h.to_string()).collect()));
    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));
    for row in rows {
        println!("{}", render(row));
    }
}

/// One line per diagnostic: `[error] line 3: message (rule)`.
pub fn print_diagnostics(identifier: &str, result: &ValidationResult) {
    if result.diagnostics.is_empty() {
        println!("'{identifier}' is valid. No issues.");
        return;
    }
    for d in &result.diagnostics {
        println!("[{}] {}: {} ({})", d.severity, d.location, d.message, d.rule);
    }
    let errors = result.errors().count();
    let warnings = result.warnings().count();
    println!("{identifier}: {errors} error(s), {warnings} warning(s)");
}

/// Shorten `text` to at most `max` characters, ending with `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("organize code in layers", 12), "organize...");
    }
}

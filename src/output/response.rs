//! Formatting of expanded arguments and diagnostics.

/// Render expanded arguments as a JSON array of strings.
///
/// JSON keeps arguments containing spaces or newlines unambiguous.
pub fn format_expanded(args: &[String]) -> String {
    serde_json::to_string(args).unwrap_or_else(|_| "[]".to_string())
}

/// Render accumulated diagnostics for stderr, one per line.
pub fn format_diagnostics(errors: &[String]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    let lines: Vec<String> = errors.iter().map(|e| format!("error: {}", e)).collect();
    Some(lines.join("\n"))
}

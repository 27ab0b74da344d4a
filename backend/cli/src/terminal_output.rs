//! Terminal notes and aligned key/value listings.
//!
//! Notes go to stderr so `extract` can pipe its text through stdout.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false))
}

fn note(color: &str, symbol: &str, plain: &str, msg: &str) {
    if supports_color() {
        eprintln!("{color}{BOLD}{symbol}{RESET} {msg}");
    } else {
        eprintln!("{plain}: {msg}");
    }
}

pub fn note_info(msg: &str) {
    note(CYAN, "ℹ", "INFO", msg);
}

pub fn note_warn(msg: &str) {
    note(YELLOW, "⚠", "WARN", msg);
}

pub fn note_error(msg: &str) {
    note(RED, "✗", "ERROR", msg);
}

pub fn note_success(msg: &str) {
    note(GREEN, "✓", "OK", msg);
}

/// Render `key  value` pairs with keys padded to the widest one.
pub fn render_fields(fields: &[(&str, String)], color: bool) -> String {
    let width = fields.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(key, value)| {
            let pad = " ".repeat(width - key.chars().count());
            if color {
                format!("  {DIM}{key}{RESET}{pad}  {value}\n")
            } else {
                format!("  {key}{pad}  {value}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_aligned() {
        let out = render_fields(
            &[
                ("endpoint", "http://127.0.0.1:8000/ocr".into()),
                ("field", "file".into()),
            ],
            false,
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  endpoint  http://127.0.0.1:8000/ocr");
        assert_eq!(lines[1], "  field     file");
    }

    #[test]
    fn colored_keys_are_dimmed() {
        let out = render_fields(&[("endpoint", "x".into())], true);
        assert_eq!(out, format!("  {DIM}endpoint{RESET}  x\n"));
    }
}

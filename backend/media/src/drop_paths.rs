//! Dropped files arrive in a terminal as pasted text.
//!
//! Terminals disagree on the format: GNOME quotes each path, macOS
//! backslash-escapes spaces, some paste `file://` URIs, one per line.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

/// Split pasted text into the paths it names, in order. `file:` URIs that do
/// not name a local file are skipped.
pub fn parse_dropped_paths(pasted: &str) -> Vec<PathBuf> {
    tokenize(pasted)
        .into_iter()
        .filter_map(|token| {
            if !token.starts_with("file:") {
                return Some(PathBuf::from(token));
            }
            let path = Url::parse(&token).ok().and_then(|url| url.to_file_path().ok());
            if path.is_none() {
                debug!(uri = %token, "Dropped URI is not a local file");
            }
            path
        })
        .collect()
}

fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') if cfg!(not(windows)) => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path() {
        assert_eq!(parse_dropped_paths("/tmp/scan.png\n"), vec![PathBuf::from("/tmp/scan.png")]);
    }

    #[test]
    fn quoted_paths_keep_spaces() {
        let paths = parse_dropped_paths("'/tmp/my scan.png' '/tmp/other.pdf' ");
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/my scan.png"), PathBuf::from("/tmp/other.pdf")]
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn escaped_spaces() {
        assert_eq!(
            parse_dropped_paths(r"/Users/me/My\ Scan.png"),
            vec![PathBuf::from("/Users/me/My Scan.png")]
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn file_uris_are_decoded() {
        let paths = parse_dropped_paths("file:///tmp/a%20b.png\nfile:///tmp/c.pdf");
        assert_eq!(paths, vec![PathBuf::from("/tmp/a b.png"), PathBuf::from("/tmp/c.pdf")]);
    }

    #[test]
    fn blank_paste_yields_nothing() {
        assert!(parse_dropped_paths("  \n ").is_empty());
    }

    #[cfg(not(windows))]
    #[test]
    fn localhost_file_uri_is_absolute() {
        assert_eq!(
            parse_dropped_paths("file://localhost/tmp/scan.png"),
            vec![PathBuf::from("/tmp/scan.png")]
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn remote_file_uri_is_skipped() {
        assert_eq!(
            parse_dropped_paths("file://fileserver/share/scan.png /tmp/b.pdf"),
            vec![PathBuf::from("/tmp/b.pdf")]
        );
    }
}

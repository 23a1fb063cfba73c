// Dragging a file onto a terminal window inserts its path as text. Each
// terminal formats it differently:
//   macOS Terminal / iTerm:  /Users/me/My\ Design.png
//   GNOME Terminal / Konsole: '/home/me/My Design.png'
//   some emulators:           file:///home/me/My%20Design.png
// Several dropped files arrive separated by spaces; only the first is used,
// unless the whole text already names an existing file.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Characters a shell-escaping terminal puts a backslash in front of. A
/// backslash before anything else is kept, so Windows paths survive.
const ESCAPABLE: &[char] = &[
    '\'', '"', '\\', '(', ')', '[', ']', '{', '}', '<', '>', '&', ';', '$', '!', '#', '*', '?',
    '|', '`', '~',
];

/// Turn the text of a drop (or a pasted path) into a path. Returns `None`
/// when the text holds no path at all.
///
/// The whole trimmed text is tried first, so an unquoted path with spaces
/// that exists on disk is taken as-is. Otherwise the first shell word is used.
pub fn normalize_dropped_path(raw: &str) -> Option<PathBuf> {
    let whole = decode_file_uri(raw.trim());
    if !whole.is_empty() && Path::new(&whole).is_file() {
        return Some(PathBuf::from(whole));
    }

    let path = decode_file_uri(&first_token(raw)?);
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Decode a `file://` URI into a local path; other text is returned as-is.
fn decode_file_uri(text: &str) -> String {
    let Some(uri) = text.strip_prefix("file://") else {
        return text.to_string();
    };
    // file://localhost/path and file:///path name the same file
    let uri = uri.strip_prefix("localhost").unwrap_or(uri);
    let decoded = percent_decode_str(uri).decode_utf8_lossy().into_owned();
    // file:///C:/Users/x.png names C:/Users/x.png
    let drive_letter = matches!(decoded.as_bytes(), [b'/', d, b':', ..] if d.is_ascii_alphabetic());
    if drive_letter {
        decoded[1..].to_string()
    } else {
        decoded
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

/// First whitespace-separated word, honoring quotes and backslash escapes.
fn first_token(raw: &str) -> Option<String> {
    let mut chars = raw.trim_start().chars().peekable();
    let mut token = String::new();
    let mut quote = Quote::None;
    let mut seen_quote = false;

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::None, c) if c.is_whitespace() => break,
            (Quote::None, '\'') => {
                quote = Quote::Single;
                seen_quote = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                seen_quote = true;
            }
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::None | Quote::Double, '\\') => match chars.peek() {
                Some(&next) if next.is_whitespace() || ESCAPABLE.contains(&next) => {
                    token.push(next);
                    chars.next();
                }
                _ => token.push('\\'),
            },
            (_, c) => token.push(c),
        }
    }

    if token.is_empty() && !seen_quote {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> Option<String> {
        normalize_dropped_path(raw).map(|p| p.to_string_lossy().into_owned())
    }

    #[test]
    fn plain_path_is_trimmed() {
        assert_eq!(norm("  /tmp/design.png \n").as_deref(), Some("/tmp/design.png"));
    }

    #[test]
    fn backslash_escaped_spaces() {
        assert_eq!(
            norm(r"/Users/me/My\ Design\ (v2).png ").as_deref(),
            Some("/Users/me/My Design (v2).png")
        );
    }

    #[test]
    fn single_and_double_quotes() {
        assert_eq!(
            norm("'/home/me/My Design.png' ").as_deref(),
            Some("/home/me/My Design.png")
        );
        assert_eq!(
            norm("\"/home/me/it's here.png\"").as_deref(),
            Some("/home/me/it's here.png")
        );
    }

    #[test]
    fn file_uri_is_decoded() {
        assert_eq!(
            norm("file:///home/me/My%20Design.png").as_deref(),
            Some("/home/me/My Design.png")
        );
        assert_eq!(
            norm("file://localhost/tmp/a.png").as_deref(),
            Some("/tmp/a.png")
        );
    }

    #[test]
    fn only_first_of_several_files() {
        assert_eq!(
            norm("'/tmp/one.png' '/tmp/two.png'").as_deref(),
            Some("/tmp/one.png")
        );
    }

    #[test]
    fn windows_path_keeps_backslashes() {
        assert_eq!(
            norm(r"C:\Users\me\design.png").as_deref(),
            Some(r"C:\Users\me\design.png")
        );
    }

    #[test]
    fn windows_file_uri_drops_leading_slash() {
        assert_eq!(
            norm("file:///C:/Users/me/My%20Design.png").as_deref(),
            Some("C:/Users/me/My Design.png")
        );
    }

    #[test]
    fn unquoted_existing_path_with_spaces_is_kept_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("My Design.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let pasted = format!("  {}\n", path.display());
        assert_eq!(normalize_dropped_path(&pasted), Some(path.clone()));

        let uri = format!("file://{}", path.display()).replace(' ', "%20");
        assert_eq!(normalize_dropped_path(&uri), Some(path));
    }

    #[test]
    fn unquoted_missing_path_with_spaces_uses_first_word() {
        assert_eq!(
            norm("/nonexistent/My Design.png").as_deref(),
            Some("/nonexistent/My")
        );
    }

    #[test]
    fn empty_input_has_no_path() {
        assert_eq!(norm("   "), None);
        assert_eq!(norm("''"), None);
        assert_eq!(norm("file://"), None);
    }
}

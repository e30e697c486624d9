//! Text cleaning for upstream prose fields
//!
//! Every description, biography and extract that reaches a caller passes
//! through [`clean_text`]. Cleaning is idempotent: cleaning already-cleaned
//! text returns it unchanged.

/// Em-dash substituted for a literal `--`
pub const EM_DASH: char = '\u{2014}';

/// Normalize line endings and dashes in upstream prose.
///
/// - `\r\n` (including runs such as `\r\r\n`) becomes `\n`
/// - every non-overlapping `--` becomes an em-dash
///
/// Returns `None` when the cleaned text is blank, so callers can fall back to
/// their policy text with a plain `match`/`unwrap_or`.
pub fn clean_text(raw: &str) -> Option<String> {
    let cleaned = replace_dashes(&normalize_newlines(raw));

    if cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Collapse `\r+\n` into `\n`. A single pass over `\r\n` is not enough:
/// `"\r\r\n"` would become `"\r\n"` and change again on the next clean.
fn normalize_newlines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_cr = 0usize;

    for ch in raw.chars() {
        match ch {
            '\r' => pending_cr += 1,
            '\n' => {
                pending_cr = 0;
                out.push('\n');
            }
            other => {
                out.extend(std::iter::repeat('\r').take(pending_cr));
                pending_cr = 0;
                out.push(other);
            }
        }
    }
    out.extend(std::iter::repeat('\r').take(pending_cr));

    out
}

fn replace_dashes(text: &str) -> String {
    text.replace("--", &EM_DASH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_becomes_lf() {
        assert_eq!(
            clean_text("line one\r\nline two").as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn test_double_hyphen_becomes_em_dash() {
        assert_eq!(
            clean_text("Pride--and Prejudice").as_deref(),
            Some("Pride\u{2014}and Prejudice")
        );
    }

    #[test]
    fn test_lone_cr_preserved() {
        assert_eq!(clean_text("a\rb").as_deref(), Some("a\rb"));
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(clean_text(""), None);
        assert_eq!(clean_text("  \r\n\t"), None);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let samples = [
            "plain",
            "a--b",
            "a---b",
            "a----b",
            "x\r\r\ny",
            "trailing\r",
            "mixed -- dash\r\nand\r\r\nlines---",
            "already \u{2014} clean\n",
        ];

        for sample in samples {
            let once = clean_text(sample).unwrap();
            let twice = clean_text(&once).unwrap();
            assert_eq!(once, twice, "cleaning {:?} was not idempotent", sample);
        }
    }

    #[test]
    fn test_odd_dash_run() {
        // Three hyphens: one em-dash plus the leftover hyphen
        assert_eq!(clean_text("a---b").as_deref(), Some("a\u{2014}-b"));
    }
}

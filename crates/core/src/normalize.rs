//! Pre-parse syntax auto-correction.
//!
//! Fixes exactly one class of authoring mistake: a directive fence glued to
//! its attribute block (`:::card{elevated}` instead of `:::card {elevated}`).
//! The pass is line-oriented, anchored at line start, never touches correct
//! input, never fails, and is idempotent. It is deliberately blind to code
//! fence context: a fence-like line inside a literal code block is corrected
//! too, a known limitation of this pass.

use crate::directive;

/// One applied correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixRecord {
    /// Line number (1-indexed).
    pub line: usize,
    /// The line as written.
    pub before: String,
    /// The line after correction.
    pub after: String,
}

/// Result of the normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// The corrected source; byte-identical to the input when nothing matched.
    pub source: String,
    /// One record per corrected line.
    pub fixes: Vec<FixRecord>,
}

impl NormalizeOutcome {
    /// Number of applied fixes.
    pub fn fix_count(&self) -> usize {
        self.fixes.len()
    }
}

/// Run the auto-corrector over a whole document.
pub fn normalize(source: &str) -> NormalizeOutcome {
    let mut fixes = Vec::new();
    let mut out = String::with_capacity(source.len());

    for (idx, chunk) in source.split_inclusive('\n').enumerate() {
        let (content, ending) = split_line_ending(chunk);
        match fix_fence_spacing(content) {
            Some(fixed) => {
                log::debug!(
                    "normalize: inserted fence spacing at line {}: {content:?}",
                    idx + 1
                );
                fixes.push(FixRecord {
                    line: idx + 1,
                    before: content.to_string(),
                    after: fixed.clone(),
                });
                out.push_str(&fixed);
            }
            None => out.push_str(content),
        }
        out.push_str(ending);
    }

    NormalizeOutcome { source: out, fixes }
}

/// Split one `split_inclusive` chunk into (content, original line ending).
fn split_line_ending(chunk: &str) -> (&str, &str) {
    if let Some(content) = chunk.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = chunk.strip_suffix('\n') {
        (content, "\n")
    } else {
        (chunk, "")
    }
}

/// `:::name{` anchored at line start becomes `:::name {`; anything else is
/// left alone.
fn fix_fence_spacing(line: &str) -> Option<String> {
    let rest = line.strip_prefix(":::")?;
    if rest.starts_with(':') {
        return None;
    }

    let name_len = directive::directive_name_len(rest);
    if name_len == 0 {
        return None;
    }

    let after_name = &rest[name_len..];
    if !after_name.starts_with('{') {
        return None;
    }

    let mut fixed = String::with_capacity(line.len() + 1);
    fixed.push_str(":::");
    fixed.push_str(&rest[..name_len]);
    fixed.push(' ');
    fixed.push_str(after_name);
    Some(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_missing_space() {
        let outcome = normalize(":::card{elevated}\nHi\n:::\n");
        assert_eq!(outcome.source, ":::card {elevated}\nHi\n:::\n");
        assert_eq!(outcome.fixes.len(), 1);
        assert_eq!(outcome.fixes[0].line, 1);
        assert_eq!(outcome.fixes[0].before, ":::card{elevated}");
        assert_eq!(outcome.fixes[0].after, ":::card {elevated}");
    }

    #[test]
    fn leaves_correct_lines_untouched() {
        let input = ":::card {elevated}\nHi\n:::\n";
        let outcome = normalize(input);
        assert_eq!(outcome.source, input);
        assert!(outcome.fixes.is_empty());
    }

    #[test]
    fn is_idempotent() {
        let once = normalize(":::tabs{boxed}\n:::\nplain text\n");
        let twice = normalize(&once.source);
        assert_eq!(once.source, twice.source);
        assert!(twice.fixes.is_empty());
    }

    #[test]
    fn ignores_indented_fences() {
        let input = "  :::card{elevated}\n";
        assert_eq!(normalize(input).source, input);
    }

    #[test]
    fn ignores_four_colon_lines() {
        let input = "::::card{elevated}\n";
        assert_eq!(normalize(input).source, input);
    }

    #[test]
    fn ignores_invalid_names() {
        let input = ":::Card{elevated}\n";
        assert_eq!(normalize(input).source, input);
    }

    #[test]
    fn fixes_multiple_lines_independently() {
        let outcome = normalize(":::card{a}\n:::\n:::grid{b}\n:::\n");
        assert_eq!(outcome.fixes.len(), 2);
        assert_eq!(outcome.fixes[1].line, 3);
    }

    #[test]
    fn preserves_crlf_endings() {
        let outcome = normalize(":::card{a}\r\ntext\r\n");
        assert_eq!(outcome.source, ":::card {a}\r\ntext\r\n");
    }

    #[test]
    fn preserves_missing_final_newline() {
        let outcome = normalize(":::card{a}");
        assert_eq!(outcome.source, ":::card {a}");
    }

    #[test]
    fn fixes_even_unbalanced_regions() {
        // The parser decides what to do with the malformed region; the
        // normalizer only restores the spacing convention.
        let outcome = normalize(":::card{elevated\n");
        assert_eq!(outcome.source, ":::card {elevated\n");
        assert_eq!(outcome.fixes.len(), 1);
    }
}

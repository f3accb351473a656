//! Help-text normalization for multi-line help blocks.

use crate::patterns::PATTERNS;

/// Cleans up the body of a multi-line help block.
///
/// - removes the embedded `<div><strong>Example…</div>` callout (examples are
///   kept in the document instead),
/// - drops whitespace-only lines,
/// - strips the indentation common to every retained line, keeping the
///   relative indentation between lines,
/// - trims trailing whitespace.
///
/// # Examples
///
/// ```
/// use slashdoc_extract::normalize_multiline_help;
///
/// let raw = "        <div>\n            Returns a list.\n        </div>\n\n    ";
/// assert_eq!(
///     normalize_multiline_help(raw),
///     "<div>\n    Returns a list.\n</div>",
/// );
/// ```
pub fn normalize_multiline_help(raw: &str) -> String {
    let without_examples = PATTERNS.example_callout.replace_all(raw, "");

    let retained: Vec<&str> = without_examples
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();

    let indent = retained
        .iter()
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    retained
        .iter()
        .map(|line| &line[indent..])
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

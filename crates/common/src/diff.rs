//! Side-by-side HTML rendering of line diffs.
//!
//! Produces a self-contained document with a two-column table, one row per
//! aligned line pair, highlighted by the diff opcode that produced it. No
//! semantic understanding of the compared text is involved.

use similar::{DiffOp, TextDiff};

/// How a rendered row relates the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl RowKind {
    fn css_class(self) -> &'static str {
        match self {
            RowKind::Equal => "diff-equal",
            RowKind::Replace => "diff-replace",
            RowKind::Delete => "diff-delete",
            RowKind::Insert => "diff-insert",
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a two-column, line-aligned HTML comparison of two line sequences.
/// `left_name` and `right_name` become the column headers.
pub fn render_side_by_side(
    left_name: &str,
    right_name: &str,
    left_lines: &[&str],
    right_lines: &[&str],
) -> String {
    let diff = TextDiff::from_slices(left_lines, right_lines);

    let mut rows = String::new();
    for op in diff.ops() {
        match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                for i in 0..len {
                    push_row(
                        &mut rows,
                        RowKind::Equal,
                        Some((old_index + i, left_lines[old_index + i])),
                        Some((new_index + i, right_lines[new_index + i])),
                    );
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                for i in 0..old_len {
                    push_row(
                        &mut rows,
                        RowKind::Delete,
                        Some((old_index + i, left_lines[old_index + i])),
                        None,
                    );
                }
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                for i in 0..new_len {
                    push_row(
                        &mut rows,
                        RowKind::Insert,
                        None,
                        Some((new_index + i, right_lines[new_index + i])),
                    );
                }
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                // Pair replaced lines row by row; the longer side pads the other
                for i in 0..old_len.max(new_len) {
                    let left = (i < old_len).then(|| (old_index + i, left_lines[old_index + i]));
                    let right = (i < new_len).then(|| (new_index + i, right_lines[new_index + i]));
                    push_row(&mut rows, RowKind::Replace, left, right);
                }
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{left} vs {right}</title>\n\
         <style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <table class=\"diff\">\n\
         <thead><tr><th colspan=\"2\">{left}</th><th colspan=\"2\">{right}</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n\
         </table>\n</body>\n</html>\n",
        left = escape_html(left_name),
        right = escape_html(right_name),
    )
}

const STYLE: &str = "\
table.diff { border-collapse: collapse; font-family: monospace; width: 100%; }
table.diff th { background: #e0e0e0; padding: 4px 8px; text-align: left; }
table.diff td { padding: 1px 8px; white-space: pre-wrap; }
table.diff td.lineno { color: #888; text-align: right; width: 3em; user-select: none; }
tr.diff-replace { background: #fff3b8; }
tr.diff-delete { background: #ffc9c9; }
tr.diff-insert { background: #c9ffc9; }";

fn push_row(
    rows: &mut String,
    kind: RowKind,
    left: Option<(usize, &str)>,
    right: Option<(usize, &str)>,
) {
    rows.push_str(&format!("<tr class=\"{}\">", kind.css_class()));
    push_cells(rows, left);
    push_cells(rows, right);
    rows.push_str("</tr>\n");
}

fn push_cells(rows: &mut String, side: Option<(usize, &str)>) {
    match side {
        Some((index, line)) => {
            // Line numbers are 1-based for display
            rows.push_str(&format!(
                "<td class=\"lineno\">{}</td><td>{}</td>",
                index + 1,
                escape_html(line)
            ));
        }
        None => rows.push_str("<td class=\"lineno\"></td><td></td>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_both_names() {
        let html = render_side_by_side("edge1", "edge2", &["a"], &["a"]);
        assert!(html.contains("edge1"));
        assert!(html.contains("edge2"));
    }

    #[test]
    fn test_changed_line_is_marked_as_replace() {
        let html = render_side_by_side("edge1", "edge2", &["a", "b", "c"], &["a", "x", "c"]);

        let replace_row = html
            .lines()
            .find(|line| line.contains("diff-replace"))
            .expect("expected a replace row");
        assert!(replace_row.contains(">b<"));
        assert!(replace_row.contains(">x<"));
        // Both sides show the changed line as line 2
        assert_eq!(replace_row.matches("class=\"lineno\">2</td>").count(), 2);
    }

    #[test]
    fn test_identical_inputs_have_no_highlights() {
        let html = render_side_by_side("a", "b", &["one", "two"], &["one", "two"]);
        assert!(!html.contains("diff-replace"));
        assert!(!html.contains("diff-delete"));
        assert!(!html.contains("diff-insert"));
        assert_eq!(html.matches("diff-equal").count(), 2);
    }

    #[test]
    fn test_removed_line_leaves_right_cell_empty() {
        let html = render_side_by_side("a", "b", &["one", "two"], &["one"]);

        let delete_row = html
            .lines()
            .find(|line| line.contains("diff-delete"))
            .expect("expected a delete row");
        assert!(delete_row.contains(">two<"));
        assert!(delete_row.ends_with("<td class=\"lineno\"></td><td></td></tr>"));
    }

    #[test]
    fn test_added_line_is_marked_as_insert() {
        let html = render_side_by_side("a", "b", &["one"], &["one", "two"]);
        assert!(html.contains("diff-insert"));
    }

    #[test]
    fn test_uneven_replace_pads_shorter_side() {
        let html = render_side_by_side("a", "b", &["x", "y", "z"], &["q"]);
        // Three replace rows, two of which have an empty right side
        assert_eq!(html.matches("diff-replace").count(), 3);
    }

    #[test]
    fn test_content_is_html_escaped() {
        let html = render_side_by_side(
            "a<b",
            "b",
            &["<script>alert(1)</script>"],
            &["value \"quoted\" & more"],
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&lt;b"));
        assert!(html.contains("&quot;quoted&quot; &amp; more"));
    }
}

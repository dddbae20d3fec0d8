//! Markdown toolbar transforms
//!
//! The engine maps `(action, buffer, selection)` to a new buffer and selection.
//! It holds no state between calls and never fails: every action is defined for
//! every selection, including an empty one, and out-of-range offsets are clamped
//! into the buffer before use.
//!
//! # Action families
//!
//! - **Wrap** (bold, italic, strike, code): delimiters around the selection.
//!   Applying the same wrap twice nests the delimiters; it does not toggle.
//! - **Heading** (h1-h3): a prefix at the start of the line holding the
//!   selection start. Only that one line is touched.
//! - **Per-line** (ul, ol, quote): a marker on each line of the selected text.
//!   Lists skip blank lines, blockquote marks every line including empty ones.
//! - **Insert** (hr, link, image): a fixed template at the selection.
//!
//! # Example
//!
//! ```ignore
//! use quill_core::{apply, MarkdownAction, SelectionRange};
//!
//! let out = apply(MarkdownAction::Bold, "hello world", SelectionRange::new(0, 5));
//! assert_eq!(out.buffer, "**hello** world");
//! assert_eq!(out.selection, SelectionRange::new(2, 7));
//! ```

use crate::action::{ActionKind, LineMarker, MarkdownAction, Template};
use crate::selection::SelectionRange;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Label used for a link inserted over an empty selection.
pub const LINK_PLACEHOLDER_LABEL: &str = "link text";
/// URL placeholder in inserted links.
pub const LINK_PLACEHOLDER_URL: &str = "https://";
/// Alt text placeholder in inserted images.
pub const IMAGE_PLACEHOLDER_ALT: &str = "alt text";
/// URL placeholder in inserted images.
pub const IMAGE_PLACEHOLDER_URL: &str = "https://via.placeholder.com/800x400";
/// Block inserted by the horizontal rule action.
pub const HORIZONTAL_RULE: &str = "\n\n---\n\n";

/// The buffer and selection produced by a transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    pub buffer: String,
    pub selection: SelectionRange,
}

impl TransformResult {
    /// A result that leaves the input untouched.
    pub fn unchanged(buffer: &str, selection: SelectionRange) -> Self {
        Self {
            buffer: buffer.to_string(),
            selection,
        }
    }
}

/// Apply a formatting action to `buffer` at `selection`.
pub fn apply(action: MarkdownAction, buffer: &str, selection: SelectionRange) -> TransformResult {
    let sel = selection.clamp_to(buffer);

    match action.kind() {
        ActionKind::Wrap { prefix, suffix } => wrap(buffer, sel, prefix, suffix),
        ActionKind::LinePrefix(prefix) => prefix_line(buffer, sel, prefix),
        ActionKind::PerLine(LineMarker::Bullet) => map_lines(buffer, sel, |_, line| {
            (!is_blank(line)).then(|| "- ".to_string())
        }),
        ActionKind::PerLine(LineMarker::Numbered) => map_lines(buffer, sel, |index, line| {
            (!is_blank(line)).then(|| format!("{}. ", index + 1))
        }),
        ActionKind::PerLine(LineMarker::Quote) => {
            map_lines(buffer, sel, |_, _| Some("> ".to_string()))
        }
        ActionKind::Insert(Template::HorizontalRule) => {
            let at = sel.end;
            TransformResult {
                buffer: splice(buffer, at..at, HORIZONTAL_RULE),
                selection: sel.collapse_to_end().shift(HORIZONTAL_RULE.len()),
            }
        }
        ActionKind::Insert(Template::Link) => {
            let selected = sel.slice(buffer);
            let label = if selected.is_empty() {
                LINK_PLACEHOLDER_LABEL
            } else {
                selected
            };
            let template = format!("[{}]({})", label, LINK_PLACEHOLDER_URL);
            let label_start = sel.start + 1;
            TransformResult {
                buffer: splice(buffer, sel.range(), &template),
                selection: SelectionRange::new(label_start, label_start + label.len()),
            }
        }
        ActionKind::Insert(Template::Image) => {
            let template = format!("![{}]({})", IMAGE_PLACEHOLDER_ALT, IMAGE_PLACEHOLDER_URL);
            let alt_start = sel.start + 2;
            TransformResult {
                buffer: splice(buffer, sel.range(), &template),
                selection: SelectionRange::new(alt_start, alt_start + IMAGE_PLACEHOLDER_ALT.len()),
            }
        }
    }
}

/// Apply an action given by its string identifier.
///
/// Unknown identifiers return the input unchanged.
pub fn apply_named(action: &str, buffer: &str, selection: SelectionRange) -> TransformResult {
    match action.parse::<MarkdownAction>() {
        Ok(action) => apply(action, buffer, selection),
        Err(e) => {
            tracing::warn!("Ignoring toolbar action: {}", e);
            TransformResult::unchanged(buffer, selection)
        }
    }
}

fn wrap(buffer: &str, sel: SelectionRange, prefix: &str, suffix: &str) -> TransformResult {
    let selected = sel.slice(buffer);

    let mut out = String::with_capacity(buffer.len() + prefix.len() + suffix.len());
    out.push_str(&buffer[..sel.start]);
    out.push_str(prefix);
    out.push_str(selected);
    out.push_str(suffix);
    out.push_str(&buffer[sel.end..]);

    let start = sel.start + prefix.len();
    TransformResult {
        buffer: out,
        selection: SelectionRange::new(start, start + selected.len()),
    }
}

fn prefix_line(buffer: &str, sel: SelectionRange, prefix: &str) -> TransformResult {
    let at = line_start(buffer, sel.start);
    TransformResult {
        buffer: splice(buffer, at..at, prefix),
        selection: sel.shift(prefix.len()),
    }
}

/// Rewrite each line of the selected text, prefixing the lines `marker` returns
/// a prefix for. `marker` gets the 0-based line index within the selection.
fn map_lines<F>(buffer: &str, sel: SelectionRange, marker: F) -> TransformResult
where
    F: Fn(usize, &str) -> Option<String>,
{
    let transformed = sel
        .slice(buffer)
        .split('\n')
        .enumerate()
        .map(|(index, line)| match marker(index, line) {
            Some(prefix) => format!("{}{}", prefix, line),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    TransformResult {
        buffer: splice(buffer, sel.range(), &transformed),
        selection: SelectionRange::new(sel.start, sel.start + transformed.len()),
    }
}

/// Offset of the first character of the line containing `pos`.
fn line_start(buffer: &str, pos: usize) -> usize {
    buffer[..pos].rfind('\n').map_or(0, |newline| newline + 1)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn splice(buffer: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(buffer.len() - range.len() + replacement.len());
    out.push_str(&buffer[..range.start]);
    out.push_str(replacement);
    out.push_str(&buffer[range.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(action: MarkdownAction, buffer: &str, start: usize, end: usize) -> (String, usize, usize) {
        let out = apply(action, buffer, SelectionRange::new(start, end));
        (out.buffer, out.selection.start, out.selection.end)
    }

    // === Wrap ===

    #[test]
    fn test_bold_wraps_selection() {
        assert_eq!(
            run(MarkdownAction::Bold, "hello world", 0, 5),
            ("**hello** world".to_string(), 2, 7)
        );
    }

    #[test]
    fn test_wrap_delimiters() {
        assert_eq!(run(MarkdownAction::Italic, "ab", 0, 2).0, "_ab_");
        assert_eq!(run(MarkdownAction::Strikethrough, "ab", 0, 2).0, "~~ab~~");
        assert_eq!(run(MarkdownAction::InlineCode, "ab", 0, 2).0, "`ab`");
    }

    #[test]
    fn test_wrap_empty_selection_leaves_caret_between_delimiters() {
        assert_eq!(
            run(MarkdownAction::Bold, "ab", 1, 1),
            ("a****b".to_string(), 3, 3)
        );
    }

    #[test]
    fn test_wrap_twice_nests_instead_of_toggling() {
        let first = apply(MarkdownAction::Bold, "hi", SelectionRange::new(0, 2));
        let second = apply(MarkdownAction::Bold, &first.buffer, first.selection);
        assert_eq!(second.buffer, "****hi****");
        assert_eq!(second.selection, SelectionRange::new(4, 6));
    }

    // === Headings ===

    #[test]
    fn test_h1_prefixes_line_of_caret() {
        assert_eq!(
            run(MarkdownAction::Heading1, "some text", 5, 5),
            ("# some text".to_string(), 7, 7)
        );
    }

    #[test]
    fn test_heading_on_later_line() {
        assert_eq!(
            run(MarkdownAction::Heading2, "one\ntwo\nthree", 5, 6),
            ("one\n## two\nthree".to_string(), 8, 9)
        );
    }

    #[test]
    fn test_heading_multi_line_selection_prefixes_first_line_only() {
        assert_eq!(
            run(MarkdownAction::Heading3, "one\ntwo", 1, 6),
            ("### one\ntwo".to_string(), 5, 10)
        );
    }

    #[test]
    fn test_heading_caret_right_after_newline() {
        assert_eq!(run(MarkdownAction::Heading1, "a\nb", 2, 2).0, "a\n# b");
    }

    // === Per-line ===

    #[test]
    fn test_ordered_list_whole_buffer() {
        assert_eq!(
            run(MarkdownAction::OrderedList, "a\nb\nc", 0, 5),
            ("1. a\n2. b\n3. c".to_string(), 0, 14)
        );
    }

    #[test]
    fn test_ordered_list_numbers_by_position_in_selection() {
        // Blank lines are skipped but still consume a number
        assert_eq!(run(MarkdownAction::OrderedList, "a\n\nb", 0, 4).0, "1. a\n\n3. b");
        // Numbering restarts at the selection, not the buffer
        assert_eq!(run(MarkdownAction::OrderedList, "x\ny\nz", 2, 5).0, "x\n1. y\n2. z");
    }

    #[test]
    fn test_unordered_list_skips_whitespace_only_lines() {
        assert_eq!(
            run(MarkdownAction::UnorderedList, "a\n  \nb", 0, 6),
            ("- a\n  \n- b".to_string(), 0, 10)
        );
    }

    #[test]
    fn test_blockquote_marks_blank_lines_too() {
        // Documented quirk: lists skip blank lines, blockquote does not
        assert_eq!(
            run(MarkdownAction::Blockquote, "a\n\nb", 0, 4),
            ("> a\n> \n> b".to_string(), 0, 10)
        );
    }

    #[test]
    fn test_per_line_empty_selection() {
        assert_eq!(run(MarkdownAction::UnorderedList, "ab", 1, 1), ("ab".to_string(), 1, 1));
        assert_eq!(run(MarkdownAction::OrderedList, "", 0, 0), (String::new(), 0, 0));
        assert_eq!(run(MarkdownAction::Blockquote, "ab", 1, 1), ("a> b".to_string(), 1, 3));
    }

    // === Inserts ===

    #[test]
    fn test_every_action_edits_the_selection() {
        for action in MarkdownAction::ALL {
            let out = apply(action, "word", SelectionRange::new(0, 4));
            assert_ne!(out.buffer, "word", "{} left the buffer untouched", action);
            assert!(out.buffer.len() > "word".len());
            assert!(out.selection.end <= out.buffer.len());
        }
    }

    #[test]
    fn test_horizontal_rule_at_end_of_selection() {
        let (buffer, start, end) = run(MarkdownAction::HorizontalRule, "abc", 3, 3);
        assert_eq!(buffer, "abc\n\n---\n\n");
        assert_eq!((start, end), (10, 10));
        assert_eq!(start, buffer.len());
    }

    #[test]
    fn test_horizontal_rule_inserts_after_selected_text() {
        assert_eq!(
            run(MarkdownAction::HorizontalRule, "abcd", 1, 3),
            ("abc\n\n---\n\nd".to_string(), 10, 10)
        );
    }

    #[test]
    fn test_link_uses_selection_as_label() {
        let (buffer, start, end) = run(MarkdownAction::Link, "click here", 6, 10);
        assert_eq!(buffer, "click [here](https://)");
        assert_eq!(&buffer[start..end], "here");
        assert_eq!((start, end), (7, 11));
    }

    #[test]
    fn test_link_empty_selection_uses_placeholder() {
        let (buffer, start, end) = run(MarkdownAction::Link, "", 0, 0);
        assert_eq!(buffer, "[link text](https://)");
        assert_eq!(&buffer[start..end], LINK_PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_image_discards_selection() {
        let (buffer, start, end) = run(MarkdownAction::Image, "see pic!", 4, 7);
        assert_eq!(buffer, "see ![alt text](https://via.placeholder.com/800x400)!");
        assert_eq!(&buffer[start..end], "alt text");
    }

    // === General properties ===

    #[test]
    fn test_apply_is_deterministic() {
        let buffer = "line one\nline two\n\nline four";
        for action in MarkdownAction::ALL {
            for (start, end) in [(0, 0), (3, 12), (9, 9), (0, buffer.len())] {
                let sel = SelectionRange::new(start, end);
                assert_eq!(apply(action, buffer, sel), apply(action, buffer, sel));
            }
        }
    }

    #[test]
    fn test_every_action_total_on_empty_buffer() {
        for action in MarkdownAction::ALL {
            let out = apply(action, "", SelectionRange::caret(0));
            assert!(out.selection.end <= out.buffer.len());
        }
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        assert_eq!(
            run(MarkdownAction::Bold, "abc", 1, 99),
            ("a**bc**".to_string(), 3, 5)
        );
        assert_eq!(
            run(MarkdownAction::Heading1, "abc", 50, 60),
            ("# abc".to_string(), 5, 5)
        );
    }

    #[test]
    fn test_multibyte_text() {
        let buffer = "héllo wörld";
        let sel = SelectionRange::new(7, 13);
        assert_eq!(sel.slice(buffer), "wörld");
        let out = apply(MarkdownAction::InlineCode, buffer, sel);
        assert_eq!(out.buffer, "héllo `wörld`");
        assert_eq!(out.selection.slice(&out.buffer), "wörld");
    }

    #[test]
    fn test_apply_named() {
        let out = apply_named("bold", "x", SelectionRange::new(0, 1));
        assert_eq!(out.buffer, "**x**");

        let sel = SelectionRange::new(0, 1);
        let out = apply_named("underline", "x", sel);
        assert_eq!(out, TransformResult::unchanged("x", sel));
    }
}

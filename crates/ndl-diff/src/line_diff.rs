//! Line-oriented text diff with intraline change spans.
//!
//! [`LcsLineDiffer`] aligns the two texts on a longest common subsequence of
//! lines. Each run of lines between two aligned lines is then paired up:
//! the k-th removed line with the k-th added line becomes a
//! [`LineTag::Changed`] line whose spans come from a second, character-level
//! alignment. Lines left over on one side stay removed or added.
//!
//! Both alignments run in memory linear in the input. Line pairs longer than
//! [`MAX_INTRALINE_CHARS`] skip the character pass and are marked changed as
//! a whole.

use crate::myers::{edit_script, Edit};
use std::fmt;

/// Longest line, in characters, that gets character-level change spans.
pub const MAX_INTRALINE_CHARS: usize = 2_000;

/// Kind of edit a span takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Present only on the right.
    Added,
    /// Present only on the left.
    Removed,
    /// Replaced by different text on the other side.
    Changed,
}

/// A piece of one side of a line; unmarked spans are common to both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Text of the span.
    pub text: String,
    /// Edit this span belongs to, if any.
    pub mark: Option<Mark>,
}

impl Span {
    /// Unmarked span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mark: None,
        }
    }

    /// Span carrying `mark`.
    pub fn marked(text: impl Into<String>, mark: Mark) -> Self {
        Self {
            text: text.into(),
            mark: Some(mark),
        }
    }
}

/// How a line pair relates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTag {
    /// Identical on both sides.
    Equal,
    /// Right side only.
    Added,
    /// Left side only.
    Removed,
    /// Both sides present with different text.
    Changed,
}

/// One row of an annotated diff. A side that is absent has no spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Relation between the two sides.
    pub tag: LineTag,
    /// Left spans.
    pub left: Vec<Span>,
    /// Right spans.
    pub right: Vec<Span>,
}

impl DiffLine {
    /// True unless the line is [`LineTag::Equal`].
    pub fn is_change(&self) -> bool {
        self.tag != LineTag::Equal
    }

    /// Left text without marks.
    pub fn left_text(&self) -> String {
        self.left.iter().map(|s| s.text.as_str()).collect()
    }

    /// Right text without marks.
    pub fn right_text(&self) -> String {
        self.right.iter().map(|s| s.text.as_str()).collect()
    }

    fn equal(text: &str) -> Self {
        Self {
            tag: LineTag::Equal,
            left: vec![Span::plain(text)],
            right: vec![Span::plain(text)],
        }
    }

    fn removed(text: &str) -> Self {
        Self {
            tag: LineTag::Removed,
            left: vec![Span::marked(text, Mark::Removed)],
            right: Vec::new(),
        }
    }

    fn added(text: &str) -> Self {
        Self {
            tag: LineTag::Added,
            left: Vec::new(),
            right: vec![Span::marked(text, Mark::Added)],
        }
    }

    fn changed(left: &str, right: &str) -> Self {
        let (left, right) = intraline_spans(left, right);
        Self {
            tag: LineTag::Changed,
            left,
            right,
        }
    }
}

/// Produces an annotated line diff of two texts.
pub trait TextDiffer: fmt::Debug + Send + Sync {
    /// Diffs `left` against `right` line by line.
    fn diff_lines(&self, left: &str, right: &str) -> Vec<DiffLine>;
}

/// Longest-common-subsequence line differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcsLineDiffer;

impl TextDiffer for LcsLineDiffer {
    fn diff_lines(&self, left: &str, right: &str) -> Vec<DiffLine> {
        let left: Vec<&str> = left.lines().collect();
        let right: Vec<&str> = right.lines().collect();

        let mut lines = Vec::with_capacity(left.len().max(right.len()));
        let mut removed: Vec<&str> = Vec::new();
        let mut added: Vec<&str> = Vec::new();
        let (mut l, mut r) = (0, 0);
        for edit in edit_script(&left, &right) {
            match edit {
                Edit::Keep => {
                    flush_run(&mut lines, &mut removed, &mut added);
                    lines.push(DiffLine::equal(left[l]));
                    l += 1;
                    r += 1;
                }
                Edit::Delete => {
                    removed.push(left[l]);
                    l += 1;
                }
                Edit::Insert => {
                    added.push(right[r]);
                    r += 1;
                }
            }
        }
        flush_run(&mut lines, &mut removed, &mut added);
        lines
    }
}

fn flush_run<'a>(
    lines: &mut Vec<DiffLine>,
    removed: &mut Vec<&'a str>,
    added: &mut Vec<&'a str>,
) {
    let paired = removed.len().min(added.len());
    for (left, right) in removed.iter().zip(added.iter()) {
        lines.push(DiffLine::changed(left, right));
    }
    lines.extend(removed[paired..].iter().map(|text| DiffLine::removed(text)));
    lines.extend(added[paired..].iter().map(|text| DiffLine::added(text)));
    removed.clear();
    added.clear();
}

/// Character-level spans for a changed line pair.
fn intraline_spans(left: &str, right: &str) -> (Vec<Span>, Vec<Span>) {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    if left.len() > MAX_INTRALINE_CHARS || right.len() > MAX_INTRALINE_CHARS {
        return (
            vec![Span::marked(String::from_iter(&left), Mark::Changed)],
            vec![Span::marked(String::from_iter(&right), Mark::Changed)],
        );
    }
    let script = edit_script(&left, &right);

    let mut left_spans = Vec::new();
    let mut right_spans = Vec::new();
    let (mut l, mut r) = (0, 0);
    let mut idx = 0;
    while idx < script.len() {
        if script[idx] == Edit::Keep {
            push_char(&mut left_spans, left[l], None);
            push_char(&mut right_spans, right[r], None);
            l += 1;
            r += 1;
            idx += 1;
            continue;
        }
        let end = script[idx..]
            .iter()
            .position(|edit| *edit == Edit::Keep)
            .map_or(script.len(), |offset| idx + offset);
        let run = &script[idx..end];
        let deletes = run.iter().filter(|e| **e == Edit::Delete).count();
        let inserts = run.len() - deletes;
        let (left_mark, right_mark) = if deletes > 0 && inserts > 0 {
            (Mark::Changed, Mark::Changed)
        } else {
            (Mark::Removed, Mark::Added)
        };
        for ch in &left[l..l + deletes] {
            push_char(&mut left_spans, *ch, Some(left_mark));
        }
        for ch in &right[r..r + inserts] {
            push_char(&mut right_spans, *ch, Some(right_mark));
        }
        l += deletes;
        r += inserts;
        idx = end;
    }
    (left_spans, right_spans)
}

fn push_char(spans: &mut Vec<Span>, ch: char, mark: Option<Mark>) {
    match spans.last_mut() {
        Some(last) if last.mark == mark => last.text.push(ch),
        _ => spans.push(Span {
            text: ch.to_string(),
            mark,
        }),
    }
}

//! Side-by-side rendering of annotated diffs.

use crate::line_diff::{DiffLine, LineTag, Mark, Span};

/// Default column width per side.
pub const DEFAULT_WIDTH: usize = 40;

const ANSI_GREEN: &str = "\x1b[0;32m";
const ANSI_RED: &str = "\x1b[0;31m";
const ANSI_YELLOW: &str = "\x1b[0;33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Opening and closing text wrapped around marked spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Wraps added text.
    pub added: (String, String),
    /// Wraps removed text.
    pub removed: (String, String),
    /// Wraps changed text.
    pub changed: (String, String),
}

impl Markers {
    /// Terminal colours: green added, red removed, yellow changed.
    pub fn ansi() -> Self {
        Self {
            added: (ANSI_GREEN.into(), ANSI_RESET.into()),
            removed: (ANSI_RED.into(), ANSI_RESET.into()),
            changed: (ANSI_YELLOW.into(), ANSI_RESET.into()),
        }
    }

    /// Bracket markers for logs and plain terminals: `{+ +}`, `[- -]`, `{~ ~}`.
    pub fn plain() -> Self {
        Self {
            added: ("{+".into(), "+}".into()),
            removed: ("[-".into(), "-]".into()),
            changed: ("{~".into(), "~}".into()),
        }
    }

    fn wrap(&self, mark: Mark) -> (&str, &str) {
        let (open, close) = match mark {
            Mark::Added => &self.added,
            Mark::Removed => &self.removed,
            Mark::Changed => &self.changed,
        };
        (open, close)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Renders [`DiffLine`]s as two fixed-width columns.
///
/// Each row is `left gutter right`, where both sides are truncated or padded
/// to `width` visible characters (markers do not count) and the gutter is
/// ` ` for equal rows, `|` for changed, `<` for removed and `>` for added.
/// Rendering has no influence on whether two documents match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    width: usize,
    markers: Markers,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Formatter {
    /// Formatter with ANSI markers and `width` characters per side.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            markers: Markers::ansi(),
        }
    }

    /// Replaces the marker set.
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Column width per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Renders all rows, newline-separated.
    pub fn render(&self, lines: &[DiffLine]) -> String {
        lines
            .iter()
            .map(|line| self.render_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders one row.
    pub fn render_line(&self, line: &DiffLine) -> String {
        let gutter = match line.tag {
            LineTag::Equal => ' ',
            LineTag::Changed => '|',
            LineTag::Removed => '<',
            LineTag::Added => '>',
        };
        let row = format!(
            "{} {} {}",
            self.column(&line.left),
            gutter,
            self.column(&line.right)
        );
        row.trim_end().to_string()
    }

    /// Renders one side clipped to `width` visible characters, then pads it.
    fn column(&self, spans: &[Span]) -> String {
        let mut out = String::new();
        let mut remaining = self.width;
        for span in spans {
            if remaining == 0 {
                break;
            }
            let text: String = span.text.chars().take(remaining).collect();
            remaining -= text.chars().count();
            match span.mark {
                Some(mark) => {
                    let (open, close) = self.markers.wrap(mark);
                    out.push_str(open);
                    out.push_str(&text);
                    out.push_str(close);
                }
                None => out.push_str(&text),
            }
        }
        out.extend(std::iter::repeat(' ').take(remaining));
        out
    }
}

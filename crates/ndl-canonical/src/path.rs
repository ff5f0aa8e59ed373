use std::fmt;

/// Separator used when a path is rendered for regex matching.
pub const SEPARATOR: &str = "/";

/// Location of a node inside a document.
///
/// Mapping descents append the key; sequence descents append an `[index]`
/// marker. Paths are never mutated; each descent returns a new path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path of the document root.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Builds a path from its components.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of the mapping entry `key` below this node.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }

    /// Path of the sequence element at `index` below this node.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }

    /// All components, root first.
    pub fn components(&self) -> &[String] {
        &self.segments
    }

    /// Final component, `None` at the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Components joined by [`SEPARATOR`]; the root renders as `""`.
    pub fn joined(&self) -> String {
        self.segments.join(SEPARATOR)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.joined())
        }
    }
}

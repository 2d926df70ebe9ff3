use colored::{ColoredString, Colorize};

/// How a file on disk differs from the version the next commit would record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }
}

impl WorkspaceChangeType {
    /// `(modified)` / `(deleted)` suffix shown after the path
    pub fn label(&self) -> ColoredString {
        let label = format!("({})", <&str>::from(self));
        match self {
            WorkspaceChangeType::Modified => label.yellow(),
            WorkspaceChangeType::Deleted => label.red(),
        }
    }
}

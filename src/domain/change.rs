use super::change_type::Type;

/// Where a change came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// A regular commit, or a merge commit in no recognized format
    Commit,
    /// `Merge branch '<branch>'`
    Merge { branch: String },
    /// `Merge pull request #<number>`
    PullRequest { number: u64 },
}

/// A single entry in the release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    kind: ChangeKind,
    message: String,
    change_type: Type,
}

impl Change {
    pub fn new(message: impl Into<String>, change_type: Type) -> Self {
        Change {
            kind: ChangeKind::Commit,
            message: message.into(),
            change_type,
        }
    }

    pub fn merge(branch: impl Into<String>, message: impl Into<String>, change_type: Type) -> Self {
        Change {
            kind: ChangeKind::Merge {
                branch: branch.into(),
            },
            message: message.into(),
            change_type,
        }
    }

    pub fn pull_request(number: u64, message: impl Into<String>, change_type: Type) -> Self {
        Change {
            kind: ChangeKind::PullRequest { number },
            message: message.into(),
            change_type,
        }
    }

    pub fn kind(&self) -> &ChangeKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn change_type(&self) -> &Type {
        &self.change_type
    }

    pub fn set_type(&mut self, change_type: Type) {
        self.change_type = change_type;
    }

    pub fn is_pull_request(&self) -> bool {
        matches!(self.kind, ChangeKind::PullRequest { .. })
    }

    /// One-line markdown bullet for the release notes.
    ///
    /// Uses the first non-empty line of the message and tags merges and
    /// pull requests with their origin.
    pub fn display_short(&self) -> String {
        let summary = self
            .message
            .split('\n')
            .find(|line| !line.is_empty())
            .unwrap_or("");

        match &self.kind {
            ChangeKind::Commit => format!("* {}", summary),
            ChangeKind::Merge { branch } => {
                format!("* {}&nbsp;<sup>[{}]</sup>", summary, branch)
            }
            ChangeKind::PullRequest { number } => {
                format!("* {}&nbsp;<sup>[PR&nbsp;#{}]</sup>", summary, number)
            }
        }
    }

    /// Full markdown description, shown when asking a human to classify the change
    pub fn display_full(&self) -> String {
        match &self.kind {
            ChangeKind::Commit => self.message.clone(),
            ChangeKind::Merge { branch } => format!("### {}\n{}", branch, self.message),
            ChangeKind::PullRequest { number } => {
                format!("### Pull Request #{}\n{}", number, self.message)
            }
        }
    }
}

/// Ordered list of classified changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeList {
    changes: Vec<Change>,
}

impl ChangeList {
    pub fn new(changes: Vec<Change>) -> Self {
        ChangeList { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// The most significant change, by type weight.
    ///
    /// On equal weights the earliest change wins. Returns `None` for an empty list.
    pub fn largest_change(&self) -> Option<&Change> {
        self.changes.iter().fold(None, |largest: Option<&Change>, change| match largest {
            Some(current) if current.change_type().weight() >= change.change_type().weight() => {
                Some(current)
            }
            _ => Some(change),
        })
    }

    /// Markdown release notes, one `## <description>` section per type.
    ///
    /// Sections follow the type sort order (weight descending, name
    /// ascending); types with no changes are omitted.
    pub fn display(&self) -> String {
        let mut types: Vec<&Type> = Vec::new();
        for change in &self.changes {
            if !types.iter().any(|t| t.code() == change.change_type().code()) {
                types.push(change.change_type());
            }
        }
        types.sort_by(|a, b| Type::sort_order(a, b));

        types
            .iter()
            .map(|t| {
                let lines: Vec<String> = self
                    .changes
                    .iter()
                    .filter(|c| c.change_type().code() == t.code())
                    .map(Change::display_short)
                    .collect();
                format!("## {}\n{}", t.description(), lines.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl IntoIterator for ChangeList {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

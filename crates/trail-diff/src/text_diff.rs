//! Line-level diff of multi-line string fields.
//!
//! Audit records for document edits often carry large prose fields (a
//! summary, a cover letter body). Showing those as two opaque blobs hides
//! the edit; this module produces structured hunks with context lines via
//! the `similar` crate (Myers diff algorithm).

use similar::ChangeTag;

/// The result of diffing two multi-line strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDiff {
    /// The diff hunks.
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the old text.
    pub old_lines: usize,
    /// Total number of lines in the new text.
    pub new_lines: usize,
}

impl TextDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }
}

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Line number in the old text where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the old text in this hunk.
    pub old_count: usize,
    /// Line number in the new text where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the new text in this hunk.
    pub new_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present in both old and new (context).
    Context(String),
    /// A line added in the new text.
    Added(String),
    /// A line removed from the old text.
    Removed(String),
}

/// Compute a line-by-line diff between two strings.
pub fn diff_text(old: &str, new: &str) -> TextDiff {
    let old_lines = old.lines().count();
    let new_lines = new.lines().count();

    if old == new {
        return TextDiff {
            hunks: Vec::new(),
            old_lines,
            new_lines,
        };
    }

    let text_diff = similar::TextDiff::from_lines(old, new);

    let mut hunks = Vec::new();

    for hunk in text_diff.grouped_ops(3) {
        let mut lines = Vec::new();
        let mut hunk_old_start = 0usize;
        let mut hunk_new_start = 0usize;
        let mut hunk_old_count = 0usize;
        let mut hunk_new_count = 0usize;
        let mut first = true;

        for op in &hunk {
            if first {
                hunk_old_start = op.old_range().start + 1;
                hunk_new_start = op.new_range().start + 1;
                first = false;
            }

            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        lines.push(DiffLine::Context(text));
                        hunk_old_count += 1;
                        hunk_new_count += 1;
                    }
                    ChangeTag::Delete => {
                        lines.push(DiffLine::Removed(text));
                        hunk_old_count += 1;
                    }
                    ChangeTag::Insert => {
                        lines.push(DiffLine::Added(text));
                        hunk_new_count += 1;
                    }
                }
            }
        }

        hunks.push(DiffHunk {
            old_start: hunk_old_start,
            old_count: hunk_old_count,
            new_start: hunk_new_start,
            new_count: hunk_new_count,
            lines,
        });
    }

    TextDiff {
        hunks,
        old_lines,
        new_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_no_diff() {
        let content = "hello\nworld\n";
        let diff = diff_text(content, content);
        assert!(diff.is_empty());
        assert_eq!(diff.additions(), 0);
        assert_eq!(diff.deletions(), 0);
    }

    #[test]
    fn single_line_addition() {
        let old = "line1\nline2\n";
        let new = "line1\nline2\nline3\n";

        let diff = diff_text(old, new);
        assert!(!diff.is_empty());
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 0);
    }

    #[test]
    fn single_line_deletion() {
        let old = "line1\nline2\nline3\n";
        let new = "line1\nline3\n";

        let diff = diff_text(old, new);
        assert!(!diff.is_empty());
        assert!(diff.deletions() >= 1);
    }

    #[test]
    fn modification_shows_remove_and_add() {
        let old = "worked on backend services\n";
        let new = "led backend services team\n";

        let diff = diff_text(old, new);
        assert!(!diff.is_empty());
        assert!(diff.additions() >= 1);
        assert!(diff.deletions() >= 1);
    }

    #[test]
    fn empty_to_content() {
        let diff = diff_text("", "new content\n");
        assert!(!diff.is_empty());
        assert!(diff.additions() >= 1);
    }

    #[test]
    fn hunk_line_numbers() {
        let old = "a\nb\nc\nd\ne\n";
        let new = "a\nb\nX\nd\ne\n";

        let diff = diff_text(old, new);
        assert!(!diff.is_empty());
        let hunk = &diff.hunks[0];
        assert!(hunk.old_start >= 1);
        assert!(hunk.new_start >= 1);
    }

    #[test]
    fn line_totals() {
        let old = "line1\nline2\nline3\nline4\nline5\n";
        let new = "line1\nmodified\nline3\nnew_line\nline5\n";

        let diff = diff_text(old, new);
        assert!(!diff.is_empty());
        assert_eq!(diff.old_lines, 5);
        assert_eq!(diff.new_lines, 5);
    }

    #[test]
    fn context_lines_present() {
        let old = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj\n";
        let new = "a\nb\nc\nd\nX\nf\ng\nh\ni\nj\n";

        let diff = diff_text(old, new);
        assert!(!diff.is_empty());

        let hunk = &diff.hunks[0];
        let has_context = hunk.lines.iter().any(|l| matches!(l, DiffLine::Context(_)));
        assert!(has_context, "hunk should contain context lines");
    }
}

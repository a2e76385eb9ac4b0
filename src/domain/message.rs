use crate::domain::summary::Summary;

const COMMENT_MARKER: char = '#';

/// True when the file already holds a line git would keep as part of the
/// message: anything that is neither blank nor a template comment.
pub fn has_existing_message(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
}

/// Summary, a blank separator line, then the original file content untouched.
pub fn prepend_summary(summary: &Summary, original: &str) -> String {
    format!("{}\n\n{}", summary.as_str(), original)
}

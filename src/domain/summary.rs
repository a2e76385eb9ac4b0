/// Conventional-commit types the prompt offers to the model.
pub const COMMIT_TYPES: [&str; 11] = [
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

const WRAPPING_MARKS: [char; 3] = ['`', '"', '\''];

/// Commit message text produced by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(String);

impl Summary {
    /// Trims raw model output into a commit message.
    ///
    /// The text is kept whole apart from surrounding whitespace. A reply that
    /// is entirely a fenced code block, or entirely wrapped in one pair of
    /// matching quotes or backticks, is unwrapped. A conventional header
    /// whose subject is empty (`feat(cli):` with nothing after the colon) is
    /// rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = unwrap_pair(unwrap_fence(raw.trim()));
        let header = text.lines().next().unwrap_or_default();

        if text.is_empty() || has_empty_subject(header) {
            return None;
        }
        Some(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn header(&self) -> &str {
        self.0.lines().next().unwrap_or_default()
    }
}

fn unwrap_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (```text) on the opening line.
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}

fn unwrap_pair(text: &str) -> &str {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return text;
    };
    if first != last || !WRAPPING_MARKS.contains(&first) {
        return text;
    }
    let inner = &text[first.len_utf8()..text.len() - last.len_utf8()];
    if inner.contains(first) {
        // `foo` and `bar` is two spans, not one wrapped reply.
        return text;
    }
    inner.trim()
}

fn has_empty_subject(line: &str) -> bool {
    let Some((head, subject)) = line.split_once(':') else {
        return false;
    };
    let kind = head
        .split(['(', '!'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    COMMIT_TYPES.contains(&kind.as_str()) && subject.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let summary = Summary::parse("  fix: correct null check \n").unwrap();
        assert_eq!(summary.as_str(), "fix: correct null check");
    }

    #[test]
    fn keeps_body_lines() {
        let summary = Summary::parse("\n\nfeat: add install\n\n- write hook script\n").unwrap();
        assert_eq!(summary.as_str(), "feat: add install\n\n- write hook script");
        assert_eq!(summary.header(), "feat: add install");
    }

    #[test]
    fn keeps_closing_backtick_of_inline_code() {
        let summary = Summary::parse("refactor: rename `foo` to `bar`").unwrap();
        assert_eq!(summary.as_str(), "refactor: rename `foo` to `bar`");
    }

    #[test]
    fn keeps_closing_quote_of_quoted_word() {
        let summary = Summary::parse("fix: accept 'none'").unwrap();
        assert_eq!(summary.as_str(), "fix: accept 'none'");
    }

    #[test]
    fn leaves_two_separate_spans_alone() {
        let summary = Summary::parse("`a` and `b`").unwrap();
        assert_eq!(summary.as_str(), "`a` and `b`");
    }

    #[test]
    fn unwraps_fenced_or_quoted_reply() {
        let summary = Summary::parse("```text\nrefactor: split git module\n```").unwrap();
        assert_eq!(summary.as_str(), "refactor: split git module");

        let summary = Summary::parse("\"chore: bump deps\"").unwrap();
        assert_eq!(summary.as_str(), "chore: bump deps");

        let summary = Summary::parse("`docs: fix typos`").unwrap();
        assert_eq!(summary.as_str(), "docs: fix typos");
    }

    #[test]
    fn rejects_blank_output() {
        assert_eq!(Summary::parse(""), None);
        assert_eq!(Summary::parse("  \n```\n```\n"), None);
        assert_eq!(Summary::parse("\"\""), None);
    }

    #[test]
    fn single_mark_is_kept() {
        assert_eq!(Summary::parse("'").unwrap().as_str(), "'");
    }

    #[test]
    fn rejects_empty_subject() {
        assert_eq!(Summary::parse("feat:"), None);
        assert_eq!(Summary::parse("fix(parser):   "), None);
        assert_eq!(Summary::parse("feat!:\n\nbody only"), None);
    }

    #[test]
    fn accepts_non_conventional_header() {
        let summary = Summary::parse("Update README").unwrap();
        assert_eq!(summary.as_str(), "Update README");
        let summary = Summary::parse("note: ").unwrap();
        assert_eq!(summary.as_str(), "note:");
    }
}

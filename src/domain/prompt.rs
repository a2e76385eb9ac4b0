use crate::domain::diff::StagedDiff;
use crate::domain::summary::COMMIT_TYPES;

const MAX_HEADER_LENGTH: usize = 100;

/// Builds the instruction sent to the model. The diff is embedded verbatim.
pub fn build_prompt(diff: &StagedDiff, scope: Option<&str>) -> String {
    let scope_hint = match scope {
        Some(scope) => format!(
            "- Use the scope \"{scope}\" unless the diff clearly belongs elsewhere\n"
        ),
        None => "- Add a scope only when one is obvious from the diff\n".to_string(),
    };

    format!(
        "Write a one-line commit message for the staged changes below.\n\
         \n\
         Follow the Conventional Commits format: <type>(<scope>): <subject>\n\
         \n\
         Types: {types}\n\
         \n\
         Rules:\n\
         - Output only the commit message line, nothing else\n\
         - Keep it under {MAX_HEADER_LENGTH} characters\n\
         - Use the imperative mood (\"add\", not \"added\")\n\
         - The subject must not be empty\n\
         {scope_hint}\
         \n\
         Diff:\n\
         {diff}",
        types = COMMIT_TYPES.join(", "),
        diff = diff.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff() -> StagedDiff {
        StagedDiff::from_output("diff --git a/src/lib.rs b/src/lib.rs\n+pub fn answer() -> u8 { 42 }\n".to_string())
            .unwrap()
    }

    #[test]
    fn embeds_diff_verbatim() {
        let diff = diff();
        let prompt = build_prompt(&diff, None);
        assert!(prompt.ends_with(diff.as_str()));
    }

    #[test]
    fn lists_conventional_types() {
        let prompt = build_prompt(&diff(), None);
        for kind in COMMIT_TYPES {
            assert!(prompt.contains(kind), "missing type {kind}");
        }
        assert!(prompt.contains("100 characters"));
    }

    #[test]
    fn mentions_scope_when_known() {
        let prompt = build_prompt(&diff(), Some("src"));
        assert!(prompt.contains("Use the scope \"src\""));

        let prompt = build_prompt(&diff(), None);
        assert!(!prompt.contains("Use the scope"));
    }
}

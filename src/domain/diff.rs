/// Staged changes as reported by `git diff --cached`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDiff(String);

impl StagedDiff {
    /// Wraps raw diff output, treating whitespace-only output as "no changes".
    pub fn from_output(output: String) -> Option<Self> {
        if output.trim().is_empty() {
            None
        } else {
            Some(Self(output))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Derives a conventional-commit scope from the first modified path: its
/// top-level component, minus a leading `.` or `_`, lower-cased.
pub fn default_scope(modified_files: &[String]) -> Option<String> {
    let first = modified_files.iter().map(|f| f.trim()).find(|f| !f.is_empty())?;
    let top = first.split('/').next().unwrap_or_default();
    let top = top.strip_prefix('.').unwrap_or(top);
    let top = top.strip_prefix('_').unwrap_or(top);
    let scope = top.to_lowercase();
    if scope.is_empty() { None } else { Some(scope) }
}

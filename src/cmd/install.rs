use std::fs;
use std::path::{Path, PathBuf};

use crate::context::AppContext;
use crate::error::AppResult;

const HOOK_NAME: &str = "prepare-commit-msg";
const HOOK_MARKER: &str = "# quill";
const HOOK_BODY: &str = "# quill: draft a commit message from the staged diff\nquill \"$@\" || exit $?\n";

#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Created(PathBuf),
    Appended(PathBuf),
    AlreadyInstalled(PathBuf),
}

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let hooks_dir = ctx.version_control.hooks_directory().await?;
    match install_hook(&hooks_dir)? {
        InstallOutcome::Created(path) => println!("Installed {}", path.display()),
        InstallOutcome::Appended(path) => {
            println!("Added quill to existing hook {}", path.display())
        }
        InstallOutcome::AlreadyInstalled(path) => {
            println!("quill is already installed in {}", path.display())
        }
    }
    Ok(())
}

pub fn install_hook(hooks_dir: &Path) -> AppResult<InstallOutcome> {
    fs::create_dir_all(hooks_dir)?;
    let hook_path = hooks_dir.join(HOOK_NAME);

    let outcome = if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        if existing.contains(HOOK_MARKER) {
            return Ok(InstallOutcome::AlreadyInstalled(hook_path));
        }
        fs::write(&hook_path, format!("{}\n\n{HOOK_BODY}", existing.trim_end()))?;
        InstallOutcome::Appended(hook_path.clone())
    } else {
        fs::write(&hook_path, format!("#!/bin/sh\n{HOOK_BODY}"))?;
        InstallOutcome::Created(hook_path.clone())
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    Ok(outcome)
}

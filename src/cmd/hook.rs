use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::prepare::{HookArgs, HookOutcome, prepare_commit_message};

pub async fn run(ctx: &AppContext, args: HookArgs) -> AppResult<HookOutcome> {
    prepare_commit_message(ctx, &args).await
}

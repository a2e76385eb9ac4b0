pub mod anthropic;
pub mod debug_log;
pub mod git;
pub mod reporter;
